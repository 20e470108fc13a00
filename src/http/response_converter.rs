use crate::error::TransportError;
use crate::types::HttpResponse;
use reqwest::Response;
use std::collections::HashMap;

/// Reads a reqwest response into an owned HttpResponse
#[derive(Clone)]
pub struct ResponseConverterImpl;

impl ResponseConverterImpl {
    /// Create a new response converter
    pub fn new() -> Self {
        Self
    }

    pub async fn convert_response(&self, response: Response) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.to_string(), value_str.to_string());
            }
        }

        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
            url,
        })
    }
}

impl Default for ResponseConverterImpl {
    fn default() -> Self {
        Self::new()
    }
}
