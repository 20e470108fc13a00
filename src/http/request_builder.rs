use crate::error::TransportError;
use crate::types::HttpRequest;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Request};

/// Turns transport-neutral requests into reqwest requests
#[derive(Clone)]
pub struct RequestBuilderImpl {
    client: Client,
}

impl RequestBuilderImpl {
    /// Create a new request builder
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn build_request(&self, request: &HttpRequest) -> Result<Request, TransportError> {
        let mut request_builder = self.client.get(request.url.as_str());

        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::invalid_request(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                TransportError::invalid_request(format!("Invalid value for header '{}': {}", name, e))
            })?;
            request_builder = request_builder.header(header_name, header_value);
        }

        request_builder.build().map_err(Into::into)
    }
}
