use crate::config::HttpSettings;
use crate::error::{ProxyKlientError, Result, TransportError};
use crate::http::{RequestBuilderImpl, ResponseConverterImpl};
use crate::traits::HttpClient;
use crate::types::{HttpRequest, HttpResponse};
use reqwest::Client;
use std::time::Duration;

/// reqwest backed HTTP client
#[derive(Clone)]
pub struct HttpClientImpl {
    client: Client,
    request_builder: RequestBuilderImpl,
    response_converter: ResponseConverterImpl,
}

impl HttpClientImpl {
    /// Create a new HTTP client with configuration
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| ProxyKlientError::invalid_config(format!("Could not create HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self {
            request_builder: RequestBuilderImpl::new(client.clone()),
            response_converter: ResponseConverterImpl::new(),
            client,
        }
    }
}

impl HttpClient for HttpClientImpl {
    async fn get(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let request = self.request_builder.build_request(&request)?;
        let response = self.client.execute(request).await?;

        self.response_converter.convert_response(response).await
    }
}
