use crate::analysis::{ClassifiedError, ErrorClassifier};
use crate::client::{CONSUMER_ID_HEADER_NAME, CORRELATION_ID_HEADER_NAME, KLIENT_VERSJON_HEADER_NAME};
use crate::config::ProxyConfig;
use crate::error::TransportError;
use crate::traits::HttpClient;
use crate::types::{CallContext, HttpRequest, PageRequest, Reportee};
use crate::url_builder::UrlBuilder;
use thiserror::Error;
use tracing::{debug, info};

pub const PROXY_ENDPOINT_ORGANISASJONER: &str = "/v2/organisasjoner";

/// Failure of a single call to the proxy
#[derive(Debug, Clone, Error)]
pub enum ProxyCallError {
    /// Altinn answered with an error, relayed by the proxy
    #[error("Altinn error via proxy: {}", .0.message)]
    Altinn(ClassifiedError),

    /// The proxy itself is down, misconfigured or answered with garbage
    #[error("Proxy error: {}", .0.message)]
    Proxy(ClassifiedError),

    /// The request could not even be built
    #[error("Could not call proxy: {0}")]
    Client(TransportError),
}

/// Calls altinn-rettigheter-proxy for one page of reportees
#[derive(Clone)]
pub struct ProxyClient<C: HttpClient> {
    http_client: C,
    config: ProxyConfig,
    klient_versjon: String,
    classifier: ErrorClassifier,
}

impl<C: HttpClient> ProxyClient<C> {
    pub fn new(http_client: C, config: ProxyConfig) -> Self {
        let klient_versjon = config.klient_versjon();
        Self {
            http_client,
            config,
            klient_versjon,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn build_url(&self, page: &PageRequest<'_>) -> crate::error::Result<String> {
        UrlBuilder::new(&self.config.url, PROXY_ENDPOINT_ORGANISASJONER)
            .optional_param("serviceCode", page.service_code().map(|c| c.value()))
            .optional_param("serviceEdition", page.service_edition().map(|e| e.value()))
            .param("top", page.top)
            .param("skip", page.skip)
            .optional_param("filter", page.filter())
            .build()
    }

    pub async fn fetch_reportees(
        &self,
        context: &CallContext,
        page: PageRequest<'_>,
    ) -> Result<Vec<Reportee>, ProxyCallError> {
        let url = self
            .build_url(&page)
            .map_err(|e| ProxyCallError::Client(TransportError::invalid_request(e.to_string())))?;

        let request = HttpRequest::new(url)
            .header("Authorization", format!("Bearer {}", context.token.value()))
            .header("Accept", "application/json")
            .header(CORRELATION_ID_HEADER_NAME, context.correlation_id.value())
            .header(CONSUMER_ID_HEADER_NAME, self.config.consumer_id.as_str())
            .header(KLIENT_VERSJON_HEADER_NAME, self.klient_versjon.as_str());

        debug!(top = page.top, skip = page.skip, "Fetching reportees from proxy");

        let response = match self.http_client.get(request).await {
            Ok(response) => response,
            Err(e) if e.is_invalid_request() => return Err(ProxyCallError::Client(e)),
            Err(e) => {
                info!(error = %e, "Call to altinn-rettigheter-proxy failed without a response");
                return Err(ProxyCallError::Proxy(self.classifier.classify_transport_failure(&e)));
            }
        };

        if !response.is_success() {
            let error = self.classifier.classify_response(response.status, &response.body);
            info!(
                origin = %error.origin,
                status = error.http_status,
                message = %error.message,
                cause = %error.cause,
                "Received error from altinn-rettigheter-proxy"
            );

            return Err(if error.is_domain_error() {
                ProxyCallError::Altinn(error)
            } else {
                ProxyCallError::Proxy(error)
            });
        }

        serde_json::from_str::<Vec<Reportee>>(&response.body).map_err(|e| {
            ProxyCallError::Proxy(self.classifier.classify_invalid_success_body(response.status, &e))
        })
    }
}
