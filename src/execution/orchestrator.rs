//! Proxy-first page fetching with a single direct Altinn fallback.

use crate::client::{FallbackClient, ProxyCallError, ProxyClient};
use crate::error::{ProxyKlientError, Result};
use crate::traits::{HttpClient, PageFetcher};
use crate::types::{CallContext, PageRequest, Reportee};
use tracing::warn;

/// Fetches one page through the proxy, falling back to Altinn when the proxy
/// itself is the problem
#[derive(Clone)]
pub struct FallbackOrchestrator<C: HttpClient> {
    proxy: ProxyClient<C>,
    fallback: Option<FallbackClient<C>>,
}

impl<C: HttpClient> FallbackOrchestrator<C> {
    /// `fallback` is `None` when no Altinn settings are configured
    pub fn new(proxy: ProxyClient<C>, fallback: Option<FallbackClient<C>>) -> Self {
        Self { proxy, fallback }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

impl<C: HttpClient> PageFetcher for FallbackOrchestrator<C> {
    async fn fetch_page(&self, context: &CallContext, page: PageRequest<'_>) -> Result<Vec<Reportee>> {
        let proxy_error = match self.proxy.fetch_reportees(context, page).await {
            Ok(reportees) => return Ok(reportees),
            Err(ProxyCallError::Altinn(error)) => {
                warn!(
                    status = error.http_status,
                    "Altinn answered with error '{}'. Left to the client application",
                    error.message
                );
                return Err(ProxyKlientError::Altinn(error));
            }
            Err(ProxyCallError::Client(error)) => {
                warn!("Unexpected error calling proxy '{}'. Left to the client application", error);
                return Err(ProxyKlientError::Klient {
                    message: error.message.clone(),
                    source: Some(error),
                });
            }
            Err(ProxyCallError::Proxy(error)) => error,
        };

        let Some(fallback) = &self.fallback else {
            warn!(
                status = proxy_error.http_status,
                "Error in altinn-rettigheter-proxy '{}' and no fallback to Altinn is configured",
                proxy_error.message
            );
            return Err(ProxyKlientError::Proxy(proxy_error));
        };

        warn!(
            status = proxy_error.http_status,
            origin = %proxy_error.origin,
            "Error in altinn-rettigheter-proxy '{}'. Retrying by calling Altinn directly",
            proxy_error.message
        );

        fallback
            .fetch_reportees(context, page)
            .await
            .map_err(|failure| ProxyKlientError::Fallback {
                message: failure.message.clone(),
                proxy_error,
                source: failure,
            })
    }
}
