use crate::client::{FallbackClient, ProxyClient};
use crate::config::KlientConfig;
use crate::error::Result;
use crate::execution::{FallbackOrchestrator, Paginator};
use crate::http::HttpClientImpl;
use crate::traits::HttpClient;
use crate::types::{
    CallContext, CorrelationId, Reportee, ReporteeQuery, SelvbetjeningToken, ServiceCode, ServiceEdition, Subject,
};
use tracing::instrument;

/// Entry point for fetching the organizations a user can act on behalf of
pub struct ProxyKlient<C: HttpClient = HttpClientImpl> {
    paginator: Paginator<FallbackOrchestrator<C>>,
}

impl ProxyKlient<HttpClientImpl> {
    /// Create a client backed by reqwest
    pub fn new(config: KlientConfig) -> Result<Self> {
        let http_client = HttpClientImpl::new(&config.http)?;
        Self::with_http_client(config, http_client)
    }
}

impl<C: HttpClient> ProxyKlient<C> {
    /// Create a client on top of any transport
    pub fn with_http_client(config: KlientConfig, http_client: C) -> Result<Self> {
        config.validate()?;

        let fallback = config
            .altinn
            .map(|altinn| FallbackClient::new(http_client.clone(), altinn));
        let proxy = ProxyClient::new(http_client, config.proxy);
        let paginator = Paginator::new(FallbackOrchestrator::new(proxy, fallback), config.page_size)?;

        Ok(Self { paginator })
    }

    pub fn has_fallback(&self) -> bool {
        self.paginator.fetcher().has_fallback()
    }

    /// Fetch every reportee for `subject`, under a freshly generated correlation id
    pub async fn fetch_all_organizations(
        &self,
        token: SelvbetjeningToken,
        subject: Subject,
        service_code: Option<ServiceCode>,
        service_edition: Option<ServiceEdition>,
        active_only: bool,
    ) -> Result<Vec<Reportee>> {
        self.fetch_all_organizations_with_correlation_id(
            token,
            subject,
            service_code,
            service_edition,
            active_only,
            CorrelationId::generate(),
        )
        .await
    }

    /// Same as [`Self::fetch_all_organizations`], reusing the caller's correlation id
    pub async fn fetch_all_organizations_with_correlation_id(
        &self,
        token: SelvbetjeningToken,
        subject: Subject,
        service_code: Option<ServiceCode>,
        service_edition: Option<ServiceEdition>,
        active_only: bool,
        correlation_id: CorrelationId,
    ) -> Result<Vec<Reportee>> {
        let context = CallContext::new(token, subject, correlation_id);
        let query = ReporteeQuery::new(service_code, service_edition, active_only);
        self.fetch_organizations(&context, &query).await
    }

    /// Fetch every page of `query`. Aborts on the first failing page.
    #[instrument(skip(self, context, query), fields(correlation_id = %context.correlation_id))]
    pub async fn fetch_organizations(&self, context: &CallContext, query: &ReporteeQuery) -> Result<Vec<Reportee>> {
        self.paginator.fetch_all(context, query).await
    }
}
