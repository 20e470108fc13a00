use crate::client::{ALTINN_API_GW_API_KEY_HEADER_NAME, ALTINN_API_KEY_HEADER_NAME, CORRELATION_ID_HEADER_NAME};
use crate::config::AltinnConfig;
use crate::error::FallbackFailure;
use crate::traits::HttpClient;
use crate::types::{CallContext, HttpRequest, PageRequest, Reportee};
use crate::url_builder::UrlBuilder;
use tracing::{info, warn};

pub const ALTINN_ENDPOINT_REPORTEES: &str = "/ekstern/altinn/api/serviceowner/reportees";

/// Marker in Altinn's 400 answer for a user who has never logged in to Altinn
pub const MISSING_PROFILE_INDICATOR: &str = "user profile";

/// Calls Altinn directly, bypassing the proxy
#[derive(Clone)]
pub struct FallbackClient<C: HttpClient> {
    http_client: C,
    config: AltinnConfig,
}

impl<C: HttpClient> FallbackClient<C> {
    pub fn new(http_client: C, config: AltinnConfig) -> Self {
        Self { http_client, config }
    }

    pub fn build_url(&self, context: &CallContext, page: &PageRequest<'_>) -> crate::error::Result<String> {
        let builder = UrlBuilder::new(&self.config.url, ALTINN_ENDPOINT_REPORTEES)
            .param("ForceEIAuthentication", "")
            .param("subject", context.subject.value())
            .optional_param("serviceCode", page.service_code().map(|c| c.value()))
            .optional_param("serviceEdition", page.service_edition().map(|e| e.value()))
            .param("$top", page.top)
            .param("$skip", page.skip);

        match page.filter() {
            Some(filter) => builder.param_keep_plus("$filter", filter).build(),
            None => builder.build(),
        }
    }

    pub async fn fetch_reportees(
        &self,
        context: &CallContext,
        page: PageRequest<'_>,
    ) -> Result<Vec<Reportee>, FallbackFailure> {
        let url = self.build_url(context, &page).map_err(|e| FallbackFailure {
            message: format!("Fallback call to Altinn could not be built: '{}'", e),
            http_status: None,
            body: None,
        })?;

        let request = HttpRequest::new(url)
            .header(ALTINN_API_GW_API_KEY_HEADER_NAME, self.config.altinn_api_gw_api_key.as_str())
            .header(ALTINN_API_KEY_HEADER_NAME, self.config.altinn_api_key.as_str())
            .header("Accept", "application/json")
            .header(CORRELATION_ID_HEADER_NAME, context.correlation_id.value());

        let response = self.http_client.get(request).await.map_err(|e| {
            let failure = FallbackFailure::from_transport(&e);
            warn!(error = %e, "{}", failure.message);
            failure
        })?;

        if !response.is_success() {
            if is_missing_profile(response.status, &response.body) {
                info!("User has no profile in Altinn, returning no reportees");
                return Ok(Vec::new());
            }

            let failure = FallbackFailure::from_response(response.status, response.reason(), response.body);
            warn!(status = response.status, "{}", failure.message);
            return Err(failure);
        }

        let reportees = serde_json::from_str::<Vec<Reportee>>(&response.body).map_err(|e| {
            let failure = FallbackFailure::from_invalid_body(response.status, &e);
            warn!("{}", failure.message);
            failure
        })?;

        info!(count = reportees.len(), "Fallback call to Altinn completed");
        Ok(reportees)
    }
}

fn is_missing_profile(status: u16, body: &str) -> bool {
    status == 400 && body.to_lowercase().contains(MISSING_PROFILE_INDICATOR)
}
