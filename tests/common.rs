//! Shared fixtures for the integration tests
#![allow(dead_code)]

use altinn_proxy_klient::{
    KlientConfig, KlientConfigBuilder, ProxyKlient, Reportee, Result, SelvbetjeningToken, ServiceCode,
    ServiceEdition, Subject,
};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const PROXY_PATH: &str = "/v2/organisasjoner";
pub const ALTINN_PATH: &str = "/ekstern/altinn/api/serviceowner/reportees";

pub const FNR_INNLOGGET_BRUKER: &str = "15008462396";
pub const SYKEFRAVAER_SERVICE_CODE: &str = "3403";
pub const SERVICE_EDITION: &str = "1";
pub const TOKEN: &str = "dette_er_ikke_en_ekte_idToken";
pub const CONSUMER_ID: &str = "klient-applikasjon";

/// Nothing listens here, so connecting is refused right away
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// JSON array with `count` distinct reportees, as served by both the proxy and Altinn
pub fn reportees(count: usize) -> Value {
    let reportees: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "Name": format!("BEDRIFT {}", i),
                "Type": "Business",
                "ParentOrganizationNumber": "811076112",
                "OrganizationNumber": format!("{:09}", 900_000_000 + i),
                "OrganizationForm": "BEDR",
                "Status": "Active"
            })
        })
        .collect();
    Value::Array(reportees)
}

pub async fn start_servers() -> (MockServer, MockServer) {
    (MockServer::start().await, MockServer::start().await)
}

pub fn klient_config(proxy_url: &str, altinn_url: Option<&str>) -> KlientConfig {
    let builder = KlientConfigBuilder::new(CONSUMER_ID, proxy_url).timeout(5);
    let builder = match altinn_url {
        Some(url) => builder.altinn(url, "testApiKey", "test"),
        None => builder,
    };
    builder.build().expect("valid test configuration")
}

pub fn klient(proxy_url: &str, altinn_url: Option<&str>) -> ProxyKlient {
    ProxyKlient::new(klient_config(proxy_url, altinn_url)).expect("client should be created")
}

/// Fetch every active organization for the sykefravaer service
pub async fn fetch_sykefravaer(klient: &ProxyKlient) -> Result<Vec<Reportee>> {
    klient
        .fetch_all_organizations(
            SelvbetjeningToken::new(TOKEN),
            Subject::new(FNR_INNLOGGET_BRUKER),
            Some(ServiceCode::new(SYKEFRAVAER_SERVICE_CODE)),
            Some(ServiceEdition::new(SERVICE_EDITION)),
            true,
        )
        .await
}

/// Number of requests `server` has received
pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}
