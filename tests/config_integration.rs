//! Loading the client configuration from disk

mod common;

use altinn_proxy_klient::{KlientConfig, ProxyKlient, ProxyKlientError};
use common::*;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, ResponseTemplate,
};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let config_path = dir.path().join("altinn-proxy-klient.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

#[tokio::test]
async fn test_client_from_config_file() {
    let (proxy, altinn) = start_servers().await;
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        &format!(
            r#"page_size = 2

[proxy]
consumer_id = "{}"
url = "{}/"
klient_versjon = "9.9.9"

[altinn]
url = "{}"
altinn_api_key = "testApiKey"
altinn_api_gw_api_key = "test"

[http]
timeout_seconds = 5
"#,
            CONSUMER_ID,
            proxy.uri(),
            altinn.uri()
        ),
    );

    Mock::given(method("GET"))
        .and(path(PROXY_PATH))
        .and(query_param("top", "2"))
        .and(header("X-Proxyklient-Versjon", "9.9.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reportees(1)))
        .expect(1)
        .mount(&proxy)
        .await;

    let config = KlientConfig::load_from_file(&config_path).unwrap();
    assert!(config.has_fallback());

    let klient = ProxyKlient::new(config).unwrap();
    let reportees = fetch_sykefravaer(&klient).await.unwrap();

    assert_eq!(reportees.len(), 1);
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = KlientConfig::load_from_file(temp_dir.path().join("missing.toml"));

    assert!(matches!(result, Err(ProxyKlientError::ConfigNotFound { .. })));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        r#"[proxy]
consumer_id = "   "
url = "http://localhost:8080"
"#,
    );

    let result = KlientConfig::load_from_file(&config_path);
    assert!(matches!(result, Err(ProxyKlientError::InvalidConfig { .. })));
}

#[test]
fn test_malformed_config_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "[proxy\nurl = ");

    let result = KlientConfig::load_from_file(&config_path);
    assert!(matches!(result, Err(ProxyKlientError::ConfigParse(_))));
}
