pub mod fallback;
pub mod proxy;

pub use fallback::FallbackClient;
pub use proxy::{ProxyCallError, ProxyClient};

pub const CORRELATION_ID_HEADER_NAME: &str = "X-Correlation-ID";
pub const CONSUMER_ID_HEADER_NAME: &str = "X-Consumer-ID";
pub const KLIENT_VERSJON_HEADER_NAME: &str = "X-Proxyklient-Versjon";
pub const ALTINN_API_KEY_HEADER_NAME: &str = "APIKEY";
pub const ALTINN_API_GW_API_KEY_HEADER_NAME: &str = "X-NAV-APIKEY";
