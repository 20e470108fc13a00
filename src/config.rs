use crate::error::{ProxyKlientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Number of reportees asked for per page
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Version reported to the proxy when none is available
pub const NO_VERSION_AVAILABLE: &str = "INGEN_VERSJON";

/// Main client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KlientConfig {
    /// altinn-rettigheter-proxy settings
    pub proxy: ProxyConfig,
    /// Direct Altinn settings. Without them no fallback is attempted.
    pub altinn: Option<AltinnConfig>,
    #[serde(default)]
    pub http: HttpSettings,
    /// Reportees requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Name of the consuming application, sent as `X-Consumer-ID`
    pub consumer_id: String,
    /// Base URL of the proxy
    pub url: String,
    /// Overrides the version sent as `X-Proxyklient-Versjon`
    pub klient_versjon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AltinnConfig {
    /// Base URL of Altinn (behind the API gateway)
    pub url: String,
    /// Sent as `APIKEY`
    pub altinn_api_key: String,
    /// Sent as `X-NAV-APIKEY`
    pub altinn_api_gw_api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ProxyConfig {
    /// Version sent to the proxy: the configured override, else the crate version
    pub fn klient_versjon(&self) -> String {
        let configured = self
            .klient_versjon
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        match configured {
            Some(version) => version.to_string(),
            None => built_klient_versjon().to_string(),
        }
    }
}

/// Version of this client as embedded at build time
pub fn built_klient_versjon() -> &'static str {
    match env!("CARGO_PKG_VERSION") {
        "" => NO_VERSION_AVAILABLE,
        version => version,
    }
}

impl KlientConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|_| ProxyKlientError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: KlientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_base_url("proxy.url", &self.proxy.url)?;

        if self.proxy.consumer_id.trim().is_empty() {
            return Err(ProxyKlientError::invalid_config("proxy.consumer_id must not be blank"));
        }

        if let Some(altinn) = &self.altinn {
            validate_base_url("altinn.url", &altinn.url)?;

            if altinn.altinn_api_key.trim().is_empty() {
                return Err(ProxyKlientError::invalid_config("altinn.altinn_api_key must not be blank"));
            }
            if altinn.altinn_api_gw_api_key.trim().is_empty() {
                return Err(ProxyKlientError::invalid_config(
                    "altinn.altinn_api_gw_api_key must not be blank",
                ));
            }
        }

        if self.page_size == 0 {
            return Err(ProxyKlientError::invalid_config("page_size must be positive"));
        }

        if self.http.timeout_seconds == 0 {
            return Err(ProxyKlientError::invalid_config("http.timeout_seconds must be positive"));
        }

        Ok(())
    }

    pub fn has_fallback(&self) -> bool {
        self.altinn.is_some()
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ProxyKlientError::invalid_config(format!(
            "{} must use http or https, got '{}'",
            field, scheme
        ))),
    }
}

/// Builder for KlientConfig
pub struct KlientConfigBuilder {
    proxy: ProxyConfig,
    altinn: Option<AltinnConfig>,
    http: HttpSettings,
    page_size: u32,
}

impl KlientConfigBuilder {
    /// Start from the mandatory proxy settings
    pub fn new<S: Into<String>>(consumer_id: S, proxy_url: S) -> Self {
        Self {
            proxy: ProxyConfig {
                consumer_id: consumer_id.into(),
                url: proxy_url.into(),
                klient_versjon: None,
            },
            altinn: None,
            http: HttpSettings::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Enable fallback to Altinn
    #[must_use]
    pub fn altinn<S: Into<String>>(mut self, url: S, altinn_api_key: S, altinn_api_gw_api_key: S) -> Self {
        self.altinn = Some(AltinnConfig {
            url: url.into(),
            altinn_api_key: altinn_api_key.into(),
            altinn_api_gw_api_key: altinn_api_gw_api_key.into(),
        });
        self
    }

    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.http.timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn klient_versjon<S: Into<String>>(mut self, version: S) -> Self {
        self.proxy.klient_versjon = Some(version.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<KlientConfig> {
        let config = KlientConfig {
            proxy: self.proxy,
            altinn: self.altinn,
            http: self.http,
            page_size: self.page_size,
        };
        config.validate()?;
        Ok(config)
    }
}
