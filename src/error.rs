use crate::analysis::ClassifiedError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for proxy client operations
pub type Result<T> = std::result::Result<T, ProxyKlientError>;

/// Errors surfaced to the application using the client
#[derive(Debug, Error)]
pub enum ProxyKlientError {
    /// Altinn rejected the request. Relayed by the proxy and never retried.
    #[error("{}", .0.message)]
    Altinn(ClassifiedError),

    /// The proxy failed and no fallback to Altinn is configured
    #[error("Error from altinn-rettigheter-proxy: {}", .0.message)]
    Proxy(ClassifiedError),

    /// The proxy failed and the direct call to Altinn failed as well
    #[error("{message}")]
    Fallback {
        message: String,
        proxy_error: ClassifiedError,
        #[source]
        source: FallbackFailure,
    },

    /// Unexpected failure that is neither an HTTP error nor a proxy outage
    #[error("Client error while calling proxy: {message}")]
    Klient {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid subject: {message}")]
    InvalidSubject { message: String },
}

impl ProxyKlientError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new client error without an underlying transport error
    pub fn client<S: Into<String>>(message: S) -> Self {
        Self::Klient {
            message: message.into(),
            source: None,
        }
    }

    /// The classified proxy error carried by this error, if any
    pub fn proxy_error(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Altinn(error) | Self::Proxy(error) => Some(error),
            Self::Fallback { proxy_error, .. } => Some(proxy_error),
            _ => None,
        }
    }

    /// HTTP status of the answer that ended the call, when one was received
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Altinn(error) | Self::Proxy(error) => {
                (error.http_status != 0).then_some(error.http_status)
            }
            Self::Fallback { source, .. } => source.http_status,
            _ => None,
        }
    }

    pub fn is_altinn_error(&self) -> bool {
        matches!(self, Self::Altinn(_))
    }
}

/// Kind of failure reported by the HTTP transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Could not connect to the remote host
    Connect,
    /// The request timed out
    Timeout,
    /// The response body could not be read
    Body,
    /// The request could not be built (invalid URL, header value, ...)
    InvalidRequest,
    Other,
}

/// Failure where no usable HTTP exchange took place
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new<S: Into<String>>(kind: TransportErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::new(TransportErrorKind::InvalidRequest, message)
    }

    /// Whether the request never left the client because it could not be built
    pub fn is_invalid_request(&self) -> bool {
        self.kind == TransportErrorKind::InvalidRequest
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_builder() {
            TransportErrorKind::InvalidRequest
        } else if error.is_body() || error.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, error.to_string())
    }
}

/// Why the direct call to Altinn failed
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FallbackFailure {
    pub message: String,
    /// HTTP status from Altinn, `None` when no response was received
    pub http_status: Option<u16>,
    /// Response body from Altinn, kept verbatim
    pub body: Option<String>,
}

impl FallbackFailure {
    pub fn from_response(http_status: u16, reason: &str, body: String) -> Self {
        Self {
            message: format!(
                "Fallback call to Altinn failed with HTTP status '{}' and message '{}'",
                http_status, reason
            ),
            http_status: Some(http_status),
            body: Some(body),
        }
    }

    pub fn from_transport(error: &TransportError) -> Self {
        Self {
            message: format!("Fallback call to Altinn failed with message '{}'", error.message),
            http_status: None,
            body: None,
        }
    }

    pub fn from_invalid_body(http_status: u16, error: &serde_json::Error) -> Self {
        Self {
            message: format!(
                "Fallback call to Altinn returned an unreadable body: '{}'",
                error
            ),
            http_status: Some(http_status),
            body: None,
        }
    }
}
