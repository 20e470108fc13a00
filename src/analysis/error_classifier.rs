//! Classification of failed proxy calls.
//!
//! Decides, from the status and body of a failed call, whether the failure
//! came from Altinn (a domain error the application must handle) or from the
//! proxy itself (an infrastructure error that warrants calling Altinn directly).
//! Pure business logic: no I/O and no logging.

use crate::error::TransportError;
use serde::Deserialize;
use std::fmt;

const MAX_CAUSE_LENGTH: usize = 200;
const UNKNOWN_CAUSE: &str = "unknown";

/// Where a failure originated, as declared by the proxy in its error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ErrorOrigin {
    /// Altinn rejected the request; the proxy only relayed the answer
    Altinn,
    /// The proxy failed on its own
    Proxy,
    /// Undeclared or unreadable origin, or a failure on this side of the wire
    Client,
}

impl ErrorOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Altinn => "ALTINN",
            Self::Proxy => "ALTINN_RETTIGHETER_PROXY",
            Self::Client => "ALTINN_RETTIGHETER_PROXY_KLIENT",
        }
    }
}

impl From<String> for ErrorOrigin {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ALTINN" => Self::Altinn,
            "ALTINN_RETTIGHETER_PROXY" => Self::Proxy,
            _ => Self::Client,
        }
    }
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed proxy call, reduced to what decides fallback eligibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub origin: ErrorOrigin,
    /// HTTP status of the proxy answer, 0 when no exchange took place
    pub http_status: u16,
    pub message: String,
    pub cause: String,
}

impl ClassifiedError {
    /// Altinn rejected the request; calling Altinn directly would give the same answer
    pub fn is_domain_error(&self) -> bool {
        self.origin == ErrorOrigin::Altinn
    }

    pub fn is_fallback_eligible(&self) -> bool {
        !self.is_domain_error()
    }
}

/// Error body as returned by the proxy: `{message, origin}` or `{message, cause}`
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    message: String,
    #[serde(default)]
    origin: Option<ErrorOrigin>,
    #[serde(default)]
    cause: Option<String>,
}

/// Classifies failed proxy calls
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a failed call. A transport error wins over status and body,
    /// since neither exists when no HTTP exchange took place.
    pub fn classify(
        &self,
        http_status: u16,
        body: Option<&str>,
        transport_error: Option<&TransportError>,
    ) -> ClassifiedError {
        match transport_error {
            Some(error) => self.classify_transport_failure(error),
            None => self.classify_response(http_status, body.unwrap_or_default()),
        }
    }

    /// Classify a non-2xx answer from the proxy
    pub fn classify_response(&self, http_status: u16, body: &str) -> ClassifiedError {
        match serde_json::from_str::<ProxyErrorBody>(body) {
            Ok(parsed) => ClassifiedError {
                origin: parsed.origin.unwrap_or(ErrorOrigin::Client),
                http_status,
                message: parsed.message,
                cause: parsed
                    .cause
                    .filter(|cause| !cause.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_CAUSE.to_string()),
            },
            Err(e) => ClassifiedError {
                origin: ErrorOrigin::Client,
                http_status,
                message: format!("Unhandled error, could not parse response body: {}", e),
                cause: self.truncate_body(body),
            },
        }
    }

    /// Classify a call where no HTTP exchange took place (refused, timed out, ...)
    pub fn classify_transport_failure(&self, error: &TransportError) -> ClassifiedError {
        ClassifiedError {
            origin: ErrorOrigin::Client,
            http_status: 0,
            message: error.message.clone(),
            cause: format!("{:?}", error.kind),
        }
    }

    /// Classify a 2xx answer whose body is not a list of reportees
    pub fn classify_invalid_success_body(
        &self,
        http_status: u16,
        error: &serde_json::Error,
    ) -> ClassifiedError {
        ClassifiedError {
            origin: ErrorOrigin::Client,
            http_status,
            message: format!("Could not parse reportees from proxy response: {}", error),
            cause: UNKNOWN_CAUSE.to_string(),
        }
    }

    fn truncate_body(&self, body: &str) -> String {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return UNKNOWN_CAUSE.to_string();
        }
        match trimmed.char_indices().nth(MAX_CAUSE_LENGTH) {
            Some((index, _)) => format!("{}... (truncated)", &trimmed[..index]),
            None => trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportErrorKind;

    #[test]
    fn test_altinn_origin_is_domain_error() {
        let classifier = ErrorClassifier::new();
        let error = classifier.classify_response(
            400,
            r#"{"origin": "ALTINN", "message": "400: The ServiceCode=9999 and ServiceEditionCode=1 are either invalid or non-existing"}"#,
        );

        assert_eq!(error.origin, ErrorOrigin::Altinn);
        assert!(error.is_domain_error());
        assert!(!error.is_fallback_eligible());
        assert_eq!(error.http_status, 400);
        assert!(error.message.starts_with("400: The ServiceCode=9999"));
    }

    #[test]
    fn test_origin_is_case_insensitive() {
        let classifier = ErrorClassifier::new();
        let error = classifier.classify_response(502, r#"{"origin": "altinn", "message": "Bad Gateway"}"#);
        assert!(error.is_domain_error());
    }

    #[test]
    fn test_proxy_origin_is_fallback_eligible() {
        let classifier = ErrorClassifier::new();
        let error = classifier.classify_response(
            500,
            r#"{"origin": "ALTINN_RETTIGHETER_PROXY", "message": "Internal Server Error"}"#,
        );

        assert_eq!(error.origin, ErrorOrigin::Proxy);
        assert!(error.is_fallback_eligible());
    }

    #[test]
    fn test_cause_variant_without_origin() {
        let classifier = ErrorClassifier::new();
        let error = classifier.classify_response(
            404,
            r#"{"message": "Not Found", "cause": "no route for /v2/organisasjoner"}"#,
        );

        assert_eq!(error.origin, ErrorOrigin::Client);
        assert_eq!(error.cause, "no route for /v2/organisasjoner");
        assert!(error.is_fallback_eligible());
    }

    #[test]
    fn test_unknown_origin_falls_back_to_client() {
        let classifier = ErrorClassifier::new();
        let error = classifier.classify_response(500, r#"{"origin": "SOMEWHERE", "message": "x"}"#);
        assert_eq!(error.origin, ErrorOrigin::Client);
    }

    #[test]
    fn test_unparseable_body_never_fails() {
        let classifier = ErrorClassifier::new();

        for body in ["<html>502 Bad Gateway</html>", "", "{\"status\": \"500\"}", "[1,2,3]"] {
            let error = classifier.classify_response(502, body);
            assert_eq!(error.origin, ErrorOrigin::Client);
            assert!(error.message.starts_with("Unhandled error, could not parse response body"));
            assert!(error.is_fallback_eligible());
        }
    }

    #[test]
    fn test_long_body_is_truncated_in_cause() {
        let classifier = ErrorClassifier::new();
        let body = "x".repeat(1000);
        let error = classifier.classify_response(500, &body);

        assert!(error.cause.ends_with("... (truncated)"));
        assert!(error.cause.len() < 300);
    }

    #[test]
    fn test_transport_failure_has_status_zero() {
        let classifier = ErrorClassifier::new();
        let transport = TransportError::new(TransportErrorKind::Connect, "Connection refused");
        let error = classifier.classify(502, Some("ignored"), Some(&transport));

        assert_eq!(error.http_status, 0);
        assert_eq!(error.origin, ErrorOrigin::Client);
        assert_eq!(error.message, "Connection refused");
        assert!(error.is_fallback_eligible());
    }
}
