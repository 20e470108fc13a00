use crate::error::{ProxyKlientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Filter sent when only active organizations (no persons) are wanted
pub const FILTER_ACTIVE_ORGANIZATIONS: &str = "Type ne 'Person' and Status eq 'Active'";

/// Organization (or person) the logged in user can act on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reportee {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub reportee_type: ReporteeType,
    #[serde(rename = "OrganizationNumber", default)]
    pub organization_number: Option<String>,
    #[serde(rename = "ParentOrganizationNumber", default)]
    pub parent_organization_number: Option<String>,
    #[serde(rename = "OrganizationForm", default)]
    pub organization_form: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<ReporteeStatus>,
    #[serde(rename = "SocialSecurityNumber", default)]
    pub social_security_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReporteeType {
    Enterprise,
    Business,
    Person,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReporteeStatus {
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

/// ID-porten token for the logged in user, forwarded to the proxy as a bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct SelvbetjeningToken(String);

impl SelvbetjeningToken {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SelvbetjeningToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelvbetjeningToken(***)")
    }
}

/// End user the reportees are fetched for. Only sent on the direct Altinn call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<Fnr> for Subject {
    fn from(fnr: Fnr) -> Self {
        Self(fnr.0)
    }
}

/// Norwegian national identity number (fødselsnummer)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fnr(String);

impl Fnr {
    /// Create a validated identity number: exactly 11 digits
    pub fn new<S: Into<String>>(value: S) -> Result<Self> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(ProxyKlientError::InvalidSubject {
                message: "identity number must consist of 11 digits".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn is_valid(value: &str) -> bool {
        static FNR_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        FNR_PATTERN
            .get_or_init(|| Regex::new(r"^[0-9]{11}$").ok())
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCode(String);

impl ServiceCode {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEdition(String);

impl ServiceEdition {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Identifier sent as `X-Correlation-ID` on every call belonging to one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse the caller's identifier if present and non-blank, otherwise generate one
    pub fn from_optional(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::generate(),
        }
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-call values threaded through every request of one fetch
#[derive(Debug, Clone)]
pub struct CallContext {
    pub token: SelvbetjeningToken,
    pub subject: Subject,
    pub correlation_id: CorrelationId,
}

impl CallContext {
    pub fn new(token: SelvbetjeningToken, subject: Subject, correlation_id: CorrelationId) -> Self {
        Self {
            token,
            subject,
            correlation_id,
        }
    }
}

/// Scoping of a reportee lookup, shared by every page of a fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporteeQuery {
    pub service_code: Option<ServiceCode>,
    pub service_edition: Option<ServiceEdition>,
    pub filter: Option<String>,
}

impl ReporteeQuery {
    pub fn new(
        service_code: Option<ServiceCode>,
        service_edition: Option<ServiceEdition>,
        active_only: bool,
    ) -> Self {
        Self {
            service_code,
            service_edition,
            filter: active_only.then(|| FILTER_ACTIVE_ORGANIZATIONS.to_string()),
        }
    }

    #[must_use]
    pub fn with_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The request for one page window of this query
    pub fn page(&self, top: u32, skip: u32) -> PageRequest<'_> {
        PageRequest {
            top,
            skip,
            query: self,
        }
    }
}

/// One page window of a reportee query
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub top: u32,
    pub skip: u32,
    pub query: &'a ReporteeQuery,
}

impl PageRequest<'_> {
    pub fn filter(&self) -> Option<&str> {
        self.query.filter.as_deref()
    }

    pub fn service_code(&self) -> Option<&ServiceCode> {
        self.query.service_code.as_ref()
    }

    pub fn service_edition(&self) -> Option<&ServiceEdition> {
        self.query.service_edition.as_ref()
    }
}

/// Outgoing GET request handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP response data with metadata
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub url: String,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HashMap<String, String>, body: String, url: String) -> Self {
        Self {
            status,
            headers,
            body,
            url,
        }
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .is_some_and(|(_, value)| value.to_ascii_lowercase().contains("json"))
    }

    /// Canonical reason phrase for the status code
    pub fn reason(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown")
    }
}
