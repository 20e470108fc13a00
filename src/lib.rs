//! Altinn proxy client - fetches the organizations a user can act on behalf of
//!
//! Reportees are fetched page by page from altinn-rettigheter-proxy. When the
//! proxy itself fails and Altinn settings are configured, the same page is
//! fetched directly from Altinn instead. Errors reported by Altinn are passed
//! on to the caller unchanged and never retried.

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Shared utility modules
pub mod traits;
pub mod url_builder;

// Main functionality modules
pub mod analysis;
pub mod client;
pub mod execution;
pub mod http;
pub mod klient;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export main types for convenience
pub use analysis::{ClassifiedError, ErrorClassifier, ErrorOrigin};
pub use config::{AltinnConfig, HttpSettings, KlientConfig, KlientConfigBuilder, ProxyConfig};
pub use error::{FallbackFailure, ProxyKlientError, Result, TransportError, TransportErrorKind};
pub use http::HttpClientImpl;
pub use klient::ProxyKlient;
pub use traits::{HttpClient, PageFetcher};
pub use types::{
    CallContext, CorrelationId, Fnr, Reportee, ReporteeQuery, ReporteeStatus, ReporteeType, SelvbetjeningToken,
    ServiceCode, ServiceEdition, Subject, FILTER_ACTIVE_ORGANIZATIONS,
};
