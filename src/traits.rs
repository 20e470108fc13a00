use crate::error::{Result, TransportError};
use crate::types::{CallContext, HttpRequest, HttpResponse, PageRequest, Reportee};
use std::future::Future;

/// Trait for HTTP transport implementations
pub trait HttpClient: Send + Sync + Clone {
    /// Execute a GET request. Any HTTP answer, whatever its status, is `Ok`;
    /// `Err` means no usable exchange took place.
    fn get(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = std::result::Result<HttpResponse, TransportError>> + Send;
}

/// Trait for anything that can deliver one page of reportees
pub trait PageFetcher: Send + Sync {
    fn fetch_page(
        &self,
        context: &CallContext,
        page: PageRequest<'_>,
    ) -> impl Future<Output = Result<Vec<Reportee>>> + Send;
}
