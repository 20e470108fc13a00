use crate::error::{TransportError, TransportErrorKind};
use crate::traits::HttpClient;
use crate::types::{HttpRequest, HttpResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

/// Scripted answer of the mock transport
#[derive(Debug, Clone)]
pub enum MockReply {
    Response(HttpResponse),
    Failure(TransportError),
}

#[derive(Debug)]
struct MockRoute {
    url_prefix: String,
    replies: VecDeque<MockReply>,
}

/// Mock HTTP client for testing.
///
/// Replies are scripted per URL prefix and served in order; the last reply of
/// a prefix is repeated once the others are used up. Every request is recorded.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<Vec<MockRoute>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, url_prefix: &str, status: u16, body: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = HttpResponse::new(status, headers, body.to_string(), url_prefix.to_string());
        self.with_reply(url_prefix, MockReply::Response(response))
    }

    pub fn with_failure(self, url_prefix: &str, error: TransportError) -> Self {
        self.with_reply(url_prefix, MockReply::Failure(error))
    }

    pub fn with_reply(self, url_prefix: &str, reply: MockReply) -> Self {
        {
            let mut routes = lock(&self.routes);
            match routes.iter_mut().find(|route| route.url_prefix == url_prefix) {
                Some(route) => route.replies.push_back(reply),
                None => routes.push(MockRoute {
                    url_prefix: url_prefix.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Requests whose URL starts with `url_prefix`
    pub fn requests_to(&self, url_prefix: &str) -> Vec<HttpRequest> {
        lock(&self.requests)
            .iter()
            .filter(|request| request.url.starts_with(url_prefix))
            .cloned()
            .collect()
    }

    fn next_reply(&self, url: &str) -> Option<MockReply> {
        let mut routes = lock(&self.routes);
        let route = routes
            .iter_mut()
            .filter(|route| url.starts_with(&route.url_prefix))
            .max_by_key(|route| route.url_prefix.len())?;

        if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HttpClient for MockHttpClient {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        lock(&self.requests).push(request);

        match self.next_reply(&url) {
            Some(MockReply::Response(mut response)) => {
                response.url = url;
                Ok(response)
            }
            Some(MockReply::Failure(error)) => Err(error),
            None => Err(TransportError::new(
                TransportErrorKind::Connect,
                format!("Mock response not found for url: {}", url),
            )),
        }
    }
}

/// Helper functions for creating test data
pub mod test_helpers {
    use crate::types::{
        CallContext, CorrelationId, ReporteeQuery, SelvbetjeningToken, ServiceCode, ServiceEdition, Subject,
    };

    pub const FNR_INNLOGGET_BRUKER: &str = "15008462396";
    pub const SYKEFRAVAER_SERVICE_CODE: &str = "3403";
    pub const SERVICE_EDITION: &str = "1";

    /// JSON array with `count` distinct reportees
    pub fn reportees_json(count: usize) -> String {
        let reportees: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"Name": "BEDRIFT {i}", "Type": "Business", "ParentOrganizationNumber": "811076112", "OrganizationNumber": "{:09}", "OrganizationForm": "BEDR", "Status": "Active"}}"#,
                    900_000_000 + i
                )
            })
            .collect();
        format!("[{}]", reportees.join(","))
    }

    pub fn call_context() -> CallContext {
        CallContext::new(
            SelvbetjeningToken::new("dette_er_ikke_en_ekte_idToken"),
            Subject::new(FNR_INNLOGGET_BRUKER),
            CorrelationId::generate(),
        )
    }

    pub fn sykefravaer_query() -> ReporteeQuery {
        ReporteeQuery::new(
            Some(ServiceCode::new(SYKEFRAVAER_SERVICE_CODE)),
            Some(ServiceEdition::new(SERVICE_EDITION)),
            true,
        )
    }
}
