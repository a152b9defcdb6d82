//! Request execution: route → wire request → transport → classified outcome.
//!
//! # Design
//! `RequestExecutor` holds a transport and an immutable `ExecutorConfig`,
//! nothing else, so concurrent calls share no mutable state. Every fault
//! (bad URL, transport error, non-2xx status) is folded into a failed
//! `TransportOutcome`; `execute` itself cannot fail.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::decode::decode;
use crate::encoding::{encode_form, encode_query};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::route::RouteDescriptor;
use crate::types::{EmptyResponse, ResponseObject};
use crate::wrapper::{TransportOutcome, TypedResult, TypedResultList};

/// Message carried by every successful outcome.
pub const SUCCESS_MESSAGE: &str = "Success";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings fixed at executor construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Per-request timeout handed to the transport.
    pub timeout: Duration,
    /// Log outgoing requests and raw responses.
    pub log_traffic: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            log_traffic: true,
        }
    }
}

impl ExecutorConfig {
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    #[must_use]
    pub fn log_traffic(mut self, enabled: bool) -> Self {
        self.config.log_traffic = enabled;
        self
    }

    pub fn build(self) -> ExecutorConfig {
        self.config
    }
}

/// Performs one request per call and classifies the result.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    transport: T,
    config: ExecutorConfig,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ExecutorConfig::default())
    }

    pub fn with_config(transport: T, config: ExecutorConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Turn a route into a wire request.
    ///
    /// GET routes carry their query in the URL and send no body. Other
    /// methods send the body form-encoded when a header asks for it, JSON
    /// otherwise.
    pub fn build_request(&self, route: &RouteDescriptor) -> Result<HttpRequest, ApiError> {
        let mut url = format!("{}{}", route.base_url(), route.path());
        let body = if route.method() == HttpMethod::Get {
            url.push_str(&encode_query(route.query()));
            None
        } else if route.is_url_encoded() {
            Some(encode_form(route.body()).into_bytes())
        } else {
            Some(serde_json::to_vec(route.body())?)
        };

        if let Err(source) = url::Url::parse(&url) {
            return Err(ApiError::InvalidUrl { url, source });
        }

        Ok(HttpRequest {
            method: route.method(),
            url,
            headers: route
                .headers()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            body,
            timeout: self.config.timeout,
        })
    }

    /// Build, send and classify one request.
    pub async fn execute(&self, route: &RouteDescriptor) -> TransportOutcome {
        let request = match self.build_request(route) {
            Ok(request) => request,
            Err(err) => {
                warn!(path = route.path(), "could not build request: {err}");
                return TransportOutcome::failure(err.to_string());
            }
        };
        if self.config.log_traffic {
            log_request(route, &request);
        }

        let url = request.url.clone();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, "transport failed: {err}");
                return TransportOutcome::failure(ApiError::from(err).to_string());
            }
        };
        if self.config.log_traffic {
            log_response(&url, &response);
        }

        classify(response)
    }

    /// Execute `route` and decode a single-object envelope.
    pub async fn to_object<D: DeserializeOwned>(&self, route: &RouteDescriptor) -> TypedResult<D> {
        self.execute(route).await.into_object()
    }

    /// Execute `route` and decode a list envelope.
    pub async fn to_list<D: DeserializeOwned>(
        &self,
        route: &RouteDescriptor,
    ) -> TypedResultList<D> {
        self.execute(route).await.into_list()
    }
}

/// Map a completed exchange to an outcome by status code.
pub fn classify(response: HttpResponse) -> TransportOutcome {
    match response.status {
        200..=299 => TransportOutcome::success(SUCCESS_MESSAGE, response.body),
        400 => TransportOutcome::failure(bad_request_message(&response.body)),
        401 => TransportOutcome::failure("401"),
        404 => TransportOutcome::failure("NotFound, 404"),
        500 => TransportOutcome::failure("Internal Server Error, 500"),
        other => TransportOutcome::failure(format!("Other, {other}")),
    }
}

/// A 400 body is assumed to be an ordinary envelope whose `rd` explains
/// the rejection.
fn bad_request_message(body: &[u8]) -> String {
    match decode::<ResponseObject<EmptyResponse>>(body).into_value() {
        Some(envelope) if !envelope.rd.is_empty() => envelope.rd,
        _ => "Bad Request, 400".to_string(),
    }
}

fn log_request(route: &RouteDescriptor, request: &HttpRequest) {
    info!(method = %request.method, url = %request.url, "sending request");
    debug!(headers = ?route.headers(), "request headers");
    if request.method == HttpMethod::Get {
        debug!(params = %encode_query(route.query()), "request parameters");
    } else if let Some(body) = &request.body {
        debug!(body = %String::from_utf8_lossy(body), "request body");
    }
}

fn log_response(url: &str, response: &HttpResponse) {
    info!(status = response.status, %url, "received response");
    debug!(body = %String::from_utf8_lossy(&response.body), "response body");
}
