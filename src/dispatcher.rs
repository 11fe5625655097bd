use std::fmt;
use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::{
    backoff::{compute_wait, parse_retry_after, Sleeper, TokioSleeper},
    ClientOptions, Result, SendPigeonError,
};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("sendpigeon-rust/", env!("CARGO_PKG_VERSION"));

/// One logical API call: method, path relative to the base URL, optional JSON
/// body, extra headers and query parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header. Caller headers override the base headers on conflict.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }
}

/// Classified result of an attempt or of a whole call.
///
/// [`Dispatcher::execute`] never resolves to `RetryableFailure`: once the
/// retry budget is spent the failure is promoted to `TerminalFailure`.
#[derive(Debug)]
pub enum Outcome {
    Success {
        status: StatusCode,
        body: Value,
    },
    RetryableFailure {
        status: Option<StatusCode>,
        reason: SendPigeonError,
        retry_after: Option<u64>,
    },
    TerminalFailure(SendPigeonError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Converts to the error-returning API surface.
    pub fn into_result(self) -> Result<Value> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::RetryableFailure { reason, .. } | Self::TerminalFailure(reason) => Err(reason),
        }
    }
}

/// Per-call retry bookkeeping. Never shared between calls.
#[derive(Debug)]
pub struct RetryState {
    attempt: u32,
    max_retries: u32,
    last_failure: Option<SendPigeonError>,
}

impl RetryState {
    pub fn new(max_retries: u32) -> Self {
        Self {
            attempt: 0,
            max_retries,
            last_failure: None,
        }
    }

    /// Zero-based index of the current attempt.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn can_retry(&self) -> bool {
        self.attempt < self.max_retries
    }

    pub fn last_failure(&self) -> Option<&SendPigeonError> {
        self.last_failure.as_ref()
    }

    /// Stores a retryable failure, or hands it back when the budget is spent.
    pub fn record_failure(&mut self, failure: SendPigeonError) -> Option<SendPigeonError> {
        if !self.can_retry() {
            return Some(failure);
        }
        self.last_failure = Some(failure);
        None
    }

    /// Moves to the next attempt. Only valid after `record_failure` kept the
    /// failure, so attempts never exceed `max_retries + 1`.
    pub fn advance(&mut self) {
        debug_assert!(self.can_retry(), "advance past the retry budget");
        self.attempt += 1;
    }
}

/// Issues authenticated requests against the SendPigeon API, retrying 429,
/// 5xx and connection failures with backoff.
///
/// Non-idempotent methods are retried like any other; attach an
/// `Idempotency-Key` header when a duplicated write would matter.
#[derive(Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    api_key: String,
    options: ClientOptions,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .field("sleeper", &self.sleeper)
            .finish()
    }
}

impl Dispatcher {
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            options,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replaces the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Sends `request` and decodes the JSON body, returning an error for any
    /// terminal failure.
    pub async fn send(&self, request: &Request) -> Result<Value> {
        self.execute(request).await.into_result()
    }

    /// Runs the retry loop and returns the final classified outcome.
    pub async fn execute(&self, request: &Request) -> Outcome {
        self.run(request, None).await
    }

    /// Like [`Dispatcher::execute`], but resolves to
    /// `TerminalFailure(SendPigeonError::Cancelled)` as soon as `cancel` fires,
    /// checked before every attempt and while backing off.
    pub async fn execute_with_cancellation(
        &self,
        request: &Request,
        cancel: &CancellationToken,
    ) -> Outcome {
        self.run(request, Some(cancel)).await
    }

    async fn run(&self, request: &Request, cancel: Option<&CancellationToken>) -> Outcome {
        let headers = match self.build_headers(&request.headers) {
            Ok(headers) => headers,
            Err(err) => return Outcome::TerminalFailure(err),
        };
        let mut state = RetryState::new(self.options.max_retries());

        loop {
            if is_cancelled(cancel) {
                return Outcome::TerminalFailure(SendPigeonError::Cancelled);
            }

            let (status, reason, retry_after) = match self.attempt(request, &headers).await {
                Outcome::RetryableFailure {
                    status,
                    reason,
                    retry_after,
                } => (status, reason, retry_after),
                outcome => return outcome,
            };

            if let Some(exhausted) = state.record_failure(reason) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    attempt = state.attempt(),
                    status = status.map(|s| s.as_u16()),
                    error = %exhausted,
                    "retries exhausted for {} {}",
                    request.method,
                    request.path
                );
                return Outcome::TerminalFailure(exhausted);
            }

            let decision = compute_wait(state.attempt(), retry_after);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt = state.attempt(),
                status = status.map(|s| s.as_u16()),
                wait_ms = decision.wait.as_millis() as u64,
                source = decision.source.as_str(),
                error = ?state.last_failure(),
                "retrying {} {}",
                request.method,
                request.path
            );
            #[cfg(not(feature = "tracing"))]
            let _ = status;

            state.advance();

            if is_cancelled(cancel) || !self.wait(decision.wait, cancel).await {
                return Outcome::TerminalFailure(SendPigeonError::Cancelled);
            }
        }
    }

    /// Performs a single attempt and classifies it.
    async fn attempt(&self, request: &Request, headers: &HeaderMap) -> Outcome {
        let url = format!(
            "{}{}",
            self.options.base_url().trim_end_matches('/'),
            request.path
        );
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers.clone())
            .timeout(self.options.timeout());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return classify_transport_error(err),
        };

        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_retry_after);

        // The status line arrived; a broken body never spends a retry.
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return Outcome::TerminalFailure(body_read_error(status, err)),
        };

        classify_response(status, decode_body(&bytes), retry_after)
    }

    /// Returns `false` when cancelled mid-wait.
    async fn wait(
        &self,
        duration: std::time::Duration,
        cancel: Option<&CancellationToken>,
    ) -> bool {
        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => false,
                    _ = self.sleeper.sleep(duration) => true,
                }
            }
            None => {
                self.sleeper.sleep(duration).await;
                true
            }
        }
    }

    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", self.api_key.trim()))
            .map_err(|_| {
                SendPigeonError::InvalidRequest(
                    "API key contains characters not allowed in a header".to_owned(),
                )
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(3 + extra.len());
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        for (name, value) in extra {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                SendPigeonError::InvalidRequest(format!("invalid header name '{name}'"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                SendPigeonError::InvalidRequest(format!("invalid value for header '{name}'"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn is_cancelled(cancel: Option<&CancellationToken>) -> bool {
    cancel.is_some_and(CancellationToken::is_cancelled)
}

fn classify_transport_error(err: reqwest::Error) -> Outcome {
    let retryable = !err.is_builder()
        && !err.is_redirect()
        && (err.is_timeout() || err.is_connect() || err.is_request());

    let reason = SendPigeonError::from_transport(err);
    if retryable {
        Outcome::RetryableFailure {
            status: None,
            reason,
            retry_after: None,
        }
    } else {
        Outcome::TerminalFailure(reason)
    }
}

/// A deadline that fires mid-body is a timeout and a broken 2xx body is a
/// transport failure; otherwise the error is reported against the status.
fn body_read_error(status: StatusCode, err: reqwest::Error) -> SendPigeonError {
    if err.is_timeout() || status.is_success() {
        return SendPigeonError::from_transport(err);
    }
    SendPigeonError::Api {
        status: status.as_u16(),
        code: None,
        message: err.to_string(),
    }
}

fn classify_response(status: StatusCode, body: Value, retry_after: Option<u64>) -> Outcome {
    if status.is_success() {
        return Outcome::Success { status, body };
    }

    let error = api_error(status, &body);
    if is_retryable_status(status) {
        Outcome::RetryableFailure {
            status: Some(status),
            reason: error,
            retry_after,
        }
    } else {
        Outcome::TerminalFailure(error)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn api_error(status: StatusCode, body: &Value) -> SendPigeonError {
    let error = body.get("error");
    let field = |name: &str| {
        error
            .and_then(|error| error.get(name))
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    SendPigeonError::Api {
        status: status.as_u16(),
        code: field("code"),
        message: field("message").unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    }
}

/// Unparseable or `null` bodies decode to an empty object.
fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice::<Value>(bytes)
        .ok()
        .filter(|value| !value.is_null())
        .unwrap_or_else(|| Value::Object(Map::new()))
}
