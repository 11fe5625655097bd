use std::fmt;
use std::sync::Arc;

use serde_json::json;

use crate::{
    backoff::Sleeper,
    decode::{decode_response, encode_body},
    dispatcher::Request,
    ApiKeys, Broadcasts, ClientOptions, Contacts, Dispatcher, Domains, Emails, Result,
    SendBatchResponse, SendEmail, SendEmailResponse, SendPigeonError, Suppressions, Templates,
    Tracking,
};

/// Maximum number of emails accepted by one batch request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Percent-encodes one URL path segment (`/`, `@`, `+` and spaces included).
pub(crate) fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[derive(Clone)]
/// Client for the SendPigeon transactional email API.
pub struct SendPigeon {
    dispatcher: Dispatcher,
}

impl fmt::Debug for SendPigeon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendPigeon")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl SendPigeon {
    /// Creates a client with default options.
    ///
    /// `api_key` is a `sk_live_...` or `sk_test_...` key, without the
    /// `Bearer ` prefix.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_options(api_key, ClientOptions::default())
    }

    /// Creates a client with explicit options.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use sendpigeon::{ClientOptions, SendPigeon};
    ///
    /// let client = SendPigeon::with_options(
    ///     "sk_test_xxx",
    ///     ClientOptions::new()
    ///         .with_timeout(Duration::from_secs(10))
    ///         .with_max_retries(3),
    /// );
    /// ```
    pub fn with_options(api_key: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            dispatcher: Dispatcher::new(api_key, options),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `SENDPIGEON_API_KEY` — API key (required)
    /// - `SENDPIGEON_BASE_URL` — API base URL override (optional)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sendpigeon::SendPigeon;
    ///
    /// let client = SendPigeon::from_env().expect("missing SENDPIGEON_API_KEY");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let api_key = std::env::var("SENDPIGEON_API_KEY")
            .map_err(|_| "missing SENDPIGEON_API_KEY environment variable".to_owned())?;
        if api_key.trim().is_empty() {
            return Err("SENDPIGEON_API_KEY is set but empty".to_owned());
        }

        let mut options = ClientOptions::default();
        if let Ok(base_url) = std::env::var("SENDPIGEON_BASE_URL") {
            if !base_url.trim().is_empty() {
                options = options.with_base_url(base_url.trim());
            }
        }
        Ok(Self::with_options(api_key, options))
    }

    /// Replaces the sleeper used between retries.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.dispatcher = self.dispatcher.with_sleeper(sleeper);
        self
    }

    /// Underlying dispatcher, for endpoints without a typed wrapper.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn emails(&self) -> Emails<'_> {
        Emails::new(&self.dispatcher)
    }

    pub fn suppressions(&self) -> Suppressions<'_> {
        Suppressions::new(&self.dispatcher)
    }

    pub fn tracking(&self) -> Tracking<'_> {
        Tracking::new(&self.dispatcher)
    }

    pub fn templates(&self) -> Templates<'_> {
        Templates::new(&self.dispatcher)
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(&self.dispatcher)
    }

    pub fn api_keys(&self) -> ApiKeys<'_> {
        ApiKeys::new(&self.dispatcher)
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(&self.dispatcher)
    }

    pub fn broadcasts(&self) -> Broadcasts<'_> {
        Broadcasts::new(&self.dispatcher)
    }

    /// Sends one transactional email.
    ///
    /// When `email.idempotency_key` is set it is sent as the
    /// `Idempotency-Key` header, which makes retried sends safe.
    pub async fn send(&self, email: &SendEmail) -> Result<SendEmailResponse> {
        let mut request = Request::post("/v1/emails").with_body(encode_body(email, "email")?);
        if let Some(key) = &email.idempotency_key {
            request = request.with_header("Idempotency-Key", key.as_str());
        }
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "send email")
    }

    /// Sends up to [`MAX_BATCH_SIZE`] emails in one request.
    ///
    /// Per-email failures are reported in [`SendBatchResponse::data`] rather
    /// than failing the whole call.
    pub async fn send_batch(&self, emails: &[SendEmail]) -> Result<SendBatchResponse> {
        if emails.is_empty() || emails.len() > MAX_BATCH_SIZE {
            return Err(SendPigeonError::InvalidRequest(format!(
                "batch must contain 1..={MAX_BATCH_SIZE} emails, got {}",
                emails.len()
            )));
        }

        let emails = encode_body(&emails, "email batch")?;
        let request = Request::post("/v1/emails/batch").with_body(json!({ "emails": emails }));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "send batch")
    }
}
