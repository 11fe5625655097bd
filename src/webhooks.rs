//! Webhook signature verification.
//!
//! SendPigeon signs every callback with
//! `hex(HMAC-SHA256(secret, "<timestamp>.<raw body>"))` and sends the result
//! in [`headers::SIGNATURE`], alongside the epoch-seconds timestamp in
//! [`headers::TIMESTAMP`]. Verification must run over the exact request body
//! bytes: re-serialized JSON will not match.
//!
//! ```
//! use sendpigeon::webhooks;
//!
//! let body = br#"{"event":"email.delivered","timestamp":"","data":{}}"#;
//! let timestamp = webhooks::unix_now().to_string();
//! let signature = webhooks::sign(body, &timestamp, "whsec_xxx");
//!
//! let result = webhooks::verify(body, &signature, &timestamp, "whsec_xxx", None);
//! assert!(result.valid);
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default replay window in seconds.
pub const DEFAULT_MAX_AGE_SECS: u64 = 300;

pub const EVENT_DELIVERED: &str = "email.delivered";
pub const EVENT_BOUNCED: &str = "email.bounced";
pub const EVENT_COMPLAINED: &str = "email.complained";
pub const EVENT_OPENED: &str = "email.opened";
pub const EVENT_CLICKED: &str = "email.clicked";
pub const EVENT_TEST: &str = "webhook.test";

/// Header names carrying the webhook signature inputs.
pub mod headers {
    pub const SIGNATURE: &str = "X-Webhook-Signature";
    pub const TIMESTAMP: &str = "X-Webhook-Timestamp";
}

/// Signature inputs as received on the callback request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub signature: String,
    pub timestamp: String,
}

impl WebhookHeaders {
    pub fn new(signature: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Runs [`verify`] with these header values.
    pub fn verify(
        &self,
        payload: &[u8],
        secret: &str,
        max_age_secs: Option<u64>,
    ) -> VerificationResult {
        verify(payload, &self.signature, &self.timestamp, secret, max_age_secs)
    }
}

/// Reason a webhook failed verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("Invalid timestamp")]
    InvalidTimestamp,
    #[error("Timestamp too old")]
    TimestampTooOld,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid JSON payload")]
    InvalidJson,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VerificationResult {
    pub valid: bool,
    pub payload: Option<Value>,
    pub error: Option<VerificationError>,
}

impl VerificationResult {
    fn rejected(error: VerificationError) -> Self {
        Self {
            valid: false,
            payload: None,
            error: Some(error),
        }
    }

    fn accepted(payload: Value) -> Self {
        Self {
            valid: true,
            payload: Some(payload),
            error: None,
        }
    }

    /// Typed view of the payload, or `None` when verification failed.
    pub fn typed_payload(&self) -> Option<WebhookPayload> {
        if !self.valid {
            return None;
        }
        self.payload
            .as_ref()
            .and_then(|payload| WebhookPayload::deserialize(payload).ok())
    }
}

/// Delivery-event webhook body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebhookPayload {
    pub event: String,
    pub timestamp: String,
    pub data: WebhookPayloadData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookPayloadData {
    pub email_id: Option<String>,
    pub to_address: Option<String>,
    pub from_address: Option<String>,
    pub subject: Option<String>,
    pub bounce_type: Option<String>,
    pub complaint_type: Option<String>,
    /// Set on `email.opened`.
    pub opened_at: Option<String>,
    /// Set on `email.clicked`, as are `link_url` and `link_index`.
    pub clicked_at: Option<String>,
    pub link_url: Option<String>,
    pub link_index: Option<i64>,
}

/// Computes the lowercase hex signature for `payload` sent at `timestamp`.
pub fn sign(payload: &[u8], timestamp: &str, secret: &str) -> String {
    hex::encode(mac(payload, timestamp, secret).finalize().into_bytes())
}

/// Verifies a delivery-event webhook against the current wall clock.
///
/// `max_age_secs` defaults to [`DEFAULT_MAX_AGE_SECS`]. Every failure is
/// reported in the returned value; this never panics on hostile input.
pub fn verify(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
    max_age_secs: Option<u64>,
) -> VerificationResult {
    verify_at(
        payload,
        signature,
        timestamp,
        secret,
        max_age_secs.unwrap_or(DEFAULT_MAX_AGE_SECS),
        unix_now(),
    )
}

/// Verifies an inbound-email webhook. Same contract as [`verify`].
pub fn verify_inbound(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
    max_age_secs: Option<u64>,
) -> VerificationResult {
    verify(payload, signature, timestamp, secret, max_age_secs)
}

/// Verifies against an explicit `now` (epoch seconds).
pub fn verify_at(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
    max_age_secs: u64,
    now: i64,
) -> VerificationResult {
    let Some(sent_at) = parse_timestamp(timestamp) else {
        return VerificationResult::rejected(VerificationError::InvalidTimestamp);
    };

    if now.abs_diff(sent_at) > max_age_secs {
        return VerificationResult::rejected(VerificationError::TimestampTooOld);
    }

    let expected = sign(payload, timestamp, secret);
    if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
        return VerificationResult::rejected(VerificationError::InvalidSignature);
    }

    match serde_json::from_slice::<Value>(payload) {
        Ok(value) => VerificationResult::accepted(value),
        Err(_) => VerificationResult::rejected(VerificationError::InvalidJson),
    }
}

/// Current time in epoch seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

/// Epoch seconds from an integer-valued header, tolerating surrounding
/// whitespace and integral decimal forms such as `1700000000.0`.
fn parse_timestamp(timestamp: &str) -> Option<i64> {
    let trimmed = timestamp.trim();
    if let Ok(seconds) = trimmed.parse::<i64>() {
        return Some(seconds);
    }
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    let seconds = trimmed.parse::<f64>().ok()?;
    let integral = seconds.is_finite() && seconds.fract() == 0.0;
    (integral && seconds.abs() < i64::MAX as f64).then_some(seconds as i64)
}

fn mac(payload: &[u8], timestamp: &str, secret: &str) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Compares every byte regardless of where the first mismatch is.
///
/// Only the length (always 64 for a valid signature) short-circuits.
fn constant_time_eq(expected: &[u8], actual: &[u8]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    let mut diff = 0u8;
    for (a, b) in expected.iter().zip(actual) {
        diff |= a ^ b;
    }
    diff == 0
}
