//! `sendpigeon` is an async client for the SendPigeon transactional email API.
//!
//! - [`SendPigeon`] wraps the typed endpoints ([`SendPigeon::send`],
//!   [`SendPigeon::send_batch`], [`SendPigeon::emails`],
//!   [`SendPigeon::suppressions`], [`SendPigeon::tracking`],
//!   [`SendPigeon::templates`], [`SendPigeon::domains`],
//!   [`SendPigeon::api_keys`], [`SendPigeon::contacts`],
//!   [`SendPigeon::broadcasts`]).
//! - [`Dispatcher`] issues authenticated requests and retries rate-limited,
//!   5xx and connection failures with bounded exponential backoff.
//! - [`webhooks`] verifies signed webhook callbacks.

mod api_keys;
mod broadcasts;
mod client;
mod contacts;
mod decode;
mod dispatcher;
mod domains;
mod emails;
mod error;
mod options;
mod suppressions;
mod templates;
mod tracking;
mod types;

pub mod backoff;
pub mod webhooks;

pub(crate) use client::encode_path_segment;

pub use api_keys::ApiKeys;
pub use broadcasts::Broadcasts;
pub use client::{SendPigeon, MAX_BATCH_SIZE};
pub use contacts::Contacts;
pub use dispatcher::{Dispatcher, Outcome, Request, RetryState, USER_AGENT};
pub use domains::Domains;
pub use emails::Emails;
pub use error::SendPigeonError;
pub use options::{ClientOptions, DEFAULT_BASE_URL};
pub use suppressions::Suppressions;
pub use templates::Templates;
pub use tracking::Tracking;
pub use types::{
    ApiKey, ApiKeyMode, ApiKeyPermission, AudienceStats, BatchContactResponse,
    BatchContactResult, BatchContactSummary, BatchEmailResult, Broadcast, BroadcastAnalytics,
    BroadcastAudience, BroadcastContent, BroadcastRecipient, BroadcastRecipientStatus,
    BroadcastStats, BroadcastStatus, Contact, ContactFilter, ContactInput, ContactStatus,
    CreateApiKey, CreateTemplate, DnsRecord, Domain, DomainStatus, DomainVerificationResult,
    EmailDetail, EmailStatus, ListParams, Page, PageCursor, SendBatchResponse, SendEmail,
    SendEmailResponse, Suppression, SuppressionList, SuppressionReason, Template,
    TemplateVariable, TestBroadcastResponse, TrackingDefaults, TrackingOptions, UpdateContact,
    UpdateTemplate, UpdateTrackingDefaults,
};

pub use reqwest::{Method, StatusCode};
pub use tokio_util::sync::CancellationToken;

pub type Result<T> = std::result::Result<T, SendPigeonError>;
