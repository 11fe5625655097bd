use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dispatcher::Request;

/// Per-email open/click tracking overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<bool>,
}

/// An outgoing email. Unset optional fields are omitted from the request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmail {
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    /// ISO-8601 send time.
    #[serde(rename = "scheduled_at", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingOptions>,
    /// Sent as the `Idempotency-Key` header, never in the body.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

impl SendEmail {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            ..Self::default()
        }
    }

    pub fn to_many<I, S>(to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn sender(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn template(
        mut self,
        template_id: impl Into<String>,
        variables: Map<String, Value>,
    ) -> Self {
        self.template_id = Some(template_id.into());
        self.variables = Some(variables);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn scheduled_at(mut self, at: impl Into<String>) -> Self {
        self.scheduled_at = Some(at.into());
        self
    }

    pub fn tracking(mut self, tracking: TrackingOptions) -> Self {
        self.tracking = Some(tracking);
        self
    }

    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Scheduled,
    Cancelled,
    Pending,
    Sent,
    Delivered,
    Bounced,
    Complained,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
    pub status: EmailStatus,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub suppressed: Option<Vec<String>>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmailDetail {
    pub id: String,
    pub from_address: String,
    pub to_address: String,
    pub subject: String,
    pub status: EmailStatus,
    pub created_at: String,
    #[serde(default)]
    pub cc_address: Option<String>,
    #[serde(default)]
    pub bcc_address: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub bounced_at: Option<String>,
    #[serde(default)]
    pub complained_at: Option<String>,
    #[serde(default)]
    pub bounce_type: Option<String>,
    #[serde(default)]
    pub complaint_type: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
    #[serde(default)]
    pub has_body: bool,
}

/// Per-email result inside a batch send.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BatchEmailResult {
    pub index: usize,
    pub status: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub suppressed: Option<Vec<String>>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SendBatchResponse {
    pub data: Vec<BatchEmailResult>,
    pub summary: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionReason {
    HardBounce,
    Complaint,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suppression {
    pub id: String,
    pub email: String,
    pub reason: SuppressionReason,
    pub created_at: String,
    #[serde(default)]
    pub source_email_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SuppressionList {
    #[serde(default)]
    pub data: Vec<Suppression>,
    pub total: u64,
}

/// Organization-wide tracking settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDefaults {
    pub tracking_enabled: bool,
    pub privacy_mode: bool,
    pub webhook_on_every_open: bool,
    pub webhook_on_every_click: bool,
}

/// Partial update of [`TrackingDefaults`]; only set fields are sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackingDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_enabled: Option<bool>,
    /// Don't store IP addresses or user agents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_on_every_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_on_every_click: Option<bool>,
}

/// Paging shared by the list endpoints; unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub cursor: Option<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub(crate) fn apply(&self, mut request: Request) -> Request {
        if let Some(limit) = self.limit {
            request = request.with_query("limit", limit);
        }
        if let Some(offset) = self.offset {
            request = request.with_query("offset", offset);
        }
        if let Some(cursor) = &self.cursor {
            request = request.with_query("cursor", cursor);
        }
        request
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageCursor {
    pub next: Option<String>,
}

/// One page of a list endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub cursor: Option<PageCursor>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub fallback_value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub template_id: String,
    pub subject: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub domain: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    pub name: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Scopes the template to one sending domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
}

impl CreateTemplate {
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            ..Self::default()
        }
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UpdateTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Pending,
    Verified,
    TemporaryFailure,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub priority: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub status: DomainStatus,
    pub created_at: String,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub last_checked_at: Option<String>,
    #[serde(default)]
    pub failing_since: Option<String>,
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DomainVerificationResult {
    pub verified: bool,
    pub status: DomainStatus,
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyMode {
    Live,
    Test,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyPermission {
    FullAccess,
    Sending,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub key_prefix: String,
    pub mode: ApiKeyMode,
    pub permission: ApiKeyPermission,
    pub created_at: String,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub domain: Option<Value>,
    /// Full secret, present only in the create response.
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKey {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ApiKeyMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<ApiKeyPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl CreateApiKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    Active,
    Unsubscribed,
    Bounced,
    Complained,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Unsubscribed => "UNSUBSCRIBED",
            Self::Bounced => "BOUNCED",
            Self::Complained => "COMPLAINED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub email: String,
    pub status: ContactStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub unsubscribed_at: Option<String>,
    #[serde(default)]
    pub bounced_at: Option<String>,
    #[serde(default)]
    pub complained_at: Option<String>,
}

/// Contact fields for create and batch upsert.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactInput {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// IANA zone name, e.g. `Europe/Berlin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl ContactInput {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = Some(fields);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Filters for listing contacts. `tags` is sent comma-joined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub tags: Option<Vec<String>>,
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BatchContactResult {
    pub index: usize,
    pub status: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchContactSummary {
    pub total: u64,
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BatchContactResponse {
    #[serde(default)]
    pub data: Vec<BatchContactResult>,
    #[serde(default)]
    pub summary: BatchContactSummary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AudienceStats {
    pub total: u64,
    pub active: u64,
    pub unsubscribed: u64,
    pub bounced: u64,
    pub complained: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Cancelled,
    Failed,
}

impl BroadcastStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Scheduled => "SCHEDULED",
            Self::Sending => "SENDING",
            Self::Sent => "SENT",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BroadcastRecipientStatus {
    Pending,
    Sent,
    Delivered,
    Opened,
    Clicked,
    Bounced,
    Complained,
    Failed,
}

impl BroadcastRecipientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Delivered => "DELIVERED",
            Self::Opened => "OPENED",
            Self::Clicked => "CLICKED",
            Self::Bounced => "BOUNCED",
            Self::Complained => "COMPLAINED",
            Self::Failed => "FAILED",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BroadcastStats {
    pub total: u64,
    pub sent: u64,
    pub delivered: u64,
    pub opened: u64,
    pub clicked: u64,
    pub bounced: u64,
    pub complained: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub status: BroadcastStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub preview_text: Option<String>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stats: Option<BroadcastStats>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
}

/// Broadcast content. `template_id` is honored on create only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl BroadcastContent {
    /// Content for a new broadcast; name and subject are required on create.
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    pub fn html_content(mut self, html: impl Into<String>) -> Self {
        self.html_content = Some(html.into());
        self
    }

    pub fn from_email(mut self, from_email: impl Into<String>) -> Self {
        self.from_email = Some(from_email.into());
        self
    }
}

/// Tag targeting for send and schedule. Contacts match on ANY listed tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastAudience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,
}

impl BroadcastAudience {
    pub fn is_empty(&self) -> bool {
        self.include_tags.is_none() && self.exclude_tags.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRecipient {
    pub id: String,
    pub contact_id: String,
    pub email: String,
    pub status: BroadcastRecipientStatus,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub opened_at: Option<String>,
    #[serde(default)]
    pub clicked_at: Option<String>,
    #[serde(default)]
    pub bounced_at: Option<String>,
    #[serde(default)]
    pub failed_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BroadcastAnalytics {
    pub opens_over_time: Vec<Value>,
    pub link_performance: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestBroadcastResponse {
    pub message: String,
    #[serde(default)]
    pub email_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        ApiKey, ApiKeyMode, ApiKeyPermission, Broadcast, BroadcastAudience, BroadcastStatus,
        Contact, ContactStatus, CreateApiKey, Domain, DomainStatus, EmailDetail, EmailStatus,
        ListParams, Page, SendEmail, Suppression, SuppressionReason, Template, TrackingOptions,
        UpdateTrackingDefaults,
    };
    use crate::dispatcher::Request;

    #[test]
    fn send_email_omits_unset_fields() {
        let email = SendEmail::new("user@example.com")
            .sender("hello@app.dev")
            .subject("Hi")
            .html("<p>Hi</p>")
            .scheduled_at("2026-01-01T00:00:00Z")
            .idempotency_key("welcome-1")
            .tracking(TrackingOptions {
                opens: Some(true),
                clicks: None,
            });

        let body = serde_json::to_value(&email).expect("must serialize");
        assert_eq!(
            body,
            json!({
                "to": ["user@example.com"],
                "from": "hello@app.dev",
                "subject": "Hi",
                "html": "<p>Hi</p>",
                "scheduled_at": "2026-01-01T00:00:00Z",
                "tracking": {"opens": true}
            })
        );
    }

    #[test]
    fn send_email_uses_camel_case_keys() {
        let mut email = SendEmail::to_many(["a@example.com", "b@example.com"]);
        email.reply_to = Some("support@app.dev".to_owned());
        email.template_id = Some("tpl_1".to_owned());

        let body = serde_json::to_value(&email).expect("must serialize");
        assert_eq!(body["replyTo"], "support@app.dev");
        assert_eq!(body["templateId"], "tpl_1");
        assert_eq!(body["to"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn email_detail_decodes_with_defaults() {
        let detail: EmailDetail = serde_json::from_value(json!({
            "id": "em_1",
            "from_address": "a@app.dev",
            "to_address": "b@example.com",
            "subject": "Hi",
            "status": "delivered",
            "created_at": "2026-01-01T00:00:00Z"
        }))
        .expect("must decode");

        assert_eq!(detail.status, EmailStatus::Delivered);
        assert!(detail.tags.is_empty());
        assert!(!detail.has_body);
        assert_eq!(detail.sent_at, None);
    }

    #[test]
    fn suppression_reason_is_snake_case() {
        let suppression: Suppression = serde_json::from_value(json!({
            "id": "sup_1",
            "email": "gone@example.com",
            "reason": "hard_bounce",
            "createdAt": "2026-01-01T00:00:00Z"
        }))
        .expect("must decode");
        assert_eq!(suppression.reason, SuppressionReason::HardBounce);
    }

    #[test]
    fn tracking_update_sends_only_set_fields() {
        let update = UpdateTrackingDefaults {
            privacy_mode: Some(true),
            ..UpdateTrackingDefaults::default()
        };
        assert_eq!(
            serde_json::to_value(update).expect("must serialize"),
            json!({"privacyMode": true})
        );
    }

    #[test]
    fn list_params_send_only_set_fields_in_order() {
        let request = ListParams::new()
            .limit(20)
            .cursor("c_2")
            .apply(Request::get("/v1/templates"));
        assert_eq!(
            request.query,
            vec![
                ("limit".to_owned(), "20".to_owned()),
                ("cursor".to_owned(), "c_2".to_owned())
            ]
        );
        assert!(ListParams::default()
            .apply(Request::get("/v1/domains"))
            .query
            .is_empty());
    }

    #[test]
    fn page_tolerates_missing_data_and_cursor() {
        let page: Page<Template> = serde_json::from_value(json!({})).expect("must decode");
        assert!(page.data.is_empty());
        assert_eq!(page.cursor, None);
    }

    #[test]
    fn domain_uses_snake_case_wire_names() {
        let domain: Domain = serde_json::from_value(json!({
            "id": "dom_1",
            "name": "app.dev",
            "status": "temporary_failure",
            "created_at": "2026-01-01T00:00:00Z",
            "dns_records": [{"type": "MX", "name": "app.dev", "value": "mx.sendpigeon.dev", "priority": 10}]
        }))
        .expect("must decode");
        assert_eq!(domain.status, DomainStatus::TemporaryFailure);
        assert_eq!(domain.dns_records[0].kind, "MX");
        assert_eq!(domain.dns_records[0].priority, Some(10));
    }

    #[test]
    fn api_key_secret_is_only_present_on_create() {
        let key: ApiKey = serde_json::from_value(json!({
            "id": "key_1",
            "name": "ci",
            "key_prefix": "sk_test_ab",
            "mode": "test",
            "permission": "full_access",
            "created_at": "2026-01-01T00:00:00Z"
        }))
        .expect("must decode");
        assert_eq!(key.mode, ApiKeyMode::Test);
        assert_eq!(key.permission, ApiKeyPermission::FullAccess);
        assert_eq!(key.key, None);

        let create = CreateApiKey {
            permission: Some(ApiKeyPermission::Sending),
            domain_id: Some("dom_1".to_owned()),
            ..CreateApiKey::new("worker")
        };
        assert_eq!(
            serde_json::to_value(create).expect("must serialize"),
            json!({"name": "worker", "permission": "sending", "domainId": "dom_1"})
        );
    }

    #[test]
    fn uppercase_statuses_match_their_query_strings() {
        let contact: Contact = serde_json::from_value(json!({
            "id": "ct_1",
            "email": "a@example.com",
            "status": "UNSUBSCRIBED",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z"
        }))
        .expect("must decode");
        assert_eq!(contact.status, ContactStatus::Unsubscribed);
        assert_eq!(
            serde_json::to_value(contact.status).expect("must serialize"),
            ContactStatus::Unsubscribed.as_str()
        );
        assert!(contact.fields.is_empty());

        for status in [BroadcastStatus::Draft, BroadcastStatus::Cancelled] {
            assert_eq!(
                serde_json::to_value(status).expect("must serialize"),
                status.as_str()
            );
        }
    }

    #[test]
    fn broadcast_stats_default_missing_counters() {
        let broadcast: Broadcast = serde_json::from_value(json!({
            "id": "bc_1",
            "name": "Launch",
            "subject": "We shipped",
            "status": "SENT",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z",
            "stats": {"total": 10, "delivered": 9}
        }))
        .expect("must decode");
        let stats = broadcast.stats.expect("stats must be present");
        assert_eq!(stats.delivered, 9);
        assert_eq!(stats.bounced, 0);
        assert!(broadcast.tags.is_empty());
        assert!(BroadcastAudience::default().is_empty());
    }
}
