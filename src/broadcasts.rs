use serde_json::{json, Value};

use crate::{
    decode::{decode_response, encode_body},
    dispatcher::Request,
    encode_path_segment, Broadcast, BroadcastAnalytics, BroadcastAudience, BroadcastContent,
    BroadcastRecipient, BroadcastRecipientStatus, BroadcastStatus, Dispatcher, ListParams, Page,
    Result, TestBroadcastResponse,
};

/// Marketing broadcasts sent to tagged segments of the contact list.
#[derive(Clone, Copy, Debug)]
pub struct Broadcasts<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Broadcasts<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(
        &self,
        params: &ListParams,
        status: Option<BroadcastStatus>,
    ) -> Result<Page<Broadcast>> {
        let mut request = params.apply(Request::get("/v1/broadcasts"));
        if let Some(status) = status {
            request = request.with_query("status", status.as_str());
        }
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "broadcast list")
    }

    /// Creates a draft. Name and subject are required by the API.
    pub async fn create(&self, content: &BroadcastContent) -> Result<Broadcast> {
        let request = Request::post("/v1/broadcasts").with_body(encode_body(content, "broadcast")?);
        self.broadcast(request).await
    }

    pub async fn get(&self, id: &str) -> Result<Broadcast> {
        self.broadcast(Request::get(path(id))).await
    }

    /// Applies a partial update. `template_id` is ignored here.
    pub async fn update(&self, id: &str, content: &BroadcastContent) -> Result<Broadcast> {
        let mut body = encode_body(content, "broadcast update")?;
        if let Value::Object(fields) = &mut body {
            fields.remove("templateId");
        }
        self.broadcast(Request::patch(path(id)).with_body(body)).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.dispatcher.send(&Request::delete(path(id))).await?;
        Ok(())
    }

    /// Copies a broadcast into a new draft.
    pub async fn duplicate(&self, id: &str) -> Result<Broadcast> {
        self.broadcast(Request::post(format!("{}/duplicate", path(id))))
            .await
    }

    pub async fn recipients(
        &self,
        id: &str,
        params: &ListParams,
        status: Option<BroadcastRecipientStatus>,
    ) -> Result<Page<BroadcastRecipient>> {
        let mut request = params.apply(Request::get(format!("{}/recipients", path(id))));
        if let Some(status) = status {
            request = request.with_query("status", status.as_str());
        }
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "broadcast recipients")
    }

    /// Sends now. An empty audience sends no body and targets every
    /// active contact.
    pub async fn send(&self, id: &str, audience: &BroadcastAudience) -> Result<Broadcast> {
        let mut request = Request::post(format!("{}/send", path(id)));
        if !audience.is_empty() {
            request = request.with_body(encode_body(audience, "broadcast audience")?);
        }
        self.broadcast(request).await
    }

    /// Schedules delivery at an ISO-8601 time.
    pub async fn schedule(
        &self,
        id: &str,
        scheduled_at: &str,
        audience: &BroadcastAudience,
    ) -> Result<Broadcast> {
        let mut body = encode_body(audience, "broadcast audience")?;
        if let Value::Object(fields) = &mut body {
            fields.insert("scheduledAt".to_owned(), Value::from(scheduled_at));
        }
        self.broadcast(Request::post(format!("{}/schedule", path(id))).with_body(body))
            .await
    }

    /// Cancels a scheduled broadcast.
    pub async fn cancel(&self, id: &str) -> Result<Broadcast> {
        self.broadcast(Request::post(format!("{}/cancel", path(id))))
            .await
    }

    /// Sends a test copy to `to` without touching the audience.
    pub async fn test(&self, id: &str, to: &[String]) -> Result<TestBroadcastResponse> {
        let request = Request::post(format!("{}/test", path(id))).with_body(json!({ "to": to }));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "broadcast test")
    }

    pub async fn analytics(&self, id: &str) -> Result<BroadcastAnalytics> {
        let request = Request::get(format!("{}/analytics", path(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "broadcast analytics")
    }

    async fn broadcast(&self, request: Request) -> Result<Broadcast> {
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "broadcast")
    }
}

fn path(id: &str) -> String {
    format!("/v1/broadcasts/{}", encode_path_segment(id))
}
