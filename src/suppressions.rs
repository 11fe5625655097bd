use crate::{
    decode::decode_response, dispatcher::Request, encode_path_segment, Dispatcher, Result,
    SuppressionList,
};

/// Addresses the platform refuses to send to after hard bounces or complaints.
#[derive(Clone, Copy, Debug)]
pub struct Suppressions<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Suppressions<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Lists suppressed addresses. Paging parameters are sent only when set.
    pub async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> Result<SuppressionList> {
        let mut request = Request::get("/v1/suppressions");
        if let Some(limit) = limit {
            request = request.with_query("limit", limit);
        }
        if let Some(offset) = offset {
            request = request.with_query("offset", offset);
        }
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "suppression list")
    }

    /// Removes an address from the suppression list.
    pub async fn delete(&self, email: &str) -> Result<()> {
        let request = Request::delete(format!("/v1/suppressions/{}", encode_path_segment(email)));
        self.dispatcher.send(&request).await?;
        Ok(())
    }
}
