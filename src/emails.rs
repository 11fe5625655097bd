use crate::{
    decode::decode_response, dispatcher::Request, encode_path_segment, Dispatcher, EmailDetail,
    Result,
};

/// `/v1/emails` operations on already-sent or scheduled emails.
#[derive(Clone, Copy, Debug)]
pub struct Emails<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Emails<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetches an email by ID.
    pub async fn get(&self, id: &str) -> Result<EmailDetail> {
        let request = Request::get(format!("/v1/emails/{}", encode_path_segment(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "email")
    }

    /// Cancels a scheduled email.
    pub async fn cancel(&self, id: &str) -> Result<EmailDetail> {
        let request = Request::post(format!("/v1/emails/{}/cancel", encode_path_segment(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "email")
    }
}
