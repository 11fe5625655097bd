use crate::{
    decode::{decode_response, encode_body},
    dispatcher::Request,
    Dispatcher, Result, TrackingDefaults, UpdateTrackingDefaults,
};

/// Organization-level open/click tracking settings.
#[derive(Clone, Copy, Debug)]
pub struct Tracking<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Tracking<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get_defaults(&self) -> Result<TrackingDefaults> {
        let body = self
            .dispatcher
            .send(&Request::get("/v1/tracking/defaults"))
            .await?;
        decode_response(body, "tracking defaults")
    }

    /// Applies a partial update; unset fields keep their current value.
    pub async fn update_defaults(&self, update: UpdateTrackingDefaults) -> Result<TrackingDefaults> {
        let request = Request::patch("/v1/tracking/defaults")
            .with_body(encode_body(&update, "tracking defaults")?);
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "tracking defaults")
    }
}
