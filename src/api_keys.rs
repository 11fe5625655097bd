use crate::{
    decode::{decode_response, encode_body},
    dispatcher::Request,
    encode_path_segment, ApiKey, CreateApiKey, Dispatcher, ListParams, Page, Result,
};

#[derive(Clone, Copy, Debug)]
pub struct ApiKeys<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ApiKeys<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<ApiKey>> {
        let request = params.apply(Request::get("/v1/api-keys"));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "API key list")
    }

    /// Creates a key. [`ApiKey::key`] holds the secret only in this response.
    pub async fn create(&self, key: &CreateApiKey) -> Result<ApiKey> {
        let request = Request::post("/v1/api-keys").with_body(encode_body(key, "API key")?);
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "API key")
    }

    pub async fn get(&self, id: &str) -> Result<ApiKey> {
        let request = Request::get(format!("/v1/api-keys/{}", encode_path_segment(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "API key")
    }

    /// Revokes a key.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = Request::delete(format!("/v1/api-keys/{}", encode_path_segment(id)));
        self.dispatcher.send(&request).await?;
        Ok(())
    }
}
