use crate::{
    decode::{decode_response, encode_body},
    dispatcher::Request,
    encode_path_segment, CreateTemplate, Dispatcher, ListParams, Page, Result, Template,
    UpdateTemplate,
};

/// Reusable email templates under `/v1/templates`.
#[derive(Clone, Copy, Debug)]
pub struct Templates<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Template>> {
        let request = params.apply(Request::get("/v1/templates"));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "template list")
    }

    pub async fn create(&self, template: &CreateTemplate) -> Result<Template> {
        let request =
            Request::post("/v1/templates").with_body(encode_body(template, "template")?);
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "template")
    }

    pub async fn get(&self, id: &str) -> Result<Template> {
        let body = self.dispatcher.send(&Request::get(path(id))).await?;
        decode_response(body, "template")
    }

    /// Applies a partial update; unset fields keep their current value.
    pub async fn update(&self, id: &str, update: &UpdateTemplate) -> Result<Template> {
        let request = Request::patch(path(id)).with_body(encode_body(update, "template update")?);
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "template")
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.dispatcher.send(&Request::delete(path(id))).await?;
        Ok(())
    }
}

fn path(id: &str) -> String {
    format!("/v1/templates/{}", encode_path_segment(id))
}
