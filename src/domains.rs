use serde_json::json;

use crate::{
    decode::decode_response, dispatcher::Request, encode_path_segment, Dispatcher, Domain,
    DomainVerificationResult, ListParams, Page, Result,
};

/// Sending domains and their DNS verification.
#[derive(Clone, Copy, Debug)]
pub struct Domains<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self, params: &ListParams) -> Result<Page<Domain>> {
        let request = params.apply(Request::get("/v1/domains"));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "domain list")
    }

    /// Registers a domain. The returned records must be published before
    /// [`Domains::verify`] can succeed.
    pub async fn create(&self, name: &str) -> Result<Domain> {
        let request = Request::post("/v1/domains").with_body(json!({ "name": name }));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "domain")
    }

    pub async fn get(&self, id: &str) -> Result<Domain> {
        let request = Request::get(format!("/v1/domains/{}", encode_path_segment(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "domain")
    }

    /// Re-checks the domain's DNS records now.
    pub async fn verify(&self, id: &str) -> Result<DomainVerificationResult> {
        let request = Request::post(format!("/v1/domains/{}/verify", encode_path_segment(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "domain verification")
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = Request::delete(format!("/v1/domains/{}", encode_path_segment(id)));
        self.dispatcher.send(&request).await?;
        Ok(())
    }
}
