use serde::Deserialize;
use serde_json::json;

use crate::{
    decode::{decode_response, encode_body},
    dispatcher::Request,
    encode_path_segment, AudienceStats, BatchContactResponse, Contact, ContactFilter,
    ContactInput, Dispatcher, ListParams, Page, Result, UpdateContact,
};

/// Audience contacts used as broadcast recipients.
#[derive(Clone, Copy, Debug)]
pub struct Contacts<'a> {
    dispatcher: &'a Dispatcher,
}

#[derive(Deserialize)]
struct TagList {
    #[serde(default)]
    data: Vec<String>,
}

impl<'a> Contacts<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list(&self, params: &ListParams, filter: &ContactFilter) -> Result<Page<Contact>> {
        let mut request = params.apply(Request::get("/v1/contacts"));
        if let Some(tags) = &filter.tags {
            request = request.with_query("tags", tags.join(","));
        }
        if let Some(status) = filter.status {
            request = request.with_query("status", status.as_str());
        }
        if let Some(search) = &filter.search {
            request = request.with_query("search", search);
        }
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "contact list")
    }

    /// Counts contacts by status.
    pub async fn stats(&self) -> Result<AudienceStats> {
        let body = self
            .dispatcher
            .send(&Request::get("/v1/contacts/stats"))
            .await?;
        decode_response(body, "audience stats")
    }

    /// Every distinct tag in use.
    pub async fn tags(&self) -> Result<Vec<String>> {
        let body = self
            .dispatcher
            .send(&Request::get("/v1/contacts/tags"))
            .await?;
        decode_response::<TagList>(body, "contact tags").map(|list| list.data)
    }

    pub async fn create(&self, contact: &ContactInput) -> Result<Contact> {
        let request = Request::post("/v1/contacts").with_body(encode_body(contact, "contact")?);
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "contact")
    }

    /// Creates or updates contacts by email. Per-contact failures are
    /// reported in the response rather than failing the call.
    pub async fn batch(&self, contacts: &[ContactInput]) -> Result<BatchContactResponse> {
        let contacts = encode_body(&contacts, "contact batch")?;
        let request =
            Request::post("/v1/contacts/batch").with_body(json!({ "contacts": contacts }));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "contact batch")
    }

    pub async fn get(&self, id: &str) -> Result<Contact> {
        let body = self.dispatcher.send(&Request::get(path(id))).await?;
        decode_response(body, "contact")
    }

    pub async fn update(&self, id: &str, update: &UpdateContact) -> Result<Contact> {
        let request = Request::patch(path(id)).with_body(encode_body(update, "contact update")?);
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "contact")
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.dispatcher.send(&Request::delete(path(id))).await?;
        Ok(())
    }

    pub async fn unsubscribe(&self, id: &str) -> Result<Contact> {
        let request = Request::post(format!("{}/unsubscribe", path(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "contact")
    }

    pub async fn resubscribe(&self, id: &str) -> Result<Contact> {
        let request = Request::post(format!("{}/resubscribe", path(id)));
        let body = self.dispatcher.send(&request).await?;
        decode_response(body, "contact")
    }
}

fn path(id: &str) -> String {
    format!("/v1/contacts/{}", encode_path_segment(id))
}
