use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use sendpigeon::webhooks::{self, headers, WebhookHeaders};

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

async fn receive(request_headers: HeaderMap, body: Bytes) -> StatusCode {
    let secret = std::env::var("SENDPIGEON_WEBHOOK_SECRET").unwrap_or_default();
    let signed = WebhookHeaders::new(
        header(&request_headers, headers::SIGNATURE),
        header(&request_headers, headers::TIMESTAMP),
    );

    let result = signed.verify(&body, &secret, None);
    match result.typed_payload() {
        Some(event) => {
            println!("{} for {:?}", event.event, event.data.email_id);
            StatusCode::OK
        }
        None => {
            eprintln!("rejected webhook: {:?}", result.error);
            StatusCode::UNAUTHORIZED
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Router::new().route("/webhooks/sendpigeon", post(receive));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!(
        "listening on http://{}/webhooks/sendpigeon (now={})",
        listener.local_addr()?,
        webhooks::unix_now()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
