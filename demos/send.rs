use sendpigeon::{SendEmail, SendPigeon, TrackingOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let to = std::env::var("SENDPIGEON_TO")?;
    let client = SendPigeon::from_env().map_err(anyhow::Error::msg)?;

    let email = SendEmail::new(to)
        .subject("Hello from Rust")
        .html("<p>Sent with <strong>sendpigeon</strong>.</p>")
        .text("Sent with sendpigeon.")
        .tracking(TrackingOptions {
            opens: Some(true),
            clicks: Some(false),
        })
        .idempotency_key("demo-hello-1");

    let sent = client.send(&email).await?;
    println!("queued {} ({:?})", sent.id, sent.status);

    let detail = client.emails().get(&sent.id).await?;
    println!("{} -> {}: {:?}", detail.from_address, detail.to_address, detail.status);

    Ok(())
}
