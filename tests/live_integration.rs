use sendpigeon::{SendPigeon, SendPigeonError};

fn load_live_client() -> Option<SendPigeon> {
    match SendPigeon::from_env() {
        Ok(client) => Some(client),
        Err(reason) => {
            eprintln!("skipping live test: {reason}");
            None
        }
    }
}

#[tokio::test]
async fn live_tracking_defaults_and_missing_email() {
    let Some(client) = load_live_client() else {
        return;
    };

    let defaults = client
        .tracking()
        .get_defaults()
        .await
        .expect("tracking defaults must load");
    eprintln!("tracking defaults: {defaults:?}");

    let err = client
        .emails()
        .get("em_does_not_exist")
        .await
        .expect_err("unknown email must fail");
    match err {
        SendPigeonError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("expected api error, got {other:?}"),
    }
}
