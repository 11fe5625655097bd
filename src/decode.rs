use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Result, SendPigeonError};

/// Maps a successful response body onto a typed DTO.
pub(crate) fn decode_response<T: DeserializeOwned>(body: Value, what: &str) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|err| SendPigeonError::Decode(format!("invalid {what} response: {err}")))
}

/// Serializes a request DTO into a JSON body.
pub(crate) fn encode_body<T: serde::Serialize>(body: &T, what: &str) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|err| SendPigeonError::InvalidRequest(format!("could not encode {what}: {err}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::decode_response;
    use crate::{SendPigeonError, TrackingDefaults};

    #[test]
    fn shape_mismatch_is_decode_error() {
        let err = decode_response::<TrackingDefaults>(json!({"trackingEnabled": "yes"}), "tracking")
            .expect_err("must fail");
        match err {
            SendPigeonError::Decode(message) => assert!(message.starts_with("invalid tracking")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
