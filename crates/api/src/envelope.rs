use serde::Deserialize;

use crate::error::ApiError;

/// The JSON envelope every Remote Course Service response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub payload: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Envelope` when `success` is false or the payload
    /// is missing, carrying the service message when one was sent.
    pub fn into_payload(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Envelope(
                self.message.unwrap_or_else(|| "request failed".into()),
            ));
        }
        self.payload.ok_or_else(|| {
            ApiError::Envelope(self.message.unwrap_or_else(|| "missing payload".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_envelope_yields_payload() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": true, "payload": 7}"#).unwrap();
        assert_eq!(envelope.into_payload().unwrap(), 7);
    }

    #[test]
    fn failed_envelope_carries_message() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": false, "message": "wrong password"}"#).unwrap();
        let err = envelope.into_payload().unwrap_err();
        assert!(err.to_string().contains("wrong password"));
    }

    #[test]
    fn success_without_payload_is_an_error() {
        let envelope: Envelope<u32> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(envelope.into_payload().is_err());
    }
}
