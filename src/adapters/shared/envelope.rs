//! Response envelope decoding
//!
//! Every supported exchange wraps its replies in a `{success, message, result}`
//! shape, though the field names differ. An [`EnvelopeSchema`] names the
//! fields for one exchange; decoding then produces a typed [`Envelope`].
//!
//! Unknown fields are ignored. `success = false` is not an error at this
//! level: the adapter decides what a failed envelope means.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Field names an exchange uses for the generic envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeSchema {
    pub success: &'static str,
    pub message: &'static str,
    pub result: &'static str,
}

impl EnvelopeSchema {
    /// Lowercase `success` / `message` / `result`
    pub const STANDARD: EnvelopeSchema = EnvelopeSchema {
        success: "success",
        message: "message",
        result: "result",
    };
}

impl Default for EnvelopeSchema {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Decoded envelope. `result` is always present when `success` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub result: Option<T>,
}

/// Why a payload did not fit the envelope
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Payload is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Payload is not a JSON object")]
    NotAnObject,

    #[error("Missing or non-boolean '{0}' field")]
    MissingSuccess(&'static str),

    #[error("Missing '{0}' field on successful response")]
    MissingResult(&'static str),

    #[error("Unexpected '{field}' shape: {source}")]
    InvalidResult {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode an envelope whose `result` must be present (and of shape `T`)
/// whenever `success` is true. On `success = false` the result is dropped
/// unread.
pub fn decode<T: DeserializeOwned>(
    payload: &str,
    schema: &EnvelopeSchema,
) -> Result<Envelope<T>, DecodeError> {
    let (success, message, mut object) = split(payload, schema)?;

    // A rejected call may carry any `result` shape; it is never read.
    if !success {
        return Ok(Envelope {
            success,
            message,
            result: None,
        });
    }

    let value = match object.remove(schema.result) {
        None | Some(Value::Null) => return Err(DecodeError::MissingResult(schema.result)),
        Some(value) => value,
    };
    let result = serde_json::from_value::<T>(value).map_err(|source| DecodeError::InvalidResult {
        field: schema.result,
        source,
    })?;

    Ok(Envelope {
        success,
        message,
        result: Some(result),
    })
}

/// Decode an envelope for endpoints whose result carries nothing the caller
/// needs (it may be absent or null).
pub fn decode_ack(payload: &str, schema: &EnvelopeSchema) -> Result<Envelope<()>, DecodeError> {
    let (success, message, _) = split(payload, schema)?;
    Ok(Envelope {
        success,
        message,
        result: success.then_some(()),
    })
}

fn split(
    payload: &str,
    schema: &EnvelopeSchema,
) -> Result<(bool, Option<String>, Map<String, Value>), DecodeError> {
    let value: Value = serde_json::from_str(payload).map_err(DecodeError::MalformedJson)?;
    let Value::Object(mut object) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let success = object
        .get(schema.success)
        .and_then(Value::as_bool)
        .ok_or(DecodeError::MissingSuccess(schema.success))?;

    let message = match object.remove(schema.message) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    };

    Ok((success, message, object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ticker {
        #[serde(rename = "Last")]
        last: f64,
    }

    #[test]
    fn test_decode_success_with_result() {
        let env: Envelope<Ticker> = decode(
            r#"{"success":true,"message":"","result":{"Last":1.5}}"#,
            &EnvelopeSchema::STANDARD,
        )
        .unwrap();
        assert!(env.success);
        assert_eq!(env.message, None);
        assert_eq!(env.result, Some(Ticker { last: 1.5 }));
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let env: Envelope<Ticker> = decode(
            r#"{"success":true,"extra":[1,2],"result":{"Last":2.0,"Bid":1.9,"Ask":2.1}}"#,
            &EnvelopeSchema::STANDARD,
        )
        .unwrap();
        assert_eq!(env.result.unwrap().last, 2.0);
    }

    #[test]
    fn test_missing_success_is_decode_error() {
        let err = decode::<Ticker>(r#"{"result":{"Last":1.0}}"#, &EnvelopeSchema::STANDARD)
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingSuccess("success")));
    }

    #[test]
    fn test_success_without_result_is_decode_error() {
        let err = decode::<Ticker>(r#"{"success":true,"result":null}"#, &EnvelopeSchema::STANDARD)
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingResult("result")));
    }

    #[test]
    fn test_failed_envelope_is_not_an_error() {
        let env = decode::<Ticker>(
            r#"{"success":false,"message":"INVALID_MARKET","result":null}"#,
            &EnvelopeSchema::STANDARD,
        )
        .unwrap();
        assert!(!env.success);
        assert_eq!(env.message.as_deref(), Some("INVALID_MARKET"));
        assert!(env.result.is_none());
    }

    #[test]
    fn test_failed_envelope_ignores_result_shape() {
        let env = decode::<Vec<Ticker>>(
            r#"{"success":false,"message":"APIKEY_THROTTLED","result":{}}"#,
            &EnvelopeSchema::STANDARD,
        )
        .unwrap();
        assert!(!env.success);
        assert_eq!(env.message.as_deref(), Some("APIKEY_THROTTLED"));
        assert!(env.result.is_none());
    }

    #[test]
    fn test_wrong_result_shape_is_decode_error() {
        let err = decode::<Ticker>(
            r#"{"success":true,"result":{"Last":"not-a-number"}}"#,
            &EnvelopeSchema::STANDARD,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidResult { .. }));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        assert!(matches!(
            decode::<Ticker>("<html>502</html>", &EnvelopeSchema::STANDARD),
            Err(DecodeError::MalformedJson(_))
        ));
        assert!(matches!(
            decode::<Ticker>("[1,2]", &EnvelopeSchema::STANDARD),
            Err(DecodeError::NotAnObject)
        ));
    }

    #[test]
    fn test_custom_schema_field_names() {
        const SCHEMA: EnvelopeSchema = EnvelopeSchema {
            success: "ok",
            message: "error",
            result: "data",
        };
        let env: Envelope<Ticker> =
            decode(r#"{"ok":true,"data":{"Last":3.0}}"#, &SCHEMA).unwrap();
        assert_eq!(env.result.unwrap().last, 3.0);
    }

    #[test]
    fn test_ack_accepts_null_result() {
        let env = decode_ack(r#"{"success":true,"message":"","result":null}"#, &EnvelopeSchema::STANDARD)
            .unwrap();
        assert!(env.success);
        assert_eq!(env.result, Some(()));
    }

    #[test]
    fn test_ack_still_requires_success_field() {
        assert!(matches!(
            decode_ack(r#"{"result":null}"#, &EnvelopeSchema::STANDARD),
            Err(DecodeError::MissingSuccess(_))
        ));
    }
}
