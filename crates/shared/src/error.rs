use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the routing service, e.g. `{"detail": "Room not found"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    /// Human readable detail, if the service sent one.
    ///
    /// Validation errors arrive as a list of objects; their `msg` fields are joined.
    pub fn message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            Value::String(text) => text.trim().to_string(),
            Value::Array(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(text) => Some(text.clone()),
                    Value::Object(fields) => fields
                        .get("msg")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("; "),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        (!message.is_empty()).then_some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Room not found"}"#).expect("body");
        assert_eq!(body.message().as_deref(), Some("Room not found"));
    }

    #[test]
    fn validation_detail_is_flattened() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","room_name"],"msg":"field required"},{"msg":"bad"}]}"#,
        )
        .expect("body");
        assert_eq!(body.message().as_deref(), Some("field required; bad"));
    }

    #[test]
    fn missing_or_blank_detail_yields_none() {
        for raw in [r#"{}"#, r#"{"detail":null}"#, r#"{"detail":"  "}"#, r#"{"detail":[]}"#] {
            let body: ErrorBody = serde_json::from_str(raw).expect(raw);
            assert_eq!(body.message(), None, "{raw}");
        }
    }
}
