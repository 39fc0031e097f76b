use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// `prompt` stays untyped so a non-string prompt is a 400, not a body error
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default)]
    pub history: Option<Vec<Turn>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RelayResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Who produced a turn. The widget calls the assistant `assistant`; upstream
/// only knows `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model", alias = "assistant")]
    Model,
}

/// A piece of turn content. Fields other than `text` are carried through to
/// upstream untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            extra: Map::new(),
        }
    }
}

/// One conversation turn, in the same `{ role, parts }` shape the widget
/// sends and the upstream API consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assistant_role_becomes_model() {
        let turn: Turn = serde_json::from_value(json!({
            "role": "assistant",
            "parts": [{ "text": "Dobar dan!" }]
        }))
        .unwrap();

        assert_eq!(turn.role, Role::Model);
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({ "role": "model", "parts": [{ "text": "Dobar dan!" }] })
        );
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = serde_json::from_value::<Turn>(json!({
            "role": "system",
            "parts": [{ "text": "x" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_relay_request_optional_fields() {
        let empty: RelayRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.prompt.is_none());
        assert!(empty.history.is_none());

        let nulls: RelayRequest =
            serde_json::from_str(r#"{"prompt": null, "history": null}"#).unwrap();
        assert!(nulls.prompt.is_none());
        assert!(nulls.history.is_none());
    }

    #[test]
    fn test_history_parts_pass_through_unchanged() {
        let raw = json!({
            "role": "user",
            "parts": [
                { "text": "Pogledajte dokument" },
                { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
            ]
        });

        let turn: Turn = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(turn.parts[0], Part::text("Pogledajte dokument"));
        assert_eq!(turn.parts[1].text, None);
        assert_eq!(serde_json::to_value(&turn).unwrap(), raw);
    }

    #[test]
    fn test_non_string_prompt_still_parses() {
        let request: RelayRequest = serde_json::from_str(r#"{"prompt": false}"#).unwrap();
        assert_eq!(request.prompt, Some(Value::Bool(false)));
    }

    #[test]
    fn test_user_turn_shape() {
        assert_eq!(
            serde_json::to_value(Turn::user("Zdravo")).unwrap(),
            json!({ "role": "user", "parts": [{ "text": "Zdravo" }] })
        );
    }
}
