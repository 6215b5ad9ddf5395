//! Pulls the structured reply out of an agent exchange.
//!
//! The response schema is only a hint to the model, so the field coercion
//! here tolerates shape drift: `summary` becomes a string whatever it was,
//! and the list fields are kept only when they really are arrays.

use serde_json::{Map, Value};

use ps_domain::error::ExtractionError;
use ps_letta::LettaMessage;

/// The normalized fields of a summarization reply plus the verbatim object.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub risk_notes: Vec<String>,
    pub raw: Map<String, Value>,
}

impl AgentReply {
    pub fn from_object(raw: Map<String, Value>) -> Self {
        Self {
            summary: coerce_string(raw.get("summary")),
            recommendations: coerce_list(raw.get("recommendations")),
            risk_notes: coerce_list(raw.get("risk_notes")),
            raw,
        }
    }
}

/// The newest assistant message, if any.
fn last_assistant(messages: &[LettaMessage]) -> Option<&LettaMessage> {
    messages.iter().rev().find(|msg| msg.is_assistant())
}

/// Text of the newest assistant message when that content is a string.
pub fn assistant_text(messages: &[LettaMessage]) -> Option<&str> {
    last_assistant(messages)?.content.as_ref()?.as_str()
}

/// Parse the newest assistant message as a JSON object.
pub fn extract_assistant_json(
    messages: &[LettaMessage],
) -> Result<Map<String, Value>, ExtractionError> {
    let assistant = last_assistant(messages).ok_or(ExtractionError::NoAssistantMessage)?;

    let content = match &assistant.content {
        Some(Value::String(text)) => text,
        _ => return Err(ExtractionError::NonStringContent),
    };

    match serde_json::from_str::<Value>(content).map_err(ExtractionError::MalformedJson)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractionError::NotAnObject),
    }
}

/// Missing or `null` becomes `""`; other non-strings use their JSON text.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(message_type: &str, content: Value) -> LettaMessage {
        LettaMessage {
            message_type: Some(message_type.into()),
            content: Some(content),
            ..Default::default()
        }
    }

    #[test]
    fn no_assistant_message() {
        let messages = vec![
            msg("user_message", json!("hi")),
            msg("reasoning_message", json!("hmm")),
        ];
        assert!(matches!(
            extract_assistant_json(&messages),
            Err(ExtractionError::NoAssistantMessage)
        ));
        assert!(matches!(
            extract_assistant_json(&[]),
            Err(ExtractionError::NoAssistantMessage)
        ));
    }

    #[test]
    fn non_string_content() {
        let messages = vec![msg("assistant_message", json!({ "summary": "x" }))];
        assert!(matches!(
            extract_assistant_json(&messages),
            Err(ExtractionError::NonStringContent)
        ));

        let missing = vec![LettaMessage {
            message_type: Some("assistant_message".into()),
            ..Default::default()
        }];
        assert!(matches!(
            extract_assistant_json(&missing),
            Err(ExtractionError::NonStringContent)
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let messages = vec![msg("assistant_message", json!("{not json"))];
        assert!(matches!(
            extract_assistant_json(&messages),
            Err(ExtractionError::MalformedJson(_))
        ));
    }

    #[test]
    fn non_object_json_is_rejected() {
        let messages = vec![msg("assistant_message", json!("[1, 2]"))];
        assert!(matches!(
            extract_assistant_json(&messages),
            Err(ExtractionError::NotAnObject)
        ));
    }

    #[test]
    fn newest_assistant_message_wins() {
        let messages = vec![
            msg("assistant_message", json!(r#"{"summary":"old"}"#)),
            msg("tool_return_message", json!("ok")),
            msg("assistant_message", json!(r#"{"summary":"new"}"#)),
            msg("usage_statistics", json!(null)),
        ];
        let map = extract_assistant_json(&messages).unwrap();
        assert_eq!(map["summary"], "new");
        assert_eq!(assistant_text(&messages), Some(r#"{"summary":"new"}"#));
    }

    #[test]
    fn non_array_lists_become_empty() {
        let messages = vec![msg(
            "assistant_message",
            json!(r#"{"summary":"x","recommendations":"not-an-array","risk_notes":["r1"]}"#),
        )];
        let reply = AgentReply::from_object(extract_assistant_json(&messages).unwrap());
        assert_eq!(reply.summary, "x");
        assert!(reply.recommendations.is_empty());
        assert_eq!(reply.risk_notes, vec!["r1".to_string()]);
        assert_eq!(reply.raw["recommendations"], "not-an-array");
    }

    #[test]
    fn summary_coercion() {
        let reply = AgentReply::from_object(Map::new());
        assert_eq!(reply.summary, "");
        assert!(reply.recommendations.is_empty());
        assert!(reply.risk_notes.is_empty());

        let mut raw = Map::new();
        raw.insert("summary".into(), json!(42));
        raw.insert("risk_notes".into(), json!(["fatigue", 3, null]));
        let reply = AgentReply::from_object(raw);
        assert_eq!(reply.summary, "42");
        assert_eq!(reply.risk_notes, vec!["fatigue", "3", "null"]);

        let mut raw = Map::new();
        raw.insert("summary".into(), Value::Null);
        assert_eq!(AgentReply::from_object(raw).summary, "");
    }

    #[test]
    fn assistant_text_requires_string_content() {
        let messages = vec![msg("assistant_message", json!({ "a": 1 }))];
        assert_eq!(assistant_text(&messages), None);
        assert_eq!(assistant_text(&[]), None);
    }
}
