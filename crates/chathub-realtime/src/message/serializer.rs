//! JSON serialization for WebSocket messages.

use serde_json::Value;

use super::types::{InboundMessage, OutboundMessage, Payload};

/// Serialize an outbound message into a shareable payload.
pub fn serialize_outbound(msg: &OutboundMessage) -> Result<Payload, serde_json::Error> {
    serde_json::to_string(msg).map(Payload::from)
}

/// Classify an inbound text frame.
///
/// Only a JSON object whose sole field is `"type": "ping"` is a heartbeat; any
/// other text, JSON or not, is chat content.
pub fn parse_inbound(text: &str) -> InboundMessage {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) if is_ping(&fields) => InboundMessage::Heartbeat,
        _ => InboundMessage::Chat(text.to_string()),
    }
}

fn is_ping(fields: &serde_json::Map<String, Value>) -> bool {
    fields.len() == 1 && fields.get("type").and_then(Value::as_str) == Some("ping")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_wire_format() {
        let msg = OutboundMessage::Chat {
            username: "A".into(),
            content: "hello".into(),
        };
        let payload = serialize_outbound(&msg).unwrap();
        assert_eq!(&*payload, r#"{"type":"chat","username":"A","content":"hello"}"#);
    }

    #[test]
    fn test_users_wire_format_keeps_empty_list() {
        let msg = OutboundMessage::Users { users: vec![] };
        let payload = serialize_outbound(&msg).unwrap();
        assert_eq!(&*payload, r#"{"type":"users","users":[]}"#);
    }

    #[test]
    fn test_ping_is_heartbeat() {
        assert_eq!(parse_inbound(r#"{"type":"ping"}"#), InboundMessage::Heartbeat);
        assert_eq!(parse_inbound(r#"{ "type" : "ping" }"#), InboundMessage::Heartbeat);
    }

    #[test]
    fn test_other_text_is_chat_verbatim() {
        assert_eq!(parse_inbound("hello"), InboundMessage::Chat("hello".into()));
        let json = r#"{"type":"chat","content":"x"}"#;
        assert_eq!(parse_inbound(json), InboundMessage::Chat(json.into()));
        assert_eq!(parse_inbound(""), InboundMessage::Chat(String::new()));
        assert_eq!(parse_inbound(r#"["ping"]"#), InboundMessage::Chat(r#"["ping"]"#.into()));
        let extra = r#"{"type":"ping","content":"hi all"}"#;
        assert_eq!(parse_inbound(extra), InboundMessage::Chat(extra.into()));
        assert_eq!(parse_inbound(r#""ping""#), InboundMessage::Chat(r#""ping""#.into()));
    }
}
