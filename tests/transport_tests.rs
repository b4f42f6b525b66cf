// Tests for the realtime wire messages and websocket URL derivation

use openword_client::transport::{websocket_url, ClientMessage, ServerMessage};

#[test]
fn test_join_message_serialization() {
    let msg = ClientMessage::Join {
        room: "1234:es".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"event\":\"join\""));
    assert!(json.contains("\"room\":\"1234:es\""));

    let deserialized: ClientMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, msg);
}

#[test]
fn test_leave_message_serialization() {
    let msg = ClientMessage::Leave {
        room: "1234:transcript".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"event\":\"leave\""));
    assert!(json.contains("\"room\":\"1234:transcript\""));
}

#[test]
fn test_connected_ack_deserialization() {
    let json = r#"{"event":"connected","sid":"abc123","recovered":true}"#;

    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    assert_eq!(
        msg,
        ServerMessage::Connected {
            sid: "abc123".to_string(),
            recovered: true,
        }
    );
}

#[test]
fn test_transcript_deserialization() {
    let json = r#"{"event":"transcript","data":"Hello everyone"}"#;

    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    assert_eq!(
        msg,
        ServerMessage::Transcript {
            data: "Hello everyone".to_string(),
        }
    );
}

#[test]
fn test_translation_deserialization() {
    let json = r#"{"event":"translation","data":"Hola a todos"}"#;

    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    assert_eq!(
        msg,
        ServerMessage::Translation {
            data: "Hola a todos".to_string(),
        }
    );
}

#[test]
fn test_status_deserialization() {
    let json = r#"{"event":"status","data":{"active":true,"livestream":"ON"}}"#;

    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    match msg {
        ServerMessage::Status { data } => {
            assert!(data.active);
            assert_eq!(data.livestream.as_deref(), Some("ON"));
        }
        other => panic!("Unexpected message: {:?}", other),
    }
}

#[test]
fn test_status_without_livestream() {
    let json = r#"{"event":"status","data":{"active":false,"livestream":null}}"#;

    let msg: ServerMessage = serde_json::from_str(json).unwrap();
    match msg {
        ServerMessage::Status { data } => {
            assert!(!data.active);
            assert!(data.livestream.is_none());
        }
        other => panic!("Unexpected message: {:?}", other),
    }
}

#[test]
fn test_websocket_url_derivation() {
    assert_eq!(
        websocket_url("http://localhost:3000", "participant"),
        "ws://localhost:3000/participant"
    );
    assert_eq!(
        websocket_url("https://translate.example.org/", "participant"),
        "wss://translate.example.org/participant"
    );
    assert_eq!(
        websocket_url("wss://translate.example.org", "participant"),
        "wss://translate.example.org/participant"
    );
}
