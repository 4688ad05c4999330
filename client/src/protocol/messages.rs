use serde::{Deserialize, Serialize};

/// Chat payload; the same JSON object travels in both directions.
///
/// The timestamp is origin-determined: the client stamps outbound messages
/// with RFC 1123 wall-clock time, inbound messages carry whatever the server
/// delivered. Neither side validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    pub timestamp: String,
}

/// Body of the login POST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    /// Human-readable note from the server; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_round_trip() {
        let msg = ChatMessage {
            content: "hi".to_string(),
            timestamp: "Mon, 01 Jan 2024 00:00:00 GMT".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_chat_message_rejects_missing_fields() {
        assert!(serde_json::from_str::<ChatMessage>(r#"{"content":"hi"}"#).is_err());
        assert!(serde_json::from_str::<ChatMessage>(r#"{"timestamp":"now"}"#).is_err());
        assert!(serde_json::from_str::<ChatMessage>("not json").is_err());
    }

    #[test]
    fn test_login_response_message_is_optional() {
        let resp: LoginResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());

        let resp: LoginResponse =
            serde_json::from_str(r#"{"success":true,"message":"Login successful"}"#).unwrap();
        assert_eq!(resp.message.as_deref(), Some("Login successful"));
    }

    #[test]
    fn test_login_request_shape() {
        let req = LoginRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["password"], "pw");
    }
}
