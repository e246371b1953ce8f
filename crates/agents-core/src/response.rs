//! Chat response types.

use serde::{Deserialize, Serialize};

/// Response from a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Unique identifier for this completion.
    pub id: String,
    /// Object type (always "chat.completion").
    pub object: String,
    /// Unix timestamp of when the completion was created.
    pub created: i64,
    /// Model used for the completion.
    pub model: String,
    /// List of completion choices.
    pub choices: Vec<ChatChoice>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Get the content of the first choice.
    ///
    /// This is a convenience method for the common case of single-choice
    /// responses.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("")
    }

    /// Get the first choice.
    pub fn first_choice(&self) -> Option<&ChatChoice> {
        self.choices.first()
    }

    /// Get the finish reason of the first choice.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }

    /// Check if the response was completed normally.
    pub fn is_complete(&self) -> bool {
        self.finish_reason() == Some("stop")
    }

    /// Get the total number of tokens used.
    pub fn total_tokens(&self) -> Option<u32> {
        self.usage.as_ref().map(|u| u.total_tokens)
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Index of this choice.
    pub index: u32,
    /// The generated message.
    pub message: ResponseMessage,
    /// Reason for completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// A message in a chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Role of the message sender.
    pub role: String,
    /// Content of the message.
    #[serde(default)]
    pub content: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,
    /// Number of tokens in the completion.
    pub completion_tokens: u32,
    /// Total number of tokens.
    pub total_tokens: u32,
}

impl Usage {
    /// Create new usage statistics.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_completion_content() {
        let completion = ChatCompletion {
            id: "cmpl-123".to_string(),
            object: "chat.completion".to_string(),
            created: 1_234_567_890,
            model: "deployed-llm".to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ResponseMessage {
                    role: "assistant".to_string(),
                    content: "Hello, world!".to_string(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(Usage::new(10, 5)),
        };

        assert_eq!(completion.content(), "Hello, world!");
        assert!(completion.is_complete());
        assert_eq!(completion.total_tokens(), Some(15));
    }

    #[test]
    fn test_chat_completion_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "deployed-llm",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Hello!"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 9,
                "completion_tokens": 12,
                "total_tokens": 21
            }
        }"#;

        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        assert_eq!(completion.id, "chatcmpl-123");
        assert_eq!(completion.content(), "Hello!");
        assert_eq!(completion.total_tokens(), Some(21));
    }

    #[test]
    fn test_empty_choices() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "deployed-llm",
            "choices": []
        }"#;

        let completion: ChatCompletion = serde_json::from_str(json).unwrap();
        assert_eq!(completion.content(), "");
        assert!(completion.usage.is_none());
    }
}
