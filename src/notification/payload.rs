//! Webhook payload 类型 - Discord embed 格式
//!
//! Payload 格式：
//! ```json
//! {
//!   "content": "@here ...",
//!   "embeds": [{
//!     "title": "🚨 CloudWatch Alarm: cpu-high",
//!     "description": "...",
//!     "color": 15158332,
//!     "fields": [{ "name": "Metric", "value": "CPUUtilization", "inline": true }],
//!     "footer": { "text": "..." },
//!     "timestamp": "2024-05-01T10:15:30.123+00:00"
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// 发送到 webhook 的完整消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// embed 之上的纯文本（用于 @提醒）
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl WebhookMessage {
    /// 按名称查找第一个 embed 的字段值
    pub fn field(&self, name: &str) -> Option<&str> {
        self.embeds
            .first()?
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let message = WebhookMessage {
            content: "hello".to_string(),
            embeds: vec![Embed {
                title: "t".to_string(),
                description: "d".to_string(),
                color: 255,
                fields: vec![EmbedField::inline("a", "1"), EmbedField::block("b", "2")],
                footer: EmbedFooter { text: "f".to_string() },
                timestamp: None,
            }],
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["content"], "hello");
        assert_eq!(json["embeds"][0]["color"], 255);
        assert_eq!(json["embeds"][0]["fields"][0]["inline"], true);
        assert_eq!(json["embeds"][0]["fields"][1]["inline"], false);
        assert_eq!(json["embeds"][0]["footer"]["text"], "f");
        // 无 timestamp 时不输出该字段
        assert!(json["embeds"][0].get("timestamp").is_none());

        assert_eq!(message.field("b"), Some("2"));
        assert_eq!(message.field("missing"), None);
    }
}
