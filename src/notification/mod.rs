//! 通知层 - 告警消息格式化与 webhook 发送
//!
//! # 使用示例
//! ```ignore
//! use alarm_notifier::notification::{AlarmFormatter, WebhookClient, WebhookConfig};
//!
//! let message = AlarmFormatter::new().format(&alarm);
//! let client = WebhookClient::new(WebhookConfig::default())?;
//! let status = client.send(&url, &message).await?;
//! ```

pub mod formatter;
pub mod payload;
pub mod webhook;

pub use formatter::{msg, AlarmFormatter};
pub use payload::{Embed, EmbedField, EmbedFooter, WebhookMessage};
pub use webhook::{WebhookClient, WebhookConfig, WebhookError};
