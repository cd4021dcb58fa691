//! 消息格式化模块 - 将告警事件转换为 webhook 消息
//!
//! 输出固定结构：
//! - content：提醒值班人员确认
//! - embed：标题、状态描述、颜色、字段列表、footer
//!
//! 相同的 AlarmEvent 总是生成相同的消息（无当前时间等外部输入）。

use chrono::DateTime;

use super::payload::{Embed, EmbedField, EmbedFooter, WebhookMessage};
use crate::alarm::AlarmEvent;

/// 消息文案常量
pub mod msg {
    pub const ACK_BANNER: &str =
        "@here ⚠️ **Action required:** please acknowledge this alarm and investigate.";
    pub const TITLE_PREFIX: &str = "CloudWatch Alarm";
    pub const FOOTER: &str = "AWS CloudWatch • Alarm Notifier";

    // Field labels
    pub const ALARM_NAME: &str = "Alarm Name";
    pub const STATE: &str = "State";
    pub const METRIC: &str = "Metric";
    pub const THRESHOLD: &str = "Threshold";
    pub const INSTANCE: &str = "Instance";
    pub const REGION: &str = "Region";
    pub const REASON: &str = "Reason";
    pub const TIME: &str = "Time";
}

/// CloudWatch 的 StateChangeTime 格式，如 `2024-05-01T10:15:30.123+0000`
const CLOUDWATCH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// 告警消息格式化器
#[derive(Debug, Clone)]
pub struct AlarmFormatter {
    mention: bool,
}

impl AlarmFormatter {
    pub fn new() -> Self {
        Self { mention: true }
    }

    /// 是否在 content 中带 `@here`
    pub fn with_mention(mut self, mention: bool) -> Self {
        self.mention = mention;
        self
    }

    pub fn format(&self, event: &AlarmEvent) -> WebhookMessage {
        let state = event.alarm_state();

        let embed = Embed {
            title: format!("{} {}: {}", state.emoji(), msg::TITLE_PREFIX, event.alarm_name),
            description: format!(
                "Alarm **{}** changed state to **{}**",
                event.alarm_name, event.state
            ),
            color: state.color(),
            fields: Self::format_fields(event),
            footer: EmbedFooter {
                text: msg::FOOTER.to_string(),
            },
            timestamp: parse_state_change_time(&event.timestamp),
        };

        WebhookMessage {
            content: self.banner(),
            embeds: vec![embed],
        }
    }

    fn banner(&self) -> String {
        if self.mention {
            msg::ACK_BANNER.to_string()
        } else {
            msg::ACK_BANNER.trim_start_matches("@here ").to_string()
        }
    }

    fn format_fields(event: &AlarmEvent) -> Vec<EmbedField> {
        vec![
            EmbedField::inline(msg::ALARM_NAME, &event.alarm_name),
            EmbedField::inline(msg::STATE, &event.state),
            EmbedField::inline(msg::METRIC, &event.metric_name),
            EmbedField::inline(msg::THRESHOLD, event.threshold_display()),
            EmbedField::inline(
                msg::INSTANCE,
                format!("[{}]({})", event.instance_id, event.console_url()),
            ),
            EmbedField::inline(msg::REGION, &event.region),
            EmbedField::block(msg::REASON, &event.reason),
            EmbedField::block(msg::TIME, &event.timestamp),
        ]
    }
}

impl Default for AlarmFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析成功时返回 RFC 3339 时间，供 embed 的 timestamp 使用
fn parse_state_change_time(raw: &str) -> Option<String> {
    DateTime::parse_from_str(raw, CLOUDWATCH_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|t| t.to_rfc3339())
}
