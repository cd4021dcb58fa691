//! 告警事件解析 - SNS envelope → AlarmEvent
//!
//! Lambda 收到的事件结构：
//! ```json
//! {
//!   "Records": [
//!     { "Sns": { "Message": "{\"AlarmName\":\"cpu-high\", ...}" } }
//!   ]
//! }
//! ```
//! `Message` 本身是一个 JSON 字符串，需要二次解析。

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::state::AlarmState;

pub const UNKNOWN: &str = "Unknown";
pub const NO_REASON: &str = "No reason provided";

/// 解析失败（不会被 handler 捕获，直接让本次调用失败）
#[derive(Debug, Error)]
pub enum AlarmParseError {
    #[error("invalid SNS envelope: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("SNS envelope contains no records")]
    NoRecords,
    #[error("SNS message is not valid alarm JSON: {0}")]
    Message(#[source] serde_json::Error),
}

/// SNS 投递的外层 envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsNotification {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
}

/// CloudWatch 告警消息（`Message` 字段解析后的内容）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmMessage {
    #[serde(default)]
    pub alarm_name: Option<String>,
    #[serde(default)]
    pub new_state_value: Option<String>,
    #[serde(default)]
    pub new_state_reason: Option<String>,
    #[serde(default)]
    pub state_change_time: Option<String>,
    #[serde(default)]
    pub trigger: Option<AlarmTrigger>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmTrigger {
    #[serde(default)]
    pub metric_name: Option<String>,
    /// 可能是数字也可能是字符串
    #[serde(default)]
    pub threshold: Option<Value>,
    #[serde(default)]
    pub dimensions: Option<Vec<Dimension>>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// 单次调用内使用的告警数据，所有字段已填充默认值
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmEvent {
    pub alarm_name: String,
    pub state: String,
    pub reason: String,
    pub timestamp: String,
    pub metric_name: String,
    pub threshold: String,
    pub instance_id: String,
    pub region: String,
}

impl AlarmEvent {
    /// 从告警消息构建，缺失字段使用默认值
    ///
    /// 缺少 StateChangeTime 时使用当前 UTC 时间。
    pub fn from_message(message: &AlarmMessage, default_region: &str) -> Self {
        let trigger = message.trigger.clone().unwrap_or_default();

        let instance_id = trigger
            .dimensions
            .as_ref()
            .and_then(|dims| dims.first())
            .and_then(|d| d.value.as_ref())
            .and_then(value_to_string)
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            alarm_name: or_unknown(&message.alarm_name),
            state: or_unknown(&message.new_state_value),
            reason: message
                .new_state_reason
                .clone()
                .unwrap_or_else(|| NO_REASON.to_string()),
            timestamp: message
                .state_change_time
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            metric_name: or_unknown(&trigger.metric_name),
            threshold: trigger
                .threshold
                .as_ref()
                .and_then(value_to_string)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            instance_id,
            region: trigger
                .region
                .unwrap_or_else(|| default_region.to_string()),
        }
    }

    pub fn alarm_state(&self) -> AlarmState {
        AlarmState::parse(&self.state)
    }

    /// 阈值展示：总是加 `%` 后缀（缺失时为 "Unknown%"）
    pub fn threshold_display(&self) -> String {
        format!("{}%", self.threshold)
    }

    /// EC2 控制台实例详情链接
    pub fn console_url(&self) -> String {
        format!(
            "https://console.aws.amazon.com/ec2/v2/home?region={region}#InstanceDetails:instanceId={id}",
            region = self.region,
            id = self.instance_id,
        )
    }
}

/// 解析 Lambda 收到的 SNS 事件，取第一条记录
pub fn parse_sns_event(event: Value, default_region: &str) -> Result<AlarmEvent, AlarmParseError> {
    let envelope: SnsEnvelope = serde_json::from_value(event).map_err(AlarmParseError::Envelope)?;
    let record = envelope.records.first().ok_or(AlarmParseError::NoRecords)?;
    let message = parse_alarm_message(&record.sns.message)?;
    Ok(AlarmEvent::from_message(&message, default_region))
}

/// 解析 `Sns.Message` 中嵌套的 JSON 字符串
pub fn parse_alarm_message(raw: &str) -> Result<AlarmMessage, AlarmParseError> {
    serde_json::from_str(raw).map_err(AlarmParseError::Message)
}

fn or_unknown(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| UNKNOWN.to_string())
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sns_event(message: &str) -> Value {
        json!({
            "Records": [
                { "EventSource": "aws:sns", "Sns": { "Subject": "ALARM", "Message": message } }
            ]
        })
    }

    fn full_message() -> String {
        json!({
            "AlarmName": "cpu-high",
            "NewStateValue": "ALARM",
            "NewStateReason": "Threshold Crossed: 1 datapoint [91.2] was greater than the threshold (80.0).",
            "StateChangeTime": "2024-05-01T10:15:30.123+0000",
            "Trigger": {
                "MetricName": "CPUUtilization",
                "Threshold": 80.0,
                "Dimensions": [{ "name": "InstanceId", "value": "i-0abc123def456" }],
                "Region": "us-east-1"
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_full_event() {
        let event = parse_sns_event(sns_event(&full_message()), "eu-west-3").unwrap();
        assert_eq!(event.alarm_name, "cpu-high");
        assert_eq!(event.state, "ALARM");
        assert_eq!(event.alarm_state(), AlarmState::Alarm);
        assert_eq!(event.metric_name, "CPUUtilization");
        assert_eq!(event.threshold, "80.0");
        assert_eq!(event.threshold_display(), "80.0%");
        assert_eq!(event.instance_id, "i-0abc123def456");
        assert_eq!(event.region, "us-east-1");
        assert_eq!(event.timestamp, "2024-05-01T10:15:30.123+0000");
        assert_eq!(
            event.console_url(),
            "https://console.aws.amazon.com/ec2/v2/home?region=us-east-1#InstanceDetails:instanceId=i-0abc123def456"
        );
    }

    #[test]
    fn test_string_threshold_kept_verbatim() {
        let msg = json!({ "Trigger": { "Threshold": "75" } }).to_string();
        let event = parse_sns_event(sns_event(&msg), "eu-west-3").unwrap();
        assert_eq!(event.threshold_display(), "75%");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let event = parse_sns_event(sns_event("{}"), "eu-west-3").unwrap();
        assert_eq!(event.alarm_name, UNKNOWN);
        assert_eq!(event.state, UNKNOWN);
        assert_eq!(event.reason, NO_REASON);
        assert!(chrono::DateTime::parse_from_rfc3339(&event.timestamp).is_ok());
        assert_eq!(event.metric_name, UNKNOWN);
        assert_eq!(event.threshold, UNKNOWN);
        assert_eq!(event.threshold_display(), "Unknown%");
        assert_eq!(event.instance_id, UNKNOWN);
        assert_eq!(event.region, "eu-west-3");
    }

    #[test]
    fn test_missing_dimensions_defaults_instance() {
        let msg = json!({
            "AlarmName": "disk-full",
            "Trigger": { "MetricName": "DiskSpaceUtilization", "Threshold": 90 }
        })
        .to_string();
        let event = parse_sns_event(sns_event(&msg), "eu-west-3").unwrap();
        assert_eq!(event.instance_id, "Unknown");
        assert!(event
            .console_url()
            .starts_with("https://console.aws.amazon.com/ec2/v2/home?region=eu-west-3#"));
        assert!(event.console_url().ends_with("instanceId=Unknown"));
    }

    #[test]
    fn test_empty_dimensions_defaults_instance() {
        let msg = json!({ "Trigger": { "Dimensions": [] } }).to_string();
        let event = parse_sns_event(sns_event(&msg), "eu-west-3").unwrap();
        assert_eq!(event.instance_id, UNKNOWN);
    }

    #[test]
    fn test_malformed_message_is_error() {
        let err = parse_sns_event(sns_event("not json {"), "eu-west-3").unwrap_err();
        assert!(matches!(err, AlarmParseError::Message(_)));
    }

    #[test]
    fn test_no_records_is_error() {
        let err = parse_sns_event(json!({ "Records": [] }), "eu-west-3").unwrap_err();
        assert!(matches!(err, AlarmParseError::NoRecords));

        let err = parse_sns_event(json!({}), "eu-west-3").unwrap_err();
        assert!(matches!(err, AlarmParseError::NoRecords));
    }

    #[test]
    fn test_record_without_message_is_error() {
        let err = parse_sns_event(json!({ "Records": [{ "Sns": {} }] }), "eu-west-3").unwrap_err();
        assert!(matches!(err, AlarmParseError::Envelope(_)));
    }
}
