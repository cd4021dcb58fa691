//! Alarm Notifier handler - 一次调用的完整流程
//!
//! 解析事件 → 格式化 → 读取 secret → POST webhook → 返回结果。
//! 解析失败直接返回 Err（调用失败）；secret 或发送失败返回 500 响应。

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::alarm::{parse_sns_event, AlarmEvent, AlarmParseError};
use crate::config::{NotifierConfig, ENV_SECRET_NAME};
use crate::notification::webhook::{WebhookClient, WebhookError};
use crate::notification::{AlarmFormatter, WebhookMessage};
use crate::secrets::{fetch_webhook_url, SecretError, SecretStore};

pub const MSG_SUCCESS: &str = "Notification sent successfully";
pub const MSG_FAILURE: &str = "Error sending notification";

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error(transparent)]
    Parse(#[from] AlarmParseError),
    #[error(transparent)]
    Secret(#[from] SecretError),
    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

/// Lambda 返回值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON 字符串
    pub body: String,
}

impl HandlerResponse {
    pub fn success(webhook_status: u16) -> Self {
        Self {
            status_code: 200,
            body: json!({ "message": MSG_SUCCESS, "discord_status": webhook_status }).to_string(),
        }
    }

    pub fn failure(err: &NotifierError) -> Self {
        Self {
            status_code: 500,
            body: json!({ "message": MSG_FAILURE, "error": err.to_string() }).to_string(),
        }
    }

    /// 解析 body 为 JSON
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// 告警通知处理器（冷启动时创建一次）
#[derive(Clone)]
pub struct AlarmNotifier {
    config: NotifierConfig,
    secrets: Arc<dyn SecretStore>,
    webhook: WebhookClient,
    formatter: AlarmFormatter,
}

impl AlarmNotifier {
    pub fn new(config: NotifierConfig, secrets: Arc<dyn SecretStore>, webhook: WebhookClient) -> Self {
        Self {
            config,
            secrets,
            webhook,
            formatter: AlarmFormatter::new(),
        }
    }

    pub fn with_formatter(mut self, formatter: AlarmFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// 处理一次调用
    pub async fn handle(&self, event: Value) -> Result<HandlerResponse, NotifierError> {
        debug!(event = %event, "Event received");
        let alarm = parse_sns_event(event, &self.config.default_region)?;
        info!(
            alarm_name = %alarm.alarm_name,
            state = %alarm.state,
            instance_id = %alarm.instance_id,
            "Received alarm notification"
        );

        let message = self.formatter.format(&alarm);

        match self.deliver(&message).await {
            Ok(status) => {
                info!(alarm_name = %alarm.alarm_name, status, "Notification delivered");
                Ok(HandlerResponse::success(status))
            }
            Err(e) => {
                log_failure(&alarm, &e);
                Ok(HandlerResponse::failure(&e))
            }
        }
    }

    async fn deliver(&self, message: &WebhookMessage) -> Result<u16, NotifierError> {
        let secret_name = self
            .config
            .secret_name
            .as_deref()
            .ok_or(SecretError::NotConfigured(ENV_SECRET_NAME))?;
        let url =
            fetch_webhook_url(self.secrets.as_ref(), secret_name, &self.config.secret_key).await?;

        Ok(self.webhook.send(&url, message).await?)
    }
}

fn log_failure(alarm: &AlarmEvent, err: &NotifierError) {
    error!(alarm_name = %alarm.alarm_name, error = %err, "Error sending notification");
}
