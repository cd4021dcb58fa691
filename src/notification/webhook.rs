//! Webhook 客户端模块
//!
//! 向聊天 webhook 发送一次 JSON POST，不重试，不校验响应内容。

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use super::payload::WebhookMessage;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("webhook request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to serialize webhook message: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Webhook 客户端配置
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    /// 超时时间（秒），None 表示使用 reqwest 默认值
    pub timeout_secs: Option<u64>,
}

/// Webhook 客户端（冷启动时创建，连接池跨调用复用）
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    /// 创建新的 Webhook 客户端
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(WebhookError::Client)?;

        Ok(Self { client })
    }

    /// 发送消息，返回 webhook 的 HTTP 状态码
    ///
    /// 非 2xx 状态码不视为错误，只有网络/传输层失败才返回 Err。
    /// 错误中不包含 URL（Discord webhook URL 自带 token）。
    pub async fn send(&self, url: &str, message: &WebhookMessage) -> Result<u16, WebhookError> {
        let body = serde_json::to_vec(message)?;
        debug!(bytes = body.len(), "Posting webhook message");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| WebhookError::Request(e.without_url()))?;

        let status = response.status().as_u16();
        info!(status, "Webhook responded");

        Ok(status)
    }
}
