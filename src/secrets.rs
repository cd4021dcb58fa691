//! Secret 读取 - 从 AWS Secrets Manager 获取 webhook URL
//!
//! Secret 内容是一个 JSON 对象，例如：
//! ```json
//! { "DISCORD_WEBHOOK_URL": "https://discord.com/api/webhooks/..." }
//! ```
//! 每次调用都重新读取，不做缓存。

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("environment variable {0} is not set")]
    NotConfigured(&'static str),
    #[error("failed to fetch secret {name}: {message}")]
    Unavailable { name: String, message: String },
    #[error("secret {0} has no string value")]
    Empty(String),
    #[error("secret {name} is not valid JSON: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("secret {name} has no string key {key}")]
    MissingKey { name: String, key: String },
}

/// Secret 存储抽象（便于测试时替换）
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// 按名称读取 secret 的字符串值
    async fn get_secret_string(&self, name: &str) -> Result<String, SecretError>;
}

/// AWS Secrets Manager 实现
#[derive(Debug, Clone)]
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    pub fn new(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }

    /// 使用默认凭证链和 region 创建
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_secretsmanager::Client::new(&config))
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn get_secret_string(&self, name: &str) -> Result<String, SecretError> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| SecretError::Unavailable {
                name: name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| SecretError::Empty(name.to_string()))
    }
}

/// 读取 secret 并取出 webhook URL
///
/// 失败时记录错误日志后返回，由调用方决定如何处理。
pub async fn fetch_webhook_url(
    store: &dyn SecretStore,
    name: &str,
    key: &str,
) -> Result<String, SecretError> {
    let result = async {
        let raw = store.get_secret_string(name).await?;
        extract_key(name, &raw, key)
    }
    .await;

    match &result {
        Ok(_) => debug!(secret = name, "Webhook secret retrieved"),
        Err(e) => error!(secret = name, error = %e, "Error retrieving webhook secret"),
    }

    result
}

fn extract_key(name: &str, raw: &str, key: &str) -> Result<String, SecretError> {
    let json: Value = serde_json::from_str(raw).map_err(|source| SecretError::Malformed {
        name: name.to_string(),
        source,
    })?;

    json.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| SecretError::MissingKey {
            name: name.to_string(),
            key: key.to_string(),
        })
}
