//! CLI command handling

pub mod invoke;
pub mod output;
pub mod render;
pub mod serve;

pub use invoke::*;
pub use output::*;
pub use render::*;
pub use serve::*;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::config::NotifierConfig;
use crate::handler::AlarmNotifier;
use crate::notification::{WebhookClient, WebhookConfig};
use crate::secrets::SecretsManagerStore;

/// 从环境变量和默认 AWS 凭证创建 notifier
pub async fn build_notifier() -> Result<AlarmNotifier> {
    let config = NotifierConfig::from_env();
    let secrets = SecretsManagerStore::from_env().await;
    let webhook = WebhookClient::new(WebhookConfig::default())?;

    Ok(AlarmNotifier::new(config, Arc::new(secrets), webhook))
}

/// 读取本地 JSON 事件文件
pub fn load_event_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Event file {} is not valid JSON", path.display()))
}
