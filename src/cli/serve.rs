//! Lambda runtime 循环

use anyhow::Result;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing::{info, warn};

use super::build_notifier;
use crate::config::ENV_SECRET_NAME;

/// 冷启动创建 notifier，之后每次调用复用
pub async fn handle_serve() -> Result<()> {
    let notifier = build_notifier().await?;
    match &notifier.config().secret_name {
        Some(secret) => info!(secret = %secret, "Alarm notifier ready"),
        None => warn!(
            env = ENV_SECRET_NAME,
            "Webhook secret name not set, invocations will fail until it is configured"
        ),
    }

    let notifier = &notifier;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        info!(request_id = %event.context.request_id, "Handling invocation");
        notifier
            .handle(event.payload)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))
}
