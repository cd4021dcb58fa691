//! `invoke` 命令 - 本地执行一次完整调用
//!
//! 使用真实的 Secrets Manager 和 webhook，适合部署前验证配置。

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::{build_notifier, format_output, load_event_file};
use crate::notification::AlarmFormatter;

#[derive(Args)]
pub struct InvokeArgs {
    /// SNS 事件 JSON 文件
    pub event: PathBuf,
    /// 不在消息中 @here
    #[arg(long)]
    pub no_mention: bool,
    /// 输出紧凑 JSON
    #[arg(long)]
    pub compact: bool,
}

pub async fn handle_invoke(args: InvokeArgs) -> Result<()> {
    let event = load_event_file(&args.event)?;
    let notifier = build_notifier()
        .await?
        .with_formatter(AlarmFormatter::new().with_mention(!args.no_mention));

    info!(event_file = %args.event.display(), "Invoking handler locally");
    let response = notifier.handle(event).await?;

    println!("{}", format_output(&response, args.compact));
    Ok(())
}
