//! Alarm Notifier CLI
//!
//! 默认作为 Lambda 运行；本地调试时可用 `invoke` / `render`

use alarm_notifier::cli::{handle_invoke, handle_render, handle_serve, InvokeArgs, RenderArgs};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "alarm-notifier")]
#[command(about = "Forward CloudWatch alarm notifications to a Discord webhook")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 Lambda runtime（默认）
    Serve,
    /// 本地执行一次完整调用（读取 secret 并发送）
    Invoke(InvokeArgs),
    /// 只输出格式化后的 webhook 消息，不发送
    Render(RenderArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug alarm-notifier invoke event.json
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("alarm_notifier=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => handle_serve().await?,
        Commands::Invoke(args) => handle_invoke(args).await?,
        Commands::Render(args) => handle_render(args)?,
    }

    Ok(())
}
