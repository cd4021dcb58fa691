//! `render` 命令 - 只格式化消息（dry-run，不读 secret、不发送）

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{format_output, load_event_file};
use crate::alarm::parse_sns_event;
use crate::config::DEFAULT_REGION;
use crate::notification::{AlarmFormatter, WebhookMessage};

#[derive(Args)]
pub struct RenderArgs {
    /// SNS 事件 JSON 文件
    pub event: PathBuf,
    /// 告警缺少 Region 时使用的默认值
    #[arg(long, default_value = DEFAULT_REGION)]
    pub default_region: String,
    /// 不在消息中 @here
    #[arg(long)]
    pub no_mention: bool,
    /// 输出紧凑 JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn handle_render(args: RenderArgs) -> Result<()> {
    let message = render_event_file(&args)?;
    println!("{}", format_output(&message, args.compact));
    Ok(())
}

pub fn render_event_file(args: &RenderArgs) -> Result<WebhookMessage> {
    let event = load_event_file(&args.event)?;
    let alarm = parse_sns_event(event, &args.default_region)?;
    Ok(AlarmFormatter::new().with_mention(!args.no_mention).format(&alarm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        let message = json!({ "AlarmName": "mem-high", "NewStateValue": "ALARM" }).to_string();
        let event = json!({ "Records": [{ "Sns": { "Message": message } }] });
        std::fs::write(&path, event.to_string()).unwrap();

        let args = RenderArgs {
            event: path,
            default_region: "ap-southeast-1".to_string(),
            no_mention: true,
            compact: true,
        };
        let rendered = render_event_file(&args).unwrap();
        assert_eq!(rendered.field("Alarm Name"), Some("mem-high"));
        assert_eq!(rendered.field("Region"), Some("ap-southeast-1"));
        assert!(!rendered.content.contains("@here"));
    }
}
