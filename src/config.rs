//! 运行配置 - 从环境变量加载
//!
//! Lambda 冷启动时读取一次，之后所有调用共享。
//! secret 名称缺失不会阻止启动：每次调用在读取 secret 时才报错（返回 500）。

/// Secret 名称的环境变量
pub const ENV_SECRET_NAME: &str = "DISCORD_WEBHOOK_SECRET_NAME";
/// Secret JSON 中 webhook URL 所在 key 的环境变量
pub const ENV_SECRET_KEY: &str = "WEBHOOK_SECRET_KEY";
/// 告警缺少 Region 时使用的默认值的环境变量
pub const ENV_DEFAULT_REGION: &str = "DEFAULT_ALARM_REGION";

pub const DEFAULT_SECRET_KEY: &str = "DISCORD_WEBHOOK_URL";
pub const DEFAULT_REGION: &str = "eu-west-3";

/// Notifier 配置
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    /// Secrets Manager 中的 secret 名称
    pub secret_name: Option<String>,
    /// secret JSON 中保存 webhook URL 的 key
    pub secret_key: String,
    /// 默认 region
    pub default_region: String,
}

impl NotifierConfig {
    pub fn new(secret_name: impl Into<String>) -> Self {
        Self {
            secret_name: Some(secret_name.into()),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            default_region: DEFAULT_REGION.to_string(),
        }
    }

    /// 从进程环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 lookup 函数加载（测试时避免修改进程环境）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            secret_name: non_empty(ENV_SECRET_NAME),
            secret_key: non_empty(ENV_SECRET_KEY).unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            default_region: non_empty(ENV_DEFAULT_REGION)
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }
}
