//! Alarm Notifier - 将 CloudWatch 告警（经 SNS 投递）转发到 Discord webhook

pub mod alarm;
pub mod cli;
pub mod config;
pub mod handler;
pub mod notification;
pub mod secrets;

pub use alarm::{AlarmEvent, AlarmParseError, AlarmState};
pub use config::NotifierConfig;
pub use handler::{AlarmNotifier, HandlerResponse, NotifierError};
pub use notification::{AlarmFormatter, WebhookClient, WebhookConfig, WebhookMessage};
pub use secrets::{SecretError, SecretStore, SecretsManagerStore};
