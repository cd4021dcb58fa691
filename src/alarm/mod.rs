//! CloudWatch 告警 - 事件解析与状态分类

pub mod event;
pub mod state;

pub use event::{
    parse_alarm_message, parse_sns_event, AlarmEvent, AlarmMessage, AlarmParseError, AlarmTrigger,
    Dimension, SnsEnvelope,
};
pub use state::AlarmState;
