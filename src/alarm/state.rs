//! Alarm state classification
//!
//! CloudWatch reports one of three states in `NewStateValue`:
//! - ALARM: metric breached the threshold
//! - OK: metric is back within the threshold
//! - INSUFFICIENT_DATA: not enough datapoints to decide
//!
//! The state only decides the embed color; the raw string is always shown as-is.

/// Alarm state carried by a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmState {
    Alarm,
    Ok,
    InsufficientData,
    Other(String),
}

pub const COLOR_RED: u32 = 0xE7_4C_3C;
pub const COLOR_GREEN: u32 = 0x2E_CC_71;
pub const COLOR_ORANGE: u32 = 0xF3_9C_12;
pub const COLOR_GREY: u32 = 0x95_A5_A6;

impl std::fmt::Display for AlarmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AlarmState {
    /// Classify a raw state value.
    ///
    /// Matching is case-insensitive and ignores underscores, so both
    /// `INSUFFICIENT_DATA` and `InsufficientData` map to the same variant.
    pub fn parse(raw: &str) -> Self {
        match normalize_state(raw).as_str() {
            "alarm" => AlarmState::Alarm,
            "ok" => AlarmState::Ok,
            "insufficientdata" => AlarmState::InsufficientData,
            _ => AlarmState::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AlarmState::Alarm => "ALARM",
            AlarmState::Ok => "OK",
            AlarmState::InsufficientData => "INSUFFICIENT_DATA",
            AlarmState::Other(raw) => raw,
        }
    }

    /// Embed side-bar color (24-bit RGB)
    pub fn color(&self) -> u32 {
        match self {
            AlarmState::Alarm => COLOR_RED,
            AlarmState::Ok => COLOR_GREEN,
            AlarmState::InsufficientData => COLOR_ORANGE,
            AlarmState::Other(_) => COLOR_GREY,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            AlarmState::Alarm => "🚨",
            AlarmState::Ok => "✅",
            AlarmState::InsufficientData => "⚠️",
            AlarmState::Other(_) => "ℹ️",
        }
    }
}

fn normalize_state(raw: &str) -> String {
    raw.trim().to_lowercase().replace('_', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_states() {
        assert_eq!(AlarmState::parse("ALARM"), AlarmState::Alarm);
        assert_eq!(AlarmState::parse("OK"), AlarmState::Ok);
        assert_eq!(AlarmState::parse("INSUFFICIENT_DATA"), AlarmState::InsufficientData);
        assert_eq!(AlarmState::parse("insufficient_data"), AlarmState::InsufficientData);
        assert_eq!(AlarmState::parse("InsufficientData"), AlarmState::InsufficientData);
    }

    #[test]
    fn test_parse_unknown_state_keeps_raw() {
        let state = AlarmState::parse("Unknown");
        assert_eq!(state, AlarmState::Other("Unknown".to_string()));
        assert_eq!(state.to_string(), "Unknown");
        assert_eq!(state.color(), COLOR_GREY);
    }

    #[test]
    fn test_state_colors() {
        assert_eq!(AlarmState::Alarm.color(), 15158332);
        assert_eq!(AlarmState::Ok.color(), 3066993);
        assert_eq!(AlarmState::InsufficientData.color(), 15965202);
    }
}
