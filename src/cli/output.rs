//! Output formatting for CLI commands

use serde::Serialize;

/// Pretty JSON, or compact when `compact` is set
pub fn format_output<T: Serialize>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|_| "{}".to_string())
}
