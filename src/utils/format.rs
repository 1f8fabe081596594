//! Display formatting for nullable backend timestamps.

use chrono::{DateTime, Utc};

/// Formats a timestamp as `2024-01-15 10:30:00 UTC`, or `N/A` when absent.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "N/A".to_string(),
    }
}
