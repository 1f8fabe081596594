//! Health snapshot reported by the backend's `/healthz` endpoint.

use serde::{Deserialize, Serialize};

/// One `/healthz` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub ok: bool,
    pub database_status: String,
    /// Backend uptime in seconds.
    pub uptime: f64,
    pub version: String,
    pub environment: String,
}

impl HealthSnapshot {
    /// Returns true if the backend reports a live database connection.
    pub fn database_connected(&self) -> bool {
        self.database_status == "connected"
    }

    /// Human-readable uptime, see [`format_uptime`].
    pub fn uptime_display(&self) -> String {
        format_uptime(self.uptime)
    }
}

/// Renders an uptime in seconds as `"2 days, 1 hour, 5 minutes, 1 second"`.
///
/// Zero-valued units are omitted. Negative or non-finite input renders as
/// `"N/A"`.
pub fn format_uptime(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "N/A".to_string();
    }

    let total = seconds.floor() as u64;
    let units = [
        (total / 86_400, "day"),
        ((total % 86_400) / 3_600, "hour"),
        ((total % 3_600) / 60, "minute"),
        (total % 60, "second"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| {
            if *value == 1 {
                format!("{value} {unit}")
            } else {
                format!("{value} {unit}s")
            }
        })
        .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}
