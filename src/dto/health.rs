use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simple health response returned by the `/api/health` route.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status (always "healthy" while the process is serving).
    pub status: String,
    /// Seconds since the process started.
    pub uptime: f64,
    /// Current server time, epoch milliseconds.
    pub timestamp: i64,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn healthy(uptime: f64, timestamp: i64) -> Self {
        Self {
            status: "healthy".to_string(),
            uptime,
            timestamp,
        }
    }
}
