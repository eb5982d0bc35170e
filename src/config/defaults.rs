use serde::{Deserialize, Serialize};

/// Interval, in seconds, at which edge agents poll the control plane.
pub const DEFAULT_EDGE_AGENT_CHECKIN_INTERVAL: u32 = 5;
pub const DEFAULT_TEMPLATES_URL: &str =
    "https://raw.githubusercontent.com/portainer/templates/master/templates-2.0.json";
pub const DEFAULT_USER_SESSION_TIMEOUT: &str = "8h";

/// Process-wide values seeded into the first Settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDefaults {
    pub edge_agent_checkin_interval: u32,
    pub templates_url: String,
    pub user_session_timeout: String,
}

impl Default for SettingsDefaults {
    fn default() -> Self {
        Self {
            edge_agent_checkin_interval: DEFAULT_EDGE_AGENT_CHECKIN_INTERVAL,
            templates_url: DEFAULT_TEMPLATES_URL.to_string(),
            user_session_timeout: DEFAULT_USER_SESSION_TIMEOUT.to_string(),
        }
    }
}
