mod app;
mod defaults;

pub use app::{AppConfig, DEFAULT_DATA_DIR};
pub use defaults::{
    DEFAULT_EDGE_AGENT_CHECKIN_INTERVAL, DEFAULT_TEMPLATES_URL, DEFAULT_USER_SESSION_TIMEOUT,
    SettingsDefaults,
};
