use tracing::{debug, info};

use super::Ensured;
use crate::config::SettingsDefaults;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{
    AuthenticationMethod, LdapGroupSearchSettings, LdapSearchSettings, LdapSettings,
    OAuthSettings, Settings, TlsConfiguration,
};

/// Builds the Settings record written on first run.
///
/// The LDAP block carries one empty search entry and one empty group search
/// entry so that the settings form always has a row to edit.
#[must_use]
pub fn default_settings(defaults: &SettingsDefaults) -> Settings {
    Settings {
        authentication_method: AuthenticationMethod::Internal,
        black_listed_labels: Vec::new(),
        ldap_settings: LdapSettings {
            anonymous_mode: true,
            auto_create_users: true,
            tls_config: TlsConfiguration::default(),
            urls: Vec::new(),
            search_settings: vec![LdapSearchSettings::default()],
            group_search_settings: vec![LdapGroupSearchSettings::default()],
            ..LdapSettings::default()
        },
        oauth_settings: OAuthSettings::default(),
        edge_agent_checkin_interval: defaults.edge_agent_checkin_interval,
        templates_url: defaults.templates_url.clone(),
        user_session_timeout: defaults.user_session_timeout.clone(),
    }
}

pub fn ensure_settings<S>(store: &S, defaults: SettingsDefaults) -> Result<Ensured>
where
    S: Store + ?Sized,
{
    match store.settings() {
        Ok(_) => {
            debug!("Settings already present");
            Ok(Ensured::Existing)
        }
        Err(Error::NotFound) => {
            store.create_settings(&default_settings(&defaults))?;
            info!("Created default settings");
            Ok(Ensured::Created)
        }
        Err(e) => Err(e),
    }
}
