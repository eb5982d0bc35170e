use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Authorizations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationMethod {
    /// Users authenticate against credentials held by the control plane.
    #[default]
    Internal,
    Ldap,
    OAuth,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TlsConfiguration {
    pub tls: bool,
    pub tls_skip_verify: bool,
    pub tls_ca_cert_path: String,
    pub tls_cert_path: String,
    pub tls_key_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LdapSearchSettings {
    pub base_dn: String,
    pub filter: String,
    pub user_name_attribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LdapGroupSearchSettings {
    pub group_base_dn: String,
    pub group_filter: String,
    pub group_attribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LdapSettings {
    pub anonymous_mode: bool,
    pub reader_dn: String,
    pub password: String,
    pub urls: Vec<String>,
    pub tls_config: TlsConfiguration,
    pub start_tls: bool,
    pub search_settings: Vec<LdapSearchSettings>,
    pub group_search_settings: Vec<LdapGroupSearchSettings>,
    pub auto_create_users: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub access_token_uri: String,
    pub authorization_uri: String,
    pub resource_uri: String,
    pub redirect_uri: String,
    pub user_identifier: String,
    pub scopes: String,
    pub oauth_auto_create_users: bool,
    pub default_team_id: i64,
    pub sso: bool,
    pub logout_uri: String,
}

/// Global runtime configuration. Exactly one record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub authentication_method: AuthenticationMethod,
    pub black_listed_labels: Vec<Pair>,
    pub ldap_settings: LdapSettings,
    pub oauth_settings: OAuthSettings,
    pub edge_agent_checkin_interval: u32,
    pub templates_url: String,
    pub user_session_timeout: String,
}

/// Default credentials for the external image registry. Exactly one record exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryCredentials {
    pub authentication: bool,
    pub username: String,
    pub password: String,
}

/// Access granted to a user or team on a resource group, by role id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub role_id: i64,
}

pub type UserAccessPolicies = BTreeMap<i64, AccessPolicy>;
pub type TeamAccessPolicies = BTreeMap<i64, AccessPolicy>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Assigned by the store on create; zero until then.
    pub id: i64,
    pub name: String,
    pub description: String,
    pub labels: Vec<Pair>,
    pub user_access_policies: UserAccessPolicies,
    pub team_access_policies: TeamAccessPolicies,
    pub tag_ids: Vec<i64>,
}

impl ResourceGroup {
    /// A group with no labels, tags or access policies.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            labels: Vec::new(),
            user_access_policies: UserAccessPolicies::new(),
            team_access_policies: TeamAccessPolicies::new(),
            tag_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Assigned by the store on create; zero until then.
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Lower values take precedence.
    pub priority: i32,
    pub authorizations: Authorizations,
}
