mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the persisted record interface.
///
/// Singleton getters return `Err(Error::NotFound)` when the record has never
/// been written. Any other error is a storage failure.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Instance identity (singleton)
    fn instance_id(&self) -> Result<String>;
    fn store_instance_id(&self, id: &str) -> Result<()>;

    // Settings (singleton)
    fn settings(&self) -> Result<Settings>;
    fn create_settings(&self, settings: &Settings) -> Result<()>;
    fn update_settings(&self, settings: &Settings) -> Result<()>;

    // Registry credentials (singleton)
    fn registry_credentials(&self) -> Result<RegistryCredentials>;
    fn create_registry_credentials(&self, credentials: &RegistryCredentials) -> Result<()>;
    fn update_registry_credentials(&self, credentials: &RegistryCredentials) -> Result<()>;

    // Resource group operations. Create returns the assigned id.
    fn resource_groups(&self) -> Result<Vec<ResourceGroup>>;
    fn resource_group(&self, id: i64) -> Result<ResourceGroup>;
    fn create_resource_group(&self, group: &ResourceGroup) -> Result<i64>;

    // Role operations. Create returns the assigned id.
    fn roles(&self) -> Result<Vec<Role>>;
    fn role(&self, id: i64) -> Result<Role>;
    fn create_role(&self, role: &Role) -> Result<i64>;
}
