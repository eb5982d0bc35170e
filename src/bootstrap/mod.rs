//! First-run bootstrap of the baseline records.
//!
//! Each ensurer writes its default record only when the store has none, so
//! running the whole sequence again is always safe. The sequence stops at
//! the first error and never retries or cleans up; records written before
//! the failure stay in the store.
//!
//! Nothing here guards against two processes bootstrapping the same store
//! at once. Callers that can start concurrently must serialize externally.

mod groups;
mod identity;
mod registry;
mod roles;
mod settings;

pub use groups::{
    UNASSIGNED_GROUP_DESCRIPTION, UNASSIGNED_GROUP_NAME, default_resource_group,
    ensure_resource_groups,
};
pub use identity::ensure_instance_id;
pub use registry::ensure_registry_credentials;
pub use roles::{BUILTIN_ROLES, BuiltinRole, ensure_roles};
pub use settings::{default_settings, ensure_settings};

use tracing::info;

use crate::config::SettingsDefaults;
use crate::error::Result;
use crate::identity::{IdGenerator, RandomUuidGenerator};
use crate::store::Store;
use crate::types::{AuthorizationProvider, DefaultAuthorizations};

/// Outcome of a single ensurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// The default record was written by this run.
    Created,
    /// A record already existed and was left untouched.
    Existing,
}

impl Ensured {
    #[must_use]
    pub fn created(self) -> bool {
        self == Ensured::Created
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub instance_id: Ensured,
    pub settings: Ensured,
    pub registry_credentials: Ensured,
    pub resource_groups: Ensured,
    pub roles: Ensured,
}

impl BootstrapReport {
    /// Number of ensurers that wrote their default.
    #[must_use]
    pub fn created_count(&self) -> usize {
        [
            self.instance_id,
            self.settings,
            self.registry_credentials,
            self.resource_groups,
            self.roles,
        ]
        .into_iter()
        .filter(|e| e.created())
        .count()
    }

    #[must_use]
    pub fn is_first_run(&self) -> bool {
        self.instance_id.created()
    }
}

pub struct Bootstrapper<'a, S: ?Sized, G = RandomUuidGenerator, P = DefaultAuthorizations> {
    store: &'a S,
    defaults: SettingsDefaults,
    id_generator: G,
    authorizations: P,
}

impl<'a, S: Store + ?Sized> Bootstrapper<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            defaults: SettingsDefaults::default(),
            id_generator: RandomUuidGenerator,
            authorizations: DefaultAuthorizations,
        }
    }
}

impl<'a, S, G, P> Bootstrapper<'a, S, G, P>
where
    S: Store + ?Sized,
    G: IdGenerator,
    P: AuthorizationProvider,
{
    #[must_use]
    pub fn with_defaults(mut self, defaults: SettingsDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_id_generator<G2: IdGenerator>(self, id_generator: G2) -> Bootstrapper<'a, S, G2, P> {
        Bootstrapper {
            store: self.store,
            defaults: self.defaults,
            id_generator,
            authorizations: self.authorizations,
        }
    }

    #[must_use]
    pub fn with_authorizations<P2: AuthorizationProvider>(
        self,
        authorizations: P2,
    ) -> Bootstrapper<'a, S, G, P2> {
        Bootstrapper {
            store: self.store,
            defaults: self.defaults,
            id_generator: self.id_generator,
            authorizations,
        }
    }

    /// Runs every ensurer in order, returning the first error encountered.
    pub fn run(&self) -> Result<BootstrapReport> {
        let instance_id = ensure_instance_id(self.store, &self.id_generator)?;
        let settings = ensure_settings(self.store, self.defaults.clone())?;
        let registry_credentials = ensure_registry_credentials(self.store)?;
        let resource_groups = ensure_resource_groups(self.store)?;
        let roles = ensure_roles(self.store, &self.authorizations)?;

        let report = BootstrapReport {
            instance_id,
            settings,
            registry_credentials,
            resource_groups,
            roles,
        };
        info!(created = report.created_count(), "Bootstrap complete");
        Ok(report)
    }
}

/// Bootstraps `store` with the stock generator and permission sets.
pub fn bootstrap<S: Store + ?Sized>(store: &S, defaults: SettingsDefaults) -> Result<BootstrapReport> {
    Bootstrapper::new(store).with_defaults(defaults).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::SqliteStore;
    use crate::types::{AuthenticationMethod, Authorizations, RoleArchetype};

    struct FixedId(&'static str);

    impl IdGenerator for FixedId {
        fn generate(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Exhausted;

    impl IdGenerator for Exhausted {
        fn generate(&self) -> Result<String> {
            Err(Error::IdGeneration("entropy unavailable".to_string()))
        }
    }

    struct SingleFlag;

    impl AuthorizationProvider for SingleFlag {
        fn authorizations_for(&self, archetype: RoleArchetype) -> Authorizations {
            match archetype {
                RoleArchetype::Administrator => Authorizations::HOST_MANAGE,
                _ => Authorizations::CONTAINER_LIST,
            }
        }
    }

    fn empty_store() -> SqliteStore {
        let store = SqliteStore::in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn test_first_run_creates_everything() {
        let store = empty_store();
        let report = Bootstrapper::new(&store).run().unwrap();

        assert_eq!(report.created_count(), 5);
        assert!(report.is_first_run());
        assert_eq!(
            store.settings().unwrap().authentication_method,
            AuthenticationMethod::Internal
        );
        assert_eq!(store.resource_groups().unwrap().len(), 1);
        assert_eq!(store.roles().unwrap().len(), 4);
    }

    #[test]
    fn test_second_run_creates_nothing() {
        let store = empty_store();
        Bootstrapper::new(&store).run().unwrap();
        let report = Bootstrapper::new(&store).run().unwrap();

        assert_eq!(report.created_count(), 0);
        assert!(!report.is_first_run());
    }

    #[test]
    fn test_uses_injected_generator() {
        let store = empty_store();
        Bootstrapper::new(&store)
            .with_id_generator(FixedId("11111111-2222-4333-8444-555555555555"))
            .run()
            .unwrap();

        assert_eq!(
            store.instance_id().unwrap(),
            "11111111-2222-4333-8444-555555555555"
        );
    }

    #[test]
    fn test_generation_failure_writes_nothing() {
        let store = empty_store();
        let result = Bootstrapper::new(&store).with_id_generator(Exhausted).run();

        assert!(matches!(result, Err(Error::IdGeneration(_))));
        assert!(matches!(store.instance_id(), Err(Error::NotFound)));
        assert!(matches!(store.settings(), Err(Error::NotFound)));
        assert!(store.roles().unwrap().is_empty());
    }

    #[test]
    fn test_uses_injected_authorizations() {
        let store = empty_store();
        Bootstrapper::new(&store)
            .with_authorizations(SingleFlag)
            .run()
            .unwrap();

        let roles = store.roles().unwrap();
        assert_eq!(roles[0].authorizations, Authorizations::HOST_MANAGE);
        assert_eq!(roles[3].authorizations, Authorizations::CONTAINER_LIST);
    }
}
