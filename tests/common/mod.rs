use std::sync::atomic::{AtomicUsize, Ordering};

use berth::error::{Error, Result};
use berth::store::{SqliteStore, Store};
use berth::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    InstanceId,
    StoreInstanceId,
    Settings,
    CreateSettings,
    RegistryCredentials,
    CreateRegistryCredentials,
    ResourceGroups,
    CreateResourceGroup,
    Roles,
    CreateRole,
}

pub fn injected(op: Op) -> Error {
    Error::Io(std::io::Error::other(format!("injected failure: {op:?}")))
}

/// Wraps a real store, counts writes, and fails one chosen operation.
pub struct FaultyStore {
    pub inner: SqliteStore,
    fault: Option<Op>,
    /// For `Op::CreateRole`, how many roles succeed before the failure.
    roles_before_fault: usize,
    creates: AtomicUsize,
    role_creates: AtomicUsize,
}

impl FaultyStore {
    pub fn new() -> Self {
        let inner = SqliteStore::in_memory().expect("open store");
        inner.initialize().expect("initialize store");
        Self {
            inner,
            fault: None,
            roles_before_fault: 0,
            creates: AtomicUsize::new(0),
            role_creates: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.fault = Some(op);
        self
    }

    pub fn failing_role_after(mut self, successes: usize) -> Self {
        self.fault = Some(Op::CreateRole);
        self.roles_before_fault = successes;
        self
    }

    pub fn heal(&mut self) {
        self.fault = None;
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    fn check(&self, op: Op) -> Result<()> {
        if self.fault == Some(op) {
            return Err(injected(op));
        }
        Ok(())
    }

    fn record_create(&self) {
        self.creates.fetch_add(1, Ordering::SeqCst);
    }
}

impl Store for FaultyStore {
    fn initialize(&self) -> Result<()> {
        self.inner.initialize()
    }

    fn instance_id(&self) -> Result<String> {
        self.check(Op::InstanceId)?;
        self.inner.instance_id()
    }

    fn store_instance_id(&self, id: &str) -> Result<()> {
        self.check(Op::StoreInstanceId)?;
        self.record_create();
        self.inner.store_instance_id(id)
    }

    fn settings(&self) -> Result<Settings> {
        self.check(Op::Settings)?;
        self.inner.settings()
    }

    fn create_settings(&self, settings: &Settings) -> Result<()> {
        self.check(Op::CreateSettings)?;
        self.record_create();
        self.inner.create_settings(settings)
    }

    fn update_settings(&self, settings: &Settings) -> Result<()> {
        self.inner.update_settings(settings)
    }

    fn registry_credentials(&self) -> Result<RegistryCredentials> {
        self.check(Op::RegistryCredentials)?;
        self.inner.registry_credentials()
    }

    fn create_registry_credentials(&self, credentials: &RegistryCredentials) -> Result<()> {
        self.check(Op::CreateRegistryCredentials)?;
        self.record_create();
        self.inner.create_registry_credentials(credentials)
    }

    fn update_registry_credentials(&self, credentials: &RegistryCredentials) -> Result<()> {
        self.inner.update_registry_credentials(credentials)
    }

    fn resource_groups(&self) -> Result<Vec<ResourceGroup>> {
        self.check(Op::ResourceGroups)?;
        self.inner.resource_groups()
    }

    fn resource_group(&self, id: i64) -> Result<ResourceGroup> {
        self.inner.resource_group(id)
    }

    fn create_resource_group(&self, group: &ResourceGroup) -> Result<i64> {
        self.check(Op::CreateResourceGroup)?;
        self.record_create();
        self.inner.create_resource_group(group)
    }

    fn roles(&self) -> Result<Vec<Role>> {
        self.check(Op::Roles)?;
        self.inner.roles()
    }

    fn role(&self, id: i64) -> Result<Role> {
        self.inner.role(id)
    }

    fn create_role(&self, role: &Role) -> Result<i64> {
        if self.fault == Some(Op::CreateRole) {
            let attempt = self.role_creates.fetch_add(1, Ordering::SeqCst);
            if attempt >= self.roles_before_fault {
                return Err(injected(Op::CreateRole));
            }
        }
        self.record_create();
        self.inner.create_role(role)
    }
}
