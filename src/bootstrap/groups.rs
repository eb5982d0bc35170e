use tracing::{debug, info};

use super::Ensured;
use crate::error::Result;
use crate::store::Store;
use crate::types::ResourceGroup;

pub const UNASSIGNED_GROUP_NAME: &str = "Unassigned";
pub const UNASSIGNED_GROUP_DESCRIPTION: &str = "Unassigned endpoints";

#[must_use]
pub fn default_resource_group() -> ResourceGroup {
    ResourceGroup::new(UNASSIGNED_GROUP_NAME, UNASSIGNED_GROUP_DESCRIPTION)
}

/// Seeds the "Unassigned" group when the collection is empty. Any existing
/// group, default or not, leaves the store untouched.
pub fn ensure_resource_groups<S>(store: &S) -> Result<Ensured>
where
    S: Store + ?Sized,
{
    let groups = store.resource_groups()?;
    if !groups.is_empty() {
        debug!(count = groups.len(), "Resource groups already present");
        return Ok(Ensured::Existing);
    }

    let id = store.create_resource_group(&default_resource_group())?;
    info!(group_id = id, "Created default resource group");
    Ok(Ensured::Created)
}
