use tracing::{debug, info};

use super::Ensured;
use crate::error::{Error, Result};
use crate::identity::IdGenerator;
use crate::store::Store;

/// Creates the instance identifier if none has ever been stored.
pub fn ensure_instance_id<S, G>(store: &S, generator: &G) -> Result<Ensured>
where
    S: Store + ?Sized,
    G: IdGenerator + ?Sized,
{
    match store.instance_id() {
        Ok(_) => {
            debug!("Instance identifier already present");
            Ok(Ensured::Existing)
        }
        Err(Error::NotFound) => {
            let id = generator.generate()?;
            store.store_instance_id(&id)?;
            info!(instance_id = %id, "Created instance identifier");
            Ok(Ensured::Created)
        }
        Err(e) => Err(e),
    }
}
