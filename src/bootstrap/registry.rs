use tracing::{debug, info};

use super::Ensured;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::RegistryCredentials;

/// Creates disabled, empty registry credentials if none exist.
pub fn ensure_registry_credentials<S>(store: &S) -> Result<Ensured>
where
    S: Store + ?Sized,
{
    match store.registry_credentials() {
        Ok(_) => {
            debug!("Registry credentials already present");
            Ok(Ensured::Existing)
        }
        Err(Error::NotFound) => {
            store.create_registry_credentials(&RegistryCredentials {
                authentication: false,
                username: String::new(),
                password: String::new(),
            })?;
            info!("Created default registry credentials");
            Ok(Ensured::Created)
        }
        Err(e) => Err(e),
    }
}
