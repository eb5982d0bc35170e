use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Builder;

use crate::error::{Error, Result};

/// Source of fresh instance identifiers.
pub trait IdGenerator {
    fn generate(&self) -> Result<String>;
}

/// Generates version-4 UUIDs from the operating system's RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuidGenerator;

impl IdGenerator for RandomUuidGenerator {
    fn generate(&self) -> Result<String> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Error::IdGeneration(e.to_string()))?;
        Ok(Builder::from_random_bytes(bytes).into_uuid().to_string())
    }
}
