//! # Berth
//!
//! Guarantees that a control plane's configuration store holds its baseline
//! records before anything else touches it: an instance identifier, global
//! settings, registry credentials, a default resource group and the
//! built-in roles. Records that already exist are never overwritten.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use berth::bootstrap::Bootstrapper;
//! use berth::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/berth.db")?;
//! store.initialize()?;
//! let report = Bootstrapper::new(&store).run()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `berth` binary. Disable with `default-features = false`.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod identity;
pub mod store;
pub mod types;
