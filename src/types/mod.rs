mod authorization;
mod models;

pub use authorization::*;
pub use models::*;
