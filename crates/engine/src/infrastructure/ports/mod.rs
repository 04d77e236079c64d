//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Character storage (the caller owns transactions)
//! - Inventory lookups (consumption commits with the character)
//! - The status effect catalog
//! - Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::*;
pub use testing::RandomPort;
