//! Charsheet Engine library.
//!
//! Rule resolvers for a tabletop character sheet, orchestrated over async
//! collaborator ports.
//!
//! ## Structure
//!
//! - `use_cases/` - Load, apply a domain rule, commit
//! - `infrastructure/` - Ports plus in-memory, random and settings adapters
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
