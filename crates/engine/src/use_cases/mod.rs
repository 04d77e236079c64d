//! Use cases - User story orchestration.
//!
//! Each use case owns the ports it needs and returns the updated sheet with
//! an outcome record for the caller to render.

pub mod character;

pub use character::CharacterUseCases;
