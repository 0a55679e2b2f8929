//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The user record and its wire shape are shared by the store, the cache
//! and the HTTP layer.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::{User, UserPayload};
