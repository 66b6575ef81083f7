//! Repository layer: contract, query pipeline and in-memory engine.
//!
//! # Responsibility
//! - Define the storage contract every backend implements.
//! - Provide the generic in-memory engine and its entity specializations.
//!
//! # Invariants
//! - Only `NotFound` and `Conflict` are domain errors; bad query parameters
//!   are defaulted instead of rejected.
//! - Entity modules customize the engine through injected strategies, never
//!   by reaching into its storage.

pub mod contract;
pub mod error;
pub mod living_being_repo;
pub mod memory;
pub mod search;
