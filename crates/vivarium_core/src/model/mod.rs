//! Domain model for stored records.
//!
//! # Responsibility
//! - Define the minimal shape every stored record exposes to the engine.
//! - Hold concrete entity payloads (living beings).
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - `created_at` is set once; `updated_at` is refreshed by callers only.

pub mod living_being;
pub mod record;
