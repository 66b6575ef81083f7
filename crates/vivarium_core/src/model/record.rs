//! Record contract shared by every entity kind.
//!
//! # Responsibility
//! - Expose identity and timestamps to the generic engine.
//! - Let each entity build itself from caller-supplied fields.
//!
//! # Invariants
//! - `id()` never changes for the lifetime of a record.
//! - The engine never refreshes `updated_at` on its own.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stable identifier for every stored record.
pub type RecordId = Uuid;

/// Timestamp type used by record lifecycles.
pub type Timestamp = DateTime<Utc>;

/// Minimal record shape required by the in-memory engine.
pub trait Record: Clone + Send + Sync + 'static {
    /// Caller-supplied fields, everything except identity and timestamps.
    type Props;

    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    /// Builds a record from generated identity/timestamps plus caller fields.
    fn from_props(
        id: RecordId,
        created_at: Timestamp,
        updated_at: Timestamp,
        props: Self::Props,
    ) -> Self;

    fn id(&self) -> RecordId;

    fn created_at(&self) -> Timestamp;

    fn updated_at(&self) -> Timestamp;
}
