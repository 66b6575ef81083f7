//! Repository error taxonomy shared by every entity kind.
//!
//! # Invariants
//! - `NotFound` messages always embed the lookup value.
//! - The generic engine never produces `Conflict`; only entity uniqueness
//!   checks do.

use crate::model::record::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// No record matches the requested key.
    NotFound {
        entity: &'static str,
        key: &'static str,
        value: String,
    },
    /// A uniquely-keyed field is already taken.
    Conflict(String),
    /// Backend failure from a persistent implementation.
    Storage(String),
}

impl RepoError {
    /// Builds the identifier-keyed not-found error.
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        Self::not_found_by(entity, "ID", id.to_string())
    }

    /// Builds a not-found error for an arbitrary lookup key.
    pub fn not_found_by(entity: &'static str, key: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key,
            value: value.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key, value } => {
                write!(f, "{entity} not found using {key} {value}")
            }
            Self::Conflict(message) => write!(f, "{message}"),
            Self::Storage(message) => write!(f, "storage failure: {message}"),
        }
    }
}

impl Error for RepoError {}
