//! Core record store for Vivarium.
//! Generic in-memory repository engine plus the living-being specialization.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingStatus};
pub use model::living_being::{LivingBeing, LivingBeingProps};
pub use model::record::{Record, RecordId, Timestamp};
pub use repo::contract::Repository;
pub use repo::error::{RepoError, RepoResult};
pub use repo::living_being_repo::{InMemoryLivingBeingRepository, LivingBeingRepository};
pub use repo::memory::InMemoryRepository;
pub use repo::search::{
    apply_filter, apply_paginate, apply_sort, contains_ignore_case, SearchInput, SearchOutput,
    SortDirection, SortableFields, DEFAULT_PAGE, DEFAULT_PER_PAGE,
};
pub use service::living_being_service::LivingBeingService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
