//! Living being use-case service.
//!
//! # Responsibility
//! - Provide create/get/search/update/delete entry points for callers.
//! - Own the caller-side lifecycle duties the repository leaves open:
//!   name uniqueness and `updated_at` refresh.
//!
//! # Invariants
//! - Create and update never bypass the unique-name repository paths.
//! - Update keeps `id` and `created_at`, replaces every other field.

use crate::model::living_being::{LivingBeing, LivingBeingProps};
use crate::model::record::RecordId;
use crate::repo::error::RepoResult;
use crate::repo::living_being_repo::LivingBeingRepository;
use crate::repo::search::{SearchInput, SearchOutput};
use log::info;

/// Service facade over living being repository implementations.
pub struct LivingBeingService<R: LivingBeingRepository> {
    repo: R,
}

impl<R: LivingBeingRepository> LivingBeingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates and stores a living being.
    ///
    /// Fails with `Conflict` when the name is already taken.
    pub fn create(&self, props: LivingBeingProps) -> RepoResult<LivingBeing> {
        let record = self.repo.create(props);
        let stored = self.repo.insert_unique(record)?;
        info!(
            "event=living_being_create module=service status=ok id={}",
            stored.id
        );
        Ok(stored)
    }

    pub fn get(&self, id: RecordId) -> RepoResult<LivingBeing> {
        self.repo.get_by_id(id)
    }

    pub fn get_by_name(&self, name: &str) -> RepoResult<LivingBeing> {
        self.repo.get_by_name(name)
    }

    /// Searches with filter, sort and pagination.
    pub fn search(&self, input: &SearchInput) -> RepoResult<SearchOutput<LivingBeing>> {
        self.repo.get(input)
    }

    /// Replaces all caller-owned fields of an existing living being.
    ///
    /// # Contract
    /// - Fails with `NotFound` when `id` is absent.
    /// - Fails with `Conflict` when another record owns the new name.
    /// - Refreshes `updated_at`.
    pub fn update(&self, id: RecordId, props: LivingBeingProps) -> RepoResult<LivingBeing> {
        let mut record = self.repo.get_by_id(id)?;
        record.replace_props(props);
        record.touch();
        let stored = self.repo.update_unique(record)?;
        info!(
            "event=living_being_update module=service status=ok id={}",
            stored.id
        );
        Ok(stored)
    }

    pub fn delete(&self, id: RecordId) -> RepoResult<LivingBeing> {
        let removed = self.repo.delete(id)?;
        info!(
            "event=living_being_delete module=service status=ok id={}",
            removed.id
        );
        Ok(removed)
    }
}
