//! Living being repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Add name-keyed lookups and uniqueness checks on top of the generic
//!   repository contract.
//! - Configure the generic engine with the living-being filter and ordering.
//!
//! # Invariants
//! - Filter matches `name` by case-insensitive substring; an empty filter
//!   matches everything.
//! - Sortable fields are `name` and `created_at`.
//! - Requests without a sort field are ordered by `created_at` descending.
//! - `insert_unique`/`update_unique` run the name check and the write under
//!   one lock acquisition.

use crate::model::living_being::LivingBeing;
use crate::model::record::{Record, RecordId};
use crate::repo::contract::Repository;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::memory::InMemoryRepository;
use crate::repo::search::{
    contains_ignore_case, SearchInput, SearchOutput, SortDirection, SortableFields,
};

/// Repository interface for living beings.
pub trait LivingBeingRepository: Repository<LivingBeing> {
    /// Exact-name lookup.
    fn get_by_name(&self, name: &str) -> RepoResult<LivingBeing>;

    /// Fails with `Conflict` when any stored living being has `name`.
    fn conflicting_name(&self, name: &str) -> RepoResult<()>;

    /// Inserts `record` unless its name is already taken.
    fn insert_unique(&self, record: LivingBeing) -> RepoResult<LivingBeing>;

    /// Updates `record` unless another living being already owns its name.
    fn update_unique(&self, record: LivingBeing) -> RepoResult<LivingBeing>;
}

/// In-memory living being repository.
pub struct InMemoryLivingBeingRepository {
    inner: InMemoryRepository<LivingBeing>,
}

impl InMemoryLivingBeingRepository {
    pub fn new() -> Self {
        let sortable = SortableFields::new()
            .with_comparator("name", |a: &LivingBeing, b: &LivingBeing| {
                a.name.cmp(&b.name)
            })
            .with_key("created_at", |being: &LivingBeing| being.created_at);

        let inner = InMemoryRepository::new(|being: &LivingBeing, filter: &str| {
            filter.is_empty() || contains_ignore_case(&being.name, filter)
        })
        .with_sortable_fields(sortable)
        .with_default_sort("created_at", SortDirection::Desc);

        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for InMemoryLivingBeingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository<LivingBeing> for InMemoryLivingBeingRepository {
    fn create(&self, props: <LivingBeing as Record>::Props) -> LivingBeing {
        self.inner.create(props)
    }

    fn insert(&self, record: LivingBeing) -> RepoResult<LivingBeing> {
        self.inner.insert(record)
    }

    fn get(&self, input: &SearchInput) -> RepoResult<SearchOutput<LivingBeing>> {
        self.inner.get(input)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<LivingBeing> {
        self.inner.get_by_id(id)
    }

    fn update(&self, record: LivingBeing) -> RepoResult<LivingBeing> {
        self.inner.update(record)
    }

    fn delete(&self, id: RecordId) -> RepoResult<LivingBeing> {
        self.inner.delete(id)
    }
}

impl LivingBeingRepository for InMemoryLivingBeingRepository {
    fn get_by_name(&self, name: &str) -> RepoResult<LivingBeing> {
        self.inner
            .find(|being| being.name == name)
            .ok_or_else(|| RepoError::not_found_by(LivingBeing::ENTITY, "name", name))
    }

    fn conflicting_name(&self, name: &str) -> RepoResult<()> {
        match self.get_by_name(name) {
            Ok(_) => Err(name_conflict(name)),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn insert_unique(&self, record: LivingBeing) -> RepoResult<LivingBeing> {
        let name = record.name.clone();
        self.inner.insert_checked(record, |items| {
            if items.iter().any(|being| being.name == name) {
                return Err(name_conflict(&name));
            }
            Ok(())
        })
    }

    fn update_unique(&self, record: LivingBeing) -> RepoResult<LivingBeing> {
        let id = record.id;
        let name = record.name.clone();
        self.inner.update_checked(record, |items| {
            if items.iter().any(|being| being.name == name && being.id != id) {
                return Err(name_conflict(&name));
            }
            Ok(())
        })
    }
}

fn name_conflict(name: &str) -> RepoError {
    RepoError::Conflict(format!(
        "There is already a living being with the name {name}"
    ))
}
