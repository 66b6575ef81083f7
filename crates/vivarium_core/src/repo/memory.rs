//! Generic in-memory record engine.
//!
//! # Responsibility
//! - Own one ordered collection of records and implement [`Repository`].
//! - Host the entity extension points: filter predicate, sortable fields,
//!   default ordering.
//!
//! # Invariants
//! - The collection is only reachable through this type.
//! - Insertion order is preserved; `get` never reorders storage.
//! - Every operation holds the collection lock for its whole duration, so
//!   locate-then-mutate sequences are atomic.
//! - A poisoned lock is recovered instead of propagating the panic.

use crate::model::record::{Record, RecordId};
use crate::repo::contract::Repository;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::search::{
    run_search, DefaultSort, FilterFn, SearchInput, SearchOutput, SortDirection, SortableFields,
};
use chrono::Utc;
use log::{debug, warn};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory [`Repository`] over a single `Vec` guarded by one `RwLock`.
pub struct InMemoryRepository<M: Record> {
    items: RwLock<Vec<M>>,
    filter: FilterFn<M>,
    sortable: SortableFields<M>,
    default_sort: Option<DefaultSort>,
}

impl<M: Record> InMemoryRepository<M> {
    /// Creates an empty engine with the entity's filter predicate.
    ///
    /// No field is sortable and no default ordering is applied until
    /// configured.
    pub fn new<F>(filter: F) -> Self
    where
        F: Fn(&M, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            items: RwLock::new(Vec::new()),
            filter: Box::new(filter),
            sortable: SortableFields::new(),
            default_sort: None,
        }
    }

    /// Declares the sortable-field whitelist.
    pub fn with_sortable_fields(mut self, fields: SortableFields<M>) -> Self {
        self.sortable = fields;
        self
    }

    /// Orders results by `field` when a request names no sort field.
    ///
    /// `field` must also be registered as sortable, otherwise it is ignored
    /// like any other unknown field.
    pub fn with_default_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = Some(DefaultSort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clones the whole collection in storage order.
    pub fn snapshot(&self) -> Vec<M> {
        self.read().clone()
    }

    /// Returns the first record matching `predicate`, in storage order.
    pub fn find<P>(&self, predicate: P) -> Option<M>
    where
        P: Fn(&M) -> bool,
    {
        self.read().iter().find(|item| predicate(*item)).cloned()
    }

    /// Inserts `record` only if `check` accepts the current collection.
    ///
    /// The check and the append share one write-lock acquisition.
    pub fn insert_checked<C>(&self, record: M, check: C) -> RepoResult<M>
    where
        C: FnOnce(&[M]) -> RepoResult<()>,
    {
        let mut items = self.write();
        check(&items)?;
        Ok(push_record(&mut items, record))
    }

    /// Replaces the record with the same id only if `check` accepts the
    /// current collection.
    ///
    /// The check, the lookup and the replacement share one write-lock
    /// acquisition.
    pub fn update_checked<C>(&self, record: M, check: C) -> RepoResult<M>
    where
        C: FnOnce(&[M]) -> RepoResult<()>,
    {
        let mut items = self.write();
        let index = locate(&items, record.id())?;
        check(&items)?;
        Ok(replace_record(&mut items, index, record))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<M>> {
        self.items.read().unwrap_or_else(|poisoned| {
            warn!(
                "event=lock_poisoned module=repo status=recovered entity={} mode=read",
                M::ENTITY
            );
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<M>> {
        self.items.write().unwrap_or_else(|poisoned| {
            warn!(
                "event=lock_poisoned module=repo status=recovered entity={} mode=write",
                M::ENTITY
            );
            poisoned.into_inner()
        })
    }
}

impl<M: Record> Repository<M> for InMemoryRepository<M> {
    fn create(&self, props: M::Props) -> M {
        let now = Utc::now();
        M::from_props(Uuid::new_v4(), now, now, props)
    }

    fn insert(&self, record: M) -> RepoResult<M> {
        let mut items = self.write();
        Ok(push_record(&mut items, record))
    }

    fn get(&self, input: &SearchInput) -> RepoResult<SearchOutput<M>> {
        let items = self.read();
        let output = run_search(
            &items,
            input,
            &*self.filter,
            &self.sortable,
            self.default_sort.as_ref(),
        );
        debug!(
            "event=record_search module=repo status=ok entity={} total={} returned={} page={} per_page={}",
            M::ENTITY,
            output.total,
            output.data.len(),
            output.current_page,
            output.per_page
        );
        Ok(output)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<M> {
        let items = self.read();
        let index = locate(&items, id)?;
        Ok(items[index].clone())
    }

    fn update(&self, record: M) -> RepoResult<M> {
        let mut items = self.write();
        let index = locate(&items, record.id())?;
        Ok(replace_record(&mut items, index, record))
    }

    fn delete(&self, id: RecordId) -> RepoResult<M> {
        let mut items = self.write();
        let index = locate(&items, id)?;
        let removed = items.remove(index);
        debug!(
            "event=record_delete module=repo status=ok entity={} id={} index={}",
            M::ENTITY,
            id,
            index
        );
        Ok(removed)
    }
}

fn locate<M: Record>(items: &[M], id: RecordId) -> RepoResult<usize> {
    items.iter().position(|item| item.id() == id).ok_or_else(|| {
        debug!(
            "event=record_lookup module=repo status=not_found entity={} id={}",
            M::ENTITY,
            id
        );
        RepoError::not_found(M::ENTITY, id)
    })
}

fn push_record<M: Record>(items: &mut Vec<M>, record: M) -> M {
    debug!(
        "event=record_insert module=repo status=ok entity={} id={} index={}",
        M::ENTITY,
        record.id(),
        items.len()
    );
    items.push(record.clone());
    record
}

fn replace_record<M: Record>(items: &mut [M], index: usize, record: M) -> M {
    debug!(
        "event=record_update module=repo status=ok entity={} id={} index={}",
        M::ENTITY,
        record.id(),
        index
    );
    items[index] = record.clone();
    record
}
