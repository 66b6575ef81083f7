//! Repository contract shared by in-memory and persistent backends.

use crate::model::record::{Record, RecordId};
use crate::repo::error::RepoResult;
use crate::repo::search::{SearchInput, SearchOutput};

/// Operation set every storage backend implements for one entity kind.
pub trait Repository<M: Record> {
    /// Builds a record with a fresh id and current timestamps.
    ///
    /// Does not touch storage.
    fn create(&self, props: M::Props) -> M;

    /// Appends a record. No uniqueness check is performed here.
    fn insert(&self, record: M) -> RepoResult<M>;

    /// Runs filter -> sort -> paginate and returns one page.
    fn get(&self, input: &SearchInput) -> RepoResult<SearchOutput<M>>;

    fn get_by_id(&self, id: RecordId) -> RepoResult<M>;

    /// Replaces the stored record with the same id, in place.
    fn update(&self, record: M) -> RepoResult<M>;

    /// Removes and returns the record with `id`.
    fn delete(&self, id: RecordId) -> RepoResult<M>;
}
