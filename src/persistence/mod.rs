//! Entity repositories
//!
//! Edit pages only see the [`Repository`] trait. Writes are executed against the
//! database before the call returns, so `save_and_flush` never defers work to a
//! later commit.

pub mod groups;
pub mod persons;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use crate::errors::RepositoryResult;

pub use groups::GroupRepository;
pub use persons::PersonRepository;

/// An entity with an optional numeric identifier; `None` means not yet persisted
pub trait Persistable: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> Option<i64>;

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

#[async_trait]
pub trait Repository<T: Persistable>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<T>>;

    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    /// Insert or update, returning the stored entity with its identifier
    async fn save_and_flush(&self, entity: T) -> RepositoryResult<T>;

    /// Fails with `ConstraintViolation` while other rows still reference the entity
    async fn delete(&self, entity: &T) -> RepositoryResult<()>;
}

/// Identifiers are exposed as i64 and stored as i32
pub(crate) fn storage_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}
