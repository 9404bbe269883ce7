//! Named binary content kept in the database
//!
//! Every blob is split into a metadata row (name, size, timestamps) and a
//! content row holding the bytes. The content row cascades with its metadata.

pub mod db_storage;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::errors::StorageResult;

pub use db_storage::DbFileStorage;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Identifier under which this storage is registered
    fn id(&self) -> &'static str;

    /// Store `bytes` under `name`, replacing any previous content
    async fn write_content(&self, name: &str, bytes: &[u8]) -> StorageResult<()>;

    async fn get_content(&self, name: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Returns false when nothing was stored under `name`
    async fn delete_content(&self, name: &str) -> StorageResult<bool>;

    /// Read `reader` to the end, then store the bytes. A read failure aborts
    /// the write and leaves existing content untouched.
    async fn write_from_reader<R>(&self, name: &str, mut reader: R) -> StorageResult<()>
    where
        R: AsyncRead + Unpin + Send,
        Self: Sized,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        self.write_content(name, &bytes).await
    }
}
