use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use super::FileStorage;
use crate::database::entities::{
    file_content, file_content::Entity as FileContent, file_metadata,
    file_metadata::Entity as FileMetadata,
};
use crate::errors::{StorageError, StorageResult};

#[derive(Clone)]
pub struct DbFileStorage {
    db: DatabaseConnection,
}

impl DbFileStorage {
    pub const STORAGE_ID: &'static str = "dbStorage";

    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn check_name(name: &str) -> StorageResult<()> {
    if name.trim().is_empty() {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl FileStorage for DbFileStorage {
    fn id(&self) -> &'static str {
        Self::STORAGE_ID
    }

    async fn write_content(&self, name: &str, bytes: &[u8]) -> StorageResult<()> {
        check_name(name)?;
        let size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let existing = FileMetadata::find()
            .filter(file_metadata::Column::Name.eq(name))
            .one(&txn)
            .await?;

        let metadata_id = match existing {
            Some(metadata) => {
                let mut metadata: file_metadata::ActiveModel = metadata.into();
                metadata.size = Set(size);
                metadata.updated_at = Set(now);
                metadata.update(&txn).await?.id
            }
            None => {
                file_metadata::ActiveModel {
                    name: Set(name.to_string()),
                    size: Set(size),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
                .id
            }
        };

        let content = FileContent::find()
            .filter(file_content::Column::FileMetadataId.eq(metadata_id))
            .one(&txn)
            .await?;

        match content {
            Some(content) => {
                let mut content: file_content::ActiveModel = content.into();
                content.bytes = Set(bytes.to_vec());
                content.update(&txn).await?;
            }
            None => {
                file_content::ActiveModel {
                    file_metadata_id: Set(metadata_id),
                    bytes: Set(bytes.to_vec()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        info!("Stored '{}' ({} bytes) in {}", name, size, Self::STORAGE_ID);
        Ok(())
    }

    async fn get_content(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        let found = FileMetadata::find()
            .filter(file_metadata::Column::Name.eq(name))
            .find_also_related(FileContent)
            .one(&self.db)
            .await?;

        match found {
            Some((_, Some(content))) => Ok(Some(content.bytes)),
            Some((_, None)) => {
                debug!("'{}' has metadata but no content", name);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete_content(&self, name: &str) -> StorageResult<bool> {
        let txn = self.db.begin().await?;

        let Some(metadata) = FileMetadata::find()
            .filter(file_metadata::Column::Name.eq(name))
            .one(&txn)
            .await?
        else {
            return Ok(false);
        };

        FileContent::delete_many()
            .filter(file_content::Column::FileMetadataId.eq(metadata.id))
            .exec(&txn)
            .await?;
        FileMetadata::delete_by_id(metadata.id).exec(&txn).await?;

        txn.commit().await?;
        info!("Deleted '{}' from {}", name, Self::STORAGE_ID);
        Ok(true)
    }
}
