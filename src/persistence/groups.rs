use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use super::{storage_id, Repository};
use crate::database::entities::{groups, groups::Entity as Groups};
use crate::domain::Group;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::forms::{Choice, ChoiceProvider};

#[derive(Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository<Group> for GroupRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Group>> {
        let Some(id) = storage_id(id) else {
            return Ok(None);
        };
        let group = Groups::find_by_id(id).one(&self.db).await?;
        Ok(group.map(Group::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Group>> {
        let groups = Groups::find()
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await?;
        Ok(groups.into_iter().map(Group::from).collect())
    }

    async fn save_and_flush(&self, entity: Group) -> RepositoryResult<Group> {
        let now = Utc::now();
        let saved = match entity.id {
            None => {
                groups::ActiveModel {
                    name: Set(entity.name),
                    description: Set(entity.description),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
            Some(id) => {
                let existing = Groups::find_by_id(storage_id(id).ok_or(RepositoryError::NotPersisted)?)
                    .one(&self.db)
                    .await?
                    .ok_or(RepositoryError::NotPersisted)?;

                let mut group: groups::ActiveModel = existing.into();
                group.name = Set(entity.name);
                group.description = Set(entity.description);
                group.updated_at = Set(now);
                group.update(&self.db).await?
            }
        };

        debug!("Saved group {}", saved.id);
        Ok(Group::from(saved))
    }

    async fn delete(&self, entity: &Group) -> RepositoryResult<()> {
        let id = entity
            .id
            .and_then(storage_id)
            .ok_or(RepositoryError::NotPersisted)?;
        Groups::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl ChoiceProvider for GroupRepository {
    async fn choices(&self) -> anyhow::Result<Vec<Choice>> {
        let groups = self.find_all().await?;
        Ok(groups
            .into_iter()
            .filter_map(|group| group.id.map(|id| Choice::new(id, group.name)))
            .collect())
    }
}
