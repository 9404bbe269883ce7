use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use super::{storage_id, Repository};
use crate::database::entities::{persons, persons::Entity as Persons};
use crate::domain::Person;
use crate::errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct PersonRepository {
    db: DatabaseConnection,
}

impl PersonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn group_column(group_id: Option<i64>) -> RepositoryResult<Option<i32>> {
    match group_id {
        None => Ok(None),
        Some(id) => storage_id(id)
            .map(Some)
            .ok_or_else(|| RepositoryError::ConstraintViolation(format!("Unknown group {}", id))),
    }
}

#[async_trait]
impl Repository<Person> for PersonRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Person>> {
        let Some(id) = storage_id(id) else {
            return Ok(None);
        };
        let person = Persons::find_by_id(id).one(&self.db).await?;
        Ok(person.map(Person::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Person>> {
        let persons = Persons::find()
            .order_by_asc(persons::Column::LastName)
            .order_by_asc(persons::Column::FirstName)
            .all(&self.db)
            .await?;
        Ok(persons.into_iter().map(Person::from).collect())
    }

    async fn save_and_flush(&self, entity: Person) -> RepositoryResult<Person> {
        let now = Utc::now();
        let group_id = group_column(entity.group_id)?;

        let saved = match entity.id {
            None => {
                persons::ActiveModel {
                    first_name: Set(entity.first_name),
                    last_name: Set(entity.last_name),
                    email: Set(entity.email),
                    group_id: Set(group_id),
                    enabled: Set(entity.enabled),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
            Some(id) => {
                let existing = Persons::find_by_id(storage_id(id).ok_or(RepositoryError::NotPersisted)?)
                    .one(&self.db)
                    .await?
                    .ok_or(RepositoryError::NotPersisted)?;

                let mut person: persons::ActiveModel = existing.into();
                person.first_name = Set(entity.first_name);
                person.last_name = Set(entity.last_name);
                person.email = Set(entity.email);
                person.group_id = Set(group_id);
                person.enabled = Set(entity.enabled);
                person.updated_at = Set(now);
                person.update(&self.db).await?
            }
        };

        debug!("Saved person {}", saved.id);
        Ok(Person::from(saved))
    }

    async fn delete(&self, entity: &Person) -> RepositoryResult<()> {
        let id = entity
            .id
            .and_then(storage_id)
            .ok_or(RepositoryError::NotPersisted)?;
        Persons::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
