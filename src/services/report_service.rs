use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{CacheInvalidator, ReportsCache};
use crate::database::entities::{
    groups, persons, groups::Entity as Groups, persons::Entity as Persons,
};

pub const GROUP_SUMMARY: &str = "group_summary";

/// One row of the groups listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub person_count: u64,
}

pub struct ReportService {
    db: DatabaseConnection,
    cache: Arc<ReportsCache<Vec<GroupSummary>>>,
}

impl ReportService {
    pub fn new(db: DatabaseConnection, cache: ReportsCache<Vec<GroupSummary>>) -> Self {
        Self {
            db,
            cache: Arc::new(cache),
        }
    }

    /// Handle given to edit pages so their writes flush the cached reports
    pub fn invalidator(&self) -> Arc<dyn CacheInvalidator> {
        self.cache.clone()
    }

    /// Groups ordered by name with the number of persons in each
    pub async fn group_summary(&self) -> Result<Vec<GroupSummary>> {
        self.cache
            .get_or_compute(GROUP_SUMMARY, || self.compute_group_summary())
            .await
    }

    async fn compute_group_summary(&self) -> Result<Vec<GroupSummary>> {
        let groups = Groups::find()
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await?;

        let memberships: Vec<Option<i32>> = Persons::find()
            .select_only()
            .column(persons::Column::GroupId)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for group_id in memberships.into_iter().flatten() {
            *counts.entry(group_id).or_default() += 1;
        }

        debug!("Computed group summary for {} groups", groups.len());
        Ok(groups
            .into_iter()
            .map(|group| GroupSummary {
                id: i64::from(group.id),
                person_count: counts.get(&group.id).copied().unwrap_or(0),
                name: group.name,
                description: group.description,
            })
            .collect())
    }
}
