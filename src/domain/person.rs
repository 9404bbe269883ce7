use serde::{Deserialize, Serialize};

use crate::database::entities::persons;
use crate::persistence::Persistable;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub group_id: Option<i64>,
    pub enabled: bool,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            id: None,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            group_id: None,
            enabled: true,
        }
    }
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Persistable for Person {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl From<persons::Model> for Person {
    fn from(model: persons::Model) -> Self {
        Self {
            id: Some(i64::from(model.id)),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            group_id: model.group_id.map(i64::from),
            enabled: model.enabled,
        }
    }
}
