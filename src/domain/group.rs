use serde::{Deserialize, Serialize};

use crate::database::entities::groups;
use crate::persistence::Persistable;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Persistable for Group {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl From<groups::Model> for Group {
    fn from(model: groups::Model) -> Self {
        Self {
            id: Some(i64::from(model.id)),
            name: model.name,
            description: model.description,
        }
    }
}
