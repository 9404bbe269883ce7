//! Property-path access to a bound entity
//!
//! Field bindings address entity properties by dotted path (`"name"`,
//! `"address.city"`). The model serializes the entity to read a property and
//! round-trips it through serde to write one, so any `Serialize +
//! DeserializeOwned` entity can be edited without per-type accessors.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyModel<T> {
    object: T,
}

impl<T> PropertyModel<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(object: T) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &T {
        &self.object
    }

    pub fn replace(&mut self, object: T) {
        self.object = object;
    }

    /// Read the property at `path`
    pub fn get(&self, path: &str) -> Result<Value, ModelError> {
        let root = serde_json::to_value(&self.object)?;
        let mut current = &root;
        for segment in path.split('.') {
            current = child(current, segment)
                .ok_or_else(|| ModelError::PropertyNotFound(path.to_string()))?;
        }
        Ok(current.clone())
    }

    /// Write `value` into the property at `path`; the property must already exist
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), ModelError> {
        let mut root = serde_json::to_value(&self.object)?;
        if !root.is_object() {
            return Err(ModelError::NotAnObject);
        }

        let slot = path
            .split('.')
            .try_fold(&mut root, |current, segment| child_mut(current, segment))
            .ok_or_else(|| ModelError::PropertyNotFound(path.to_string()))?;
        *slot = value;

        self.object = serde_json::from_value(root).map_err(|e| ModelError::Conversion {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Contact {
        id: Option<i64>,
        name: String,
        age: Option<i64>,
        address: Address,
    }

    fn contact() -> Contact {
        Contact {
            id: None,
            name: "Ada".to_string(),
            age: None,
            address: Address {
                city: "London".to_string(),
            },
        }
    }

    #[test]
    fn test_get_top_level_and_nested() {
        let model = PropertyModel::new(contact());
        assert_eq!(model.get("name").unwrap(), json!("Ada"));
        assert_eq!(model.get("age").unwrap(), Value::Null);
        assert_eq!(model.get("address.city").unwrap(), json!("London"));
    }

    #[test]
    fn test_set_updates_object() {
        let mut model = PropertyModel::new(contact());
        model.set("age", json!(36)).unwrap();
        model.set("address.city", json!("Paris")).unwrap();

        assert_eq!(model.object().age, Some(36));
        assert_eq!(model.object().address.city, "Paris");
    }

    #[test]
    fn test_unknown_property() {
        let mut model = PropertyModel::new(contact());
        assert!(matches!(
            model.get("email"),
            Err(ModelError::PropertyNotFound(_))
        ));
        assert!(matches!(
            model.set("address.zip", json!("123")),
            Err(ModelError::PropertyNotFound(_))
        ));
    }

    #[test]
    fn test_type_mismatch_leaves_object_untouched() {
        let mut model = PropertyModel::new(contact());
        let err = model.set("age", json!("old")).unwrap_err();
        assert!(matches!(err, ModelError::Conversion { .. }));
        assert_eq!(model.object(), &contact());
    }
}
