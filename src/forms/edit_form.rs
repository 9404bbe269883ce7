//! Form bound to one entity
//!
//! The form owns the property model of the entity, one binding per declared
//! field (in declaration order) and the Save / Delete / Cancel buttons.

use std::collections::HashMap;

use serde_json::Value;

use super::buttons::{CancelButton, DeleteButton, SaveButton};
use super::field::{Choice, FieldBinding, FieldDescriptor};
use super::model::PropertyModel;
use crate::errors::ModelError;
use crate::i18n::Messages;
use crate::persistence::Persistable;

pub const FORM_ID: &str = "editForm";

/// Submitted form body, keyed by field path
pub type FormInput = HashMap<String, String>;

pub struct EditForm<T: Persistable> {
    markup_id: String,
    model: Option<PropertyModel<T>>,
    fields: Vec<FieldBinding>,
    pub save_button: SaveButton,
    pub delete_button: DeleteButton,
    pub cancel_button: CancelButton,
    view_mode: bool,
}

impl<T: Persistable> EditForm<T> {
    pub fn new(
        model: Option<PropertyModel<T>>,
        descriptors: &[FieldDescriptor],
        choices: &HashMap<String, Vec<Choice>>,
    ) -> Result<Self, ModelError> {
        let mut form = Self {
            markup_id: FORM_ID.to_string(),
            model,
            fields: Vec::with_capacity(descriptors.len()),
            save_button: SaveButton::default(),
            delete_button: DeleteButton::default(),
            cancel_button: CancelButton::default(),
            view_mode: false,
        };

        for descriptor in descriptors {
            let binding = FieldBinding::new(descriptor.clone(), Value::Null)
                .with_choices(choices.get(&descriptor.path).cloned().unwrap_or_default());
            form.fields.push(binding);
        }
        form.refresh_values()?;
        Ok(form)
    }

    pub fn with_buttons(mut self, save: SaveButton, delete: DeleteButton) -> Self {
        self.save_button = save;
        self.delete_button = delete;
        self
    }

    pub fn with_view_mode(mut self, view_mode: bool) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn markup_id(&self) -> &str {
        &self.markup_id
    }

    pub fn model(&self) -> Option<&PropertyModel<T>> {
        self.model.as_ref()
    }

    pub fn entity(&self) -> Option<&T> {
        self.model.as_ref().map(PropertyModel::object)
    }

    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    pub fn field(&self, path: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|field| field.path() == path)
    }

    pub fn is_view_mode(&self) -> bool {
        self.view_mode
    }

    /// Convert and validate the submitted input for every field.
    /// Returns whether all fields are valid.
    pub fn process_input(&mut self, input: &FormInput, messages: &Messages) -> bool {
        for field in &mut self.fields {
            let raw = input.get(field.path()).map(String::as_str);
            field.process(raw, messages);
        }
        self.fields.iter().all(FieldBinding::is_valid)
    }

    /// Write every converted value into the model
    pub fn update_model(&mut self) -> Result<(), ModelError> {
        let Some(model) = self.model.as_mut() else {
            return Ok(());
        };
        for field in &self.fields {
            if let Some(value) = &field.converted {
                model.set(field.path(), value.clone())?;
            }
        }
        Ok(())
    }

    /// Bind a new entity (e.g. the saved copy) and reload field values from it
    pub fn replace_entity(&mut self, entity: T) -> Result<(), ModelError> {
        match self.model.as_mut() {
            Some(model) => model.replace(entity),
            None => self.model = Some(PropertyModel::new(entity)),
        }
        self.refresh_values()
    }

    fn refresh_values(&mut self) -> Result<(), ModelError> {
        for field in &mut self.fields {
            field.value = match &self.model {
                Some(model) => model.get(&field.descriptor.path)?,
                None => Value::Null,
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Group;
    use serde_json::json;

    fn descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("name", "group.name").required().max_length(100),
            FieldDescriptor::text_area("description", "group.description"),
        ]
    }

    fn input(pairs: &[(&str, &str)]) -> FormInput {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fields_are_bound_to_model_values() {
        let group = Group {
            id: Some(1),
            name: "Admins".to_string(),
            description: None,
        };
        let form = EditForm::new(Some(PropertyModel::new(group)), &descriptors(), &HashMap::new()).unwrap();

        assert_eq!(form.fields().len(), 2);
        assert_eq!(form.field("name").unwrap().value, json!("Admins"));
        assert_eq!(form.field("description").unwrap().value, Value::Null);
    }

    #[test]
    fn test_form_without_model_has_blank_values() {
        let form: EditForm<Group> = EditForm::new(None, &descriptors(), &HashMap::new()).unwrap();
        assert!(form.entity().is_none());
        assert!(form.fields().iter().all(|f| f.value.is_null()));
    }

    #[test]
    fn test_valid_input_updates_model() {
        let mut form =
            EditForm::new(Some(PropertyModel::new(Group::default())), &descriptors(), &HashMap::new()).unwrap();

        let valid = form.process_input(
            &input(&[("name", "Editors"), ("description", "Can edit")]),
            &Messages::default(),
        );
        assert!(valid);

        form.update_model().unwrap();
        let group = form.entity().unwrap();
        assert_eq!(group.name, "Editors");
        assert_eq!(group.description.as_deref(), Some("Can edit"));
    }

    #[test]
    fn test_invalid_input_is_reported_per_field() {
        let mut form =
            EditForm::new(Some(PropertyModel::new(Group::default())), &descriptors(), &HashMap::new()).unwrap();

        let valid = form.process_input(&input(&[("description", "x")]), &Messages::default());
        assert!(!valid);
        assert!(!form.field("name").unwrap().is_valid());
        assert!(form.field("description").unwrap().is_valid());
    }

    #[test]
    fn test_unknown_property_path_fails() {
        let fields = vec![FieldDescriptor::text("missing", "missing")];
        let result = EditForm::new(Some(PropertyModel::new(Group::default())), &fields, &HashMap::new());
        assert!(matches!(result, Err(ModelError::PropertyNotFound(_))));
    }
}
