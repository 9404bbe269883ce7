//! Validation visitor
//!
//! Walks the field bindings of a form after a failed submit and requests a
//! refresh of every invalid field's container so its errors become visible.
//! Bindings are leaves: the walk never descends below a binding. Every invalid
//! binding is refreshed; the last one seen is remembered so the page can unfold
//! the section that holds it.

use tracing::debug;

use super::ajax::{AjaxTarget, Component};
use super::field::FieldBinding;

pub struct ValidationVisitor<'a> {
    target: &'a mut AjaxTarget,
    last_invalid: Option<usize>,
    invalid_count: usize,
}

impl<'a> ValidationVisitor<'a> {
    pub fn new(target: &'a mut AjaxTarget) -> Self {
        Self {
            target,
            last_invalid: None,
            invalid_count: 0,
        }
    }

    /// Visit every binding in declaration order
    pub fn visit_all(&mut self, fields: &[FieldBinding]) {
        for (index, field) in fields.iter().enumerate() {
            self.component(index, field);
        }
        debug!(
            "Validation visit: {} of {} fields invalid",
            self.invalid_count,
            fields.len()
        );
    }

    pub fn component(&mut self, index: usize, field: &FieldBinding) {
        if field.is_valid() {
            return;
        }
        self.target
            .add(Component::FieldBorder(field.descriptor.border_id()));
        self.last_invalid = Some(index);
        self.invalid_count += 1;
    }

    /// Index of the last invalid binding visited
    pub fn last_invalid(&self) -> Option<usize> {
        self.last_invalid
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::field::FieldDescriptor;
    use serde_json::Value;

    fn binding(path: &str, valid: bool) -> FieldBinding {
        let mut binding = FieldBinding::new(FieldDescriptor::text(path, path), Value::Null);
        if !valid {
            binding.error("invalid");
        }
        binding
    }

    #[test]
    fn test_refreshes_every_invalid_field_and_tracks_last() {
        let fields = vec![
            binding("first_name", false),
            binding("last_name", true),
            binding("email", false),
            binding("group_id", true),
        ];
        let mut target = AjaxTarget::new();
        let mut visitor = ValidationVisitor::new(&mut target);
        visitor.visit_all(&fields);

        assert_eq!(visitor.last_invalid(), Some(2));
        assert_eq!(visitor.invalid_count(), 2);

        let refreshed: Vec<String> = target.components().map(Component::markup_id).collect();
        assert_eq!(refreshed, vec!["first_name-border", "email-border"]);
    }

    #[test]
    fn test_all_valid_refreshes_nothing() {
        let fields = vec![binding("name", true), binding("description", true)];
        let mut target = AjaxTarget::new();
        let mut visitor = ValidationVisitor::new(&mut target);
        visitor.visit_all(&fields);

        assert_eq!(visitor.last_invalid(), None);
        assert!(target.is_empty());
    }
}
