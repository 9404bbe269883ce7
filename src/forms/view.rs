//! Template context of an edit page

use serde::Serialize;

use super::edit_page::EditPage;
use super::feedback::FeedbackMessage;
use super::field::{FieldBinding, FieldKind};
use crate::i18n::Messages;
use crate::persistence::Persistable;

#[derive(Clone, Debug, Serialize)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct FieldView {
    pub id: String,
    pub border_id: String,
    pub name: String,
    pub label: String,
    pub input_type: &'static str,
    pub is_textarea: bool,
    pub is_checkbox: bool,
    pub is_select: bool,
    pub required: bool,
    pub value: String,
    pub checked: bool,
    pub errors: Vec<String>,
    pub choices: Vec<ChoiceView>,
    pub none_label: String,
    pub readonly: bool,
}

impl FieldView {
    fn new(field: &FieldBinding, messages: &Messages, readonly: bool) -> Self {
        let descriptor = &field.descriptor;
        let value = field.display_value();
        let choices = field
            .choices
            .iter()
            .map(|choice| ChoiceView {
                selected: choice.value == value,
                value: choice.value.clone(),
                label: choice.label.clone(),
            })
            .collect();

        Self {
            id: descriptor.markup_id(),
            border_id: descriptor.border_id(),
            name: descriptor.path.clone(),
            label: messages.get(&descriptor.label),
            input_type: descriptor.kind.input_type(),
            is_textarea: descriptor.kind == FieldKind::TextArea,
            is_checkbox: descriptor.kind == FieldKind::Checkbox,
            is_select: matches!(descriptor.kind, FieldKind::Select { .. }),
            required: descriptor.required,
            checked: field.is_checked(),
            value,
            errors: field.errors.clone(),
            choices,
            none_label: messages.get("select.none"),
            readonly,
        }
    }
}

/// Fields sharing a foldable section, in declaration order
#[derive(Clone, Debug, Serialize)]
pub struct SectionView {
    pub id: Option<String>,
    pub title: Option<String>,
    pub fields: Vec<FieldView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ButtonView {
    pub name: &'static str,
    pub label: String,
    pub visible: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct EditPageView {
    pub title: String,
    pub page_name: String,
    pub form_id: String,
    pub action: String,
    pub list_url: String,
    pub view_mode: bool,
    pub css_class: &'static str,
    pub has_model: bool,
    pub sections: Vec<SectionView>,
    pub buttons: Vec<ButtonView>,
    pub feedback: Vec<FeedbackMessage>,
}

/// Localized section title, or the bare section id when the bundle has none
fn section_title(messages: &Messages, id: &str) -> String {
    let key = format!("section.{}", id);
    if messages.contains(&key) {
        messages.get(&key)
    } else {
        id.to_string()
    }
}

impl EditPageView {
    pub fn from_page<T: Persistable>(page: &EditPage<T>) -> Self {
        let definition = page.definition();
        let messages = definition.messages();
        let form = page.form();
        let view_mode = form.is_view_mode();

        let mut sections: Vec<SectionView> = Vec::new();
        for field in form.fields() {
            let section = field.descriptor.section.clone();
            let view = FieldView::new(field, messages, view_mode);
            match sections.last_mut() {
                Some(last) if last.id == section => last.fields.push(view),
                _ => sections.push(SectionView {
                    title: section.as_ref().map(|id| section_title(messages, id)),
                    id: section,
                    fields: vec![view],
                }),
            }
        }

        let buttons = vec![
            ButtonView {
                name: "save",
                label: messages.get(&form.save_button.label),
                visible: !view_mode,
            },
            ButtonView {
                name: "delete",
                label: messages.get(&form.delete_button.label),
                visible: !view_mode && form.delete_button.visible,
            },
            ButtonView {
                name: "cancel",
                label: messages.get(&form.cancel_button.label),
                visible: !view_mode,
            },
        ];

        Self {
            title: messages.get(definition.title()),
            page_name: definition.name().to_string(),
            form_id: form.markup_id().to_string(),
            action: page.action_url(),
            list_url: definition.list_page().url(None),
            view_mode,
            css_class: if view_mode { "print-view" } else { "" },
            has_model: form.model().is_some(),
            sections,
            buttons,
            feedback: page.feedback().to_vec(),
        }
    }

    /// View of the field whose container has the given markup id
    pub fn field_by_border_id(&self, border_id: &str) -> Option<&FieldView> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter())
            .find(|field| field.border_id == border_id)
    }
}
