//! Partial page updates requested by form actions
//!
//! An action never renders markup itself. It records which page regions must be
//! re-sent to the client and which scripts the client should run; the web layer
//! turns that into either a full page or an AJAX response.

use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

/// A page region that can be re-rendered on its own
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Component {
    FeedbackPanel,
    /// Container of a single field, by markup id
    FieldBorder(String),
    /// The whole edit form, by markup id
    Form(String),
}

impl Component {
    /// Markup id of the region on the page
    pub fn markup_id(&self) -> String {
        match self {
            Component::FeedbackPanel => "feedback".to_string(),
            Component::FieldBorder(id) | Component::Form(id) => id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Script {
    /// Close the blocking overlay opened on submit
    UnblockUi,
    /// Re-enable every button of the form
    EnableButtons { form_id: String },
    ScrollToFeedback,
    /// Unfold the section holding a field
    ExpandSection { section: String },
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::UnblockUi => write!(f, "$.unblockUI();"),
            Script::EnableButtons { form_id } => {
                write!(f, "$('#{} button').prop('disabled', false);", form_id)
            }
            Script::ScrollToFeedback => write!(
                f,
                "$('html, body').animate({{scrollTop: $(\".feedbackPanel\").offset().top}}, 500);"
            ),
            Script::ExpandSection { section } => {
                write!(f, "$('#section-{}').collapse('show');", section)
            }
        }
    }
}

/// Components to refresh and scripts to run, in request order
#[derive(Clone, Debug, Default)]
pub struct AjaxTarget {
    components: IndexSet<Component>,
    scripts: Vec<Script>,
}

impl AjaxTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a component for refresh; adding it twice keeps the first position
    pub fn add(&mut self, component: Component) {
        self.components.insert(component);
    }

    pub fn append_script(&mut self, script: Script) {
        if !self.scripts.contains(&script) {
            self.scripts.push(script);
        }
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    pub fn contains(&self, component: &Component) -> bool {
        self.components.contains(component)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.scripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_are_deduplicated_in_order() {
        let mut target = AjaxTarget::new();
        target.add(Component::FieldBorder("name-border".to_string()));
        target.add(Component::FeedbackPanel);
        target.add(Component::FieldBorder("name-border".to_string()));

        let ids: Vec<String> = target.components().map(Component::markup_id).collect();
        assert_eq!(ids, vec!["name-border", "feedback"]);
    }

    #[test]
    fn test_script_rendering() {
        assert_eq!(Script::UnblockUi.to_string(), "$.unblockUI();");
        assert_eq!(
            Script::EnableButtons {
                form_id: "editForm".to_string()
            }
            .to_string(),
            "$('#editForm button').prop('disabled', false);"
        );
        assert!(Script::ScrollToFeedback.to_string().contains(".feedbackPanel"));
    }
}
