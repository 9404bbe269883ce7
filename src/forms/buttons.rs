//! Form buttons and the actions they trigger

use super::page::{PageLink, PageParameters};

/// Action selected by the pressed button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Delete,
    Cancel,
}

impl FormAction {
    /// Pressed-button name as submitted by the browser; anything else saves
    pub fn from_button(name: Option<&str>) -> Self {
        match name {
            Some("delete") => FormAction::Delete,
            Some("cancel") => FormAction::Cancel,
            _ => FormAction::Save,
        }
    }

    pub fn button_name(&self) -> &'static str {
        match self {
            FormAction::Save => "save",
            FormAction::Delete => "delete",
            FormAction::Cancel => "cancel",
        }
    }
}

/// Save button with its redirect policy.
///
/// `redirect` and `redirect_to_self` are one-shot overrides: after every save
/// they return to `redirect = true`, `redirect_to_self = false`.
#[derive(Clone, Debug)]
pub struct SaveButton {
    pub label: String,
    response_page: Option<PageLink>,
    parameters: Option<PageParameters>,
    redirect: bool,
    redirect_to_self: bool,
}

impl Default for SaveButton {
    fn default() -> Self {
        Self {
            label: "saveButton".to_string(),
            response_page: None,
            parameters: None,
            redirect: true,
            redirect_to_self: false,
        }
    }
}

impl SaveButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page shown after a save; the listing page when unset
    pub fn with_response_page(mut self, page: PageLink) -> Self {
        self.response_page = Some(page);
        self
    }

    pub fn with_parameters(mut self, parameters: PageParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_redirect(mut self, redirect: bool) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn with_redirect_to_self(mut self, redirect_to_self: bool) -> Self {
        self.redirect_to_self = redirect_to_self;
        self
    }

    pub fn set_redirect(&mut self, redirect: bool) {
        self.redirect = redirect;
    }

    pub fn set_redirect_to_self(&mut self, redirect_to_self: bool) {
        self.redirect_to_self = redirect_to_self;
    }

    pub fn redirect(&self) -> bool {
        self.redirect
    }

    pub fn redirect_to_self(&self) -> bool {
        self.redirect_to_self
    }

    /// URL to redirect to after a save
    pub fn redirect_url(&self, list_page: &PageLink) -> String {
        self.response_page
            .as_ref()
            .unwrap_or(list_page)
            .url(self.parameters.as_ref())
    }

    pub(crate) fn reset(&mut self) {
        self.redirect = true;
        self.redirect_to_self = false;
    }
}

#[derive(Clone, Debug)]
pub struct DeleteButton {
    pub label: String,
    pub visible: bool,
}

impl Default for DeleteButton {
    fn default() -> Self {
        Self {
            label: "deleteButton".to_string(),
            visible: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CancelButton {
    pub label: String,
}

impl Default for CancelButton {
    fn default() -> Self {
        Self {
            label: "cancelButton".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_button_name() {
        assert_eq!(FormAction::from_button(Some("delete")), FormAction::Delete);
        assert_eq!(FormAction::from_button(Some("cancel")), FormAction::Cancel);
        assert_eq!(FormAction::from_button(Some("save")), FormAction::Save);
        assert_eq!(FormAction::from_button(None), FormAction::Save);
    }

    #[test]
    fn test_redirect_url_defaults_to_list_page() {
        let list = PageLink::new("/groups");
        assert_eq!(SaveButton::new().redirect_url(&list), "/groups");

        let button = SaveButton::new()
            .with_response_page(PageLink::new("/persons"))
            .with_parameters(PageParameters::new().with("group", 3));
        assert_eq!(button.redirect_url(&list), "/persons?group=3");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut button = SaveButton::new()
            .with_redirect(false)
            .with_redirect_to_self(true);
        button.reset();
        assert!(button.redirect());
        assert!(!button.redirect_to_self());
    }
}
