//! Page and form framework
//!
//! The pieces, leaf first: [`PropertyModel`] gives path access to an entity,
//! [`FieldBinding`]s convert and validate input, the [`ValidationVisitor`]
//! marks invalid fields, [`EditForm`] ties bindings and buttons to one entity
//! and [`EditPage`] runs the open / save / delete / cancel lifecycle.

pub mod ajax;
pub mod buttons;
pub mod choices;
pub mod edit_form;
pub mod edit_page;
pub mod feedback;
pub mod field;
pub mod model;
pub mod page;
pub mod validation;
pub mod view;

pub use ajax::{AjaxTarget, Component, Script};
pub use buttons::{CancelButton, DeleteButton, FormAction, SaveButton};
pub use choices::{ChoiceProvider, StaticChoices};
pub use edit_form::{EditForm, FormInput, FORM_ID};
pub use edit_page::{ActionOutcome, EditPage, EditPageBuilder, EditPageDefinition};
pub use feedback::{FeedbackLevel, FeedbackMessage};
pub use field::{Choice, FieldBinding, FieldDescriptor, FieldKind, Validator};
pub use model::PropertyModel;
pub use page::{PageLink, PageParameters, PARAM_ID, PARAM_VIEW_MODE};
pub use validation::ValidationVisitor;
pub use view::{EditPageView, FieldView};
