//! Edit page lifecycle
//!
//! An [`EditPageDefinition`] is built once at start-up and shared. For every
//! request an [`EditPage`] is opened from it: the entity is loaded by the `id`
//! parameter (or created blank), select choices are resolved and the
//! [`EditForm`] is bound. A submit then runs exactly one [`FormAction`] and
//! reports where the browser should go next as an [`ActionOutcome`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ajax::{AjaxTarget, Component, Script};
use super::buttons::{DeleteButton, FormAction, SaveButton};
use super::choices::ChoiceProvider;
use super::edit_form::{EditForm, FormInput};
use super::feedback::FeedbackMessage;
use super::field::FieldDescriptor;
use super::model::PropertyModel;
use super::page::{PageLink, PageParameters, PARAM_ID};
use super::validation::ValidationVisitor;
use crate::cache::{CacheInvalidator, NoopInvalidator};
use crate::errors::{EditPageError, EditPageResult};
use crate::i18n::Messages;
use crate::persistence::{Persistable, Repository};

pub type EntityFactory<T> = Arc<dyn Fn() -> Option<T> + Send + Sync>;
pub type SaveButtonFactory = Arc<dyn Fn() -> SaveButton + Send + Sync>;
pub type DeleteButtonFactory = Arc<dyn Fn() -> DeleteButton + Send + Sync>;

/// Where the browser goes after an action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Redirect(String),
    /// Re-render the current page, or apply the queued partial updates
    Stay,
}

pub struct EditPageDefinition<T: Persistable> {
    name: String,
    title: String,
    repository: Arc<dyn Repository<T>>,
    list_page: PageLink,
    edit_path: String,
    new_instance: EntityFactory<T>,
    fields: Vec<FieldDescriptor>,
    choice_providers: Vec<(String, Arc<dyn ChoiceProvider>)>,
    save_button: SaveButtonFactory,
    delete_button: DeleteButtonFactory,
    invalidator: Arc<dyn CacheInvalidator>,
    messages: Arc<Messages>,
}

impl<T: Persistable> EditPageDefinition<T> {
    pub fn builder(name: impl Into<String>) -> EditPageBuilder<T> {
        EditPageBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Message key of the page title
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn list_page(&self) -> &PageLink {
        &self.list_page
    }

    /// Path the edit form posts to
    pub fn edit_path(&self) -> &str {
        &self.edit_path
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn repository(&self) -> &Arc<dyn Repository<T>> {
        &self.repository
    }
}

pub struct EditPageBuilder<T: Persistable> {
    name: String,
    title: Option<String>,
    repository: Option<Arc<dyn Repository<T>>>,
    list_page: Option<PageLink>,
    edit_path: Option<String>,
    new_instance: Option<EntityFactory<T>>,
    fields: Vec<FieldDescriptor>,
    choice_providers: Vec<(String, Arc<dyn ChoiceProvider>)>,
    save_button: Option<SaveButtonFactory>,
    delete_button: Option<DeleteButtonFactory>,
    invalidator: Option<Arc<dyn CacheInvalidator>>,
    messages: Option<Arc<Messages>>,
}

impl<T: Persistable> EditPageBuilder<T> {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            repository: None,
            list_page: None,
            edit_path: None,
            new_instance: None,
            fields: Vec::new(),
            choice_providers: Vec::new(),
            save_button: None,
            delete_button: None,
            invalidator: None,
            messages: None,
        }
    }

    pub fn title(mut self, key: impl Into<String>) -> Self {
        self.title = Some(key.into());
        self
    }

    pub fn repository(mut self, repository: Arc<dyn Repository<T>>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn list_page(mut self, page: PageLink) -> Self {
        self.list_page = Some(page);
        self
    }

    pub fn edit_path(mut self, path: impl Into<String>) -> Self {
        self.edit_path = Some(path.into());
        self
    }

    /// Factory for the blank entity of a page opened without an identifier.
    /// Returning `None` opens the page without a model.
    pub fn new_instance<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Option<T> + Send + Sync + 'static,
    {
        self.new_instance = Some(Arc::new(factory));
        self
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn choices(mut self, path: impl Into<String>, provider: Arc<dyn ChoiceProvider>) -> Self {
        self.choice_providers.push((path.into(), provider));
        self
    }

    pub fn save_button<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> SaveButton + Send + Sync + 'static,
    {
        self.save_button = Some(Arc::new(factory));
        self
    }

    pub fn delete_button<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> DeleteButton + Send + Sync + 'static,
    {
        self.delete_button = Some(Arc::new(factory));
        self
    }

    pub fn cache_invalidator(mut self, invalidator: Arc<dyn CacheInvalidator>) -> Self {
        self.invalidator = Some(invalidator);
        self
    }

    pub fn messages(mut self, messages: Arc<Messages>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn build(self) -> EditPageResult<EditPageDefinition<T>> {
        let repository = self
            .repository
            .ok_or_else(|| EditPageError::MissingRepository(self.name.clone()))?;
        let list_page = self
            .list_page
            .ok_or_else(|| EditPageError::MissingListPage(self.name.clone()))?;

        let edit_path = self
            .edit_path
            .unwrap_or_else(|| format!("{}/edit", list_page.path().trim_end_matches('/')));

        Ok(EditPageDefinition {
            title: self.title.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            repository,
            list_page,
            edit_path,
            new_instance: self.new_instance.unwrap_or_else(|| Arc::new(|| None)),
            fields: self.fields,
            choice_providers: self.choice_providers,
            save_button: self.save_button.unwrap_or_else(|| Arc::new(SaveButton::default)),
            delete_button: self
                .delete_button
                .unwrap_or_else(|| Arc::new(DeleteButton::default)),
            invalidator: self
                .invalidator
                .unwrap_or_else(|| Arc::new(NoopInvalidator)),
            messages: self.messages.unwrap_or_default(),
        })
    }
}

/// One request's view of an edit page
pub struct EditPage<T: Persistable> {
    definition: Arc<EditPageDefinition<T>>,
    parameters: PageParameters,
    entity_id: Option<i64>,
    form: EditForm<T>,
    feedback: Vec<FeedbackMessage>,
    target: AjaxTarget,
}

impl<T: Persistable> EditPage<T> {
    pub async fn open(
        definition: Arc<EditPageDefinition<T>>,
        parameters: PageParameters,
    ) -> EditPageResult<Self> {
        let entity_id = parameters.get_i64(PARAM_ID)?;

        let entity = match entity_id {
            Some(id) => {
                let entity = definition.repository.find_by_id(id).await?;
                Some(entity.ok_or_else(|| EditPageError::EntityNotFound {
                    page: definition.name.clone(),
                    id,
                })?)
            }
            None => (definition.new_instance)(),
        };

        if entity.is_none() {
            debug!("Edit page '{}' opened without a model", definition.name);
        }

        let mut choices = HashMap::new();
        for (path, provider) in &definition.choice_providers {
            let options = provider
                .choices()
                .await
                .map_err(|e| EditPageError::Choices {
                    field: path.clone(),
                    reason: e.to_string(),
                })?;
            choices.insert(path.clone(), options);
        }

        let mut delete_button = (definition.delete_button)();
        delete_button.visible = delete_button.visible && entity_id.is_some();

        let form = EditForm::new(entity.map(PropertyModel::new), &definition.fields, &choices)?
            .with_buttons((definition.save_button)(), delete_button)
            .with_view_mode(parameters.is_view_mode());

        info!(
            "Opened edit page '{}' for {}",
            definition.name,
            entity_id.map_or_else(|| "new entity".to_string(), |id| format!("id {}", id))
        );

        Ok(Self {
            definition,
            parameters,
            entity_id,
            form,
            feedback: Vec::new(),
            target: AjaxTarget::new(),
        })
    }

    pub fn definition(&self) -> &EditPageDefinition<T> {
        &self.definition
    }

    pub fn parameters(&self) -> &PageParameters {
        &self.parameters
    }

    /// Identifier of the bound entity, once it is persisted
    pub fn entity_id(&self) -> Option<i64> {
        self.entity_id
    }

    pub fn form(&self) -> &EditForm<T> {
        &self.form
    }

    pub fn save_button_mut(&mut self) -> &mut SaveButton {
        &mut self.form.save_button
    }

    pub fn feedback(&self) -> &[FeedbackMessage] {
        &self.feedback
    }

    /// Components and scripts queued by the last action
    pub fn target(&self) -> &AjaxTarget {
        &self.target
    }

    /// URL the edit form posts to
    pub fn action_url(&self) -> String {
        let parameters = self
            .entity_id
            .map(|id| PageParameters::new().with(PARAM_ID, id));
        PageLink::new(self.definition.edit_path.clone()).url(parameters.as_ref())
    }

    pub async fn submit(&mut self, action: FormAction, input: &FormInput) -> EditPageResult<ActionOutcome> {
        match action {
            FormAction::Save => self.save(input).await,
            FormAction::Delete => self.delete().await,
            FormAction::Cancel => Ok(self.cancel()),
        }
    }

    pub async fn save(&mut self, input: &FormInput) -> EditPageResult<ActionOutcome> {
        if self.form.model().is_none() {
            return Err(EditPageError::NoModel(self.definition.name.clone()));
        }

        if !self.form.process_input(input, &self.definition.messages) {
            self.on_error();
            return Ok(ActionOutcome::Stay);
        }

        let persisted = self.persist().await;

        let button = &mut self.form.save_button;
        let (redirect, redirect_to_self) = (button.redirect(), button.redirect_to_self());
        let redirect_url = button.redirect_url(&self.definition.list_page);
        button.reset();

        match persisted {
            Ok(()) => {}
            Err(EditPageError::Repository(err)) if err.is_constraint_violation() => {
                warn!(
                    "Save of '{}' entity {:?} rejected: {}",
                    self.definition.name, self.entity_id, err
                );
                self.feedback.push(
                    FeedbackMessage::error(self.definition.messages.get("save_error_message")).sticky(),
                );
                self.target.add(Component::FeedbackPanel);
                return Ok(ActionOutcome::Stay);
            }
            Err(err) => return Err(err),
        }

        if redirect_to_self {
            self.target.add(Component::Form(self.form.markup_id().to_string()));
            self.target.append_script(Script::UnblockUi);
            self.target.append_script(Script::EnableButtons {
                form_id: self.form.markup_id().to_string(),
            });
            Ok(ActionOutcome::Stay)
        } else if redirect {
            Ok(ActionOutcome::Redirect(redirect_url))
        } else {
            Ok(ActionOutcome::Stay)
        }
    }

    async fn persist(&mut self) -> EditPageResult<()> {
        self.form.update_model()?;
        let entity = self
            .form
            .entity()
            .cloned()
            .ok_or_else(|| EditPageError::NoModel(self.definition.name.clone()))?;

        let saved = self.definition.repository.save_and_flush(entity).await?;
        self.entity_id = saved.id();
        self.form.replace_entity(saved)?;
        self.form.delete_button.visible = self.entity_id.is_some();

        self.definition.invalidator.flush_cache().await;
        info!(
            "Saved '{}' entity {:?}",
            self.definition.name, self.entity_id
        );
        Ok(())
    }

    /// Invalid submit: show every field error, the global message, and unfold
    /// the section of the last invalid field
    fn on_error(&mut self) {
        let mut visitor = ValidationVisitor::new(&mut self.target);
        visitor.visit_all(self.form.fields());
        let last_invalid = visitor.last_invalid();

        self.feedback.push(FeedbackMessage::error(
            self.definition.messages.get("formHasErrors"),
        ));
        self.target.add(Component::FeedbackPanel);
        self.target.append_script(Script::ScrollToFeedback);

        let section = last_invalid
            .and_then(|index| self.form.fields().get(index))
            .and_then(|field| field.descriptor.section.clone());
        if let Some(section) = section {
            self.target.append_script(Script::ExpandSection { section });
        }

        debug!("Edit page '{}' submitted with errors", self.definition.name);
    }

    pub async fn delete(&mut self) -> EditPageResult<ActionOutcome> {
        let entity = self
            .form
            .entity()
            .ok_or_else(|| EditPageError::NoModel(self.definition.name.clone()))?;

        if entity.is_new() {
            debug!(
                "Delete on unsaved '{}' entity, returning to the list",
                self.definition.name
            );
            return Ok(ActionOutcome::Redirect(self.definition.list_page.url(None)));
        }

        match self.definition.repository.delete(entity).await {
            Ok(()) => {
                self.definition.invalidator.flush_cache().await;
                info!(
                    "Deleted '{}' entity {:?}",
                    self.definition.name, self.entity_id
                );
                Ok(ActionOutcome::Redirect(self.definition.list_page.url(None)))
            }
            Err(err) if err.is_constraint_violation() => {
                warn!(
                    "Delete of '{}' entity {:?} blocked: {}",
                    self.definition.name, self.entity_id, err
                );
                self.feedback.push(
                    FeedbackMessage::error(self.definition.messages.get("delete_error_message")).sticky(),
                );
                self.target.add(Component::FeedbackPanel);
                Ok(ActionOutcome::Stay)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn cancel(&mut self) -> ActionOutcome {
        debug!("Edit page '{}' cancelled", self.definition.name);
        ActionOutcome::Redirect(self.definition.list_page.url(None))
    }
}
