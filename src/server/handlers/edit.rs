//! Edit page endpoints
//!
//! `GET` renders the page. `POST` runs the action of the pressed button. Plain
//! form posts get a `303` redirect or the re-rendered page; requests sent with
//! `X-Requested-With: XMLHttpRequest` get a JSON description of the partial
//! update instead.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Json, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::forms::{
    ActionOutcome, Component, EditPage, EditPageDefinition, EditPageView, FormAction, FormInput,
    PageParameters,
};
use crate::persistence::Persistable;
use crate::server::app::AppState;
use crate::server::error::PageError;

type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Serialize)]
pub struct ComponentMarkup {
    pub id: String,
    pub markup: String,
}

#[derive(Debug, Serialize)]
pub struct AjaxResponse {
    pub redirect: Option<String>,
    pub components: Vec<ComponentMarkup>,
    pub scripts: Vec<String>,
}

pub async fn show_group(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Html<String>, PageError> {
    let definition = state.groups.clone();
    show(&state, definition, query).await
}

pub async fn submit_group(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
    Form(input): Form<FormInput>,
) -> Result<Response, PageError> {
    let definition = state.groups.clone();
    submit(&state, definition, query, &headers, input).await
}

pub async fn show_person(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Html<String>, PageError> {
    let definition = state.persons.clone();
    show(&state, definition, query).await
}

pub async fn submit_person(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
    headers: HeaderMap,
    Form(input): Form<FormInput>,
) -> Result<Response, PageError> {
    let definition = state.persons.clone();
    submit(&state, definition, query, &headers, input).await
}

async fn show<T: Persistable>(
    state: &AppState,
    definition: Arc<EditPageDefinition<T>>,
    query: QueryPairs,
) -> Result<Html<String>, PageError> {
    let page = EditPage::open(definition, query.into_iter().collect::<PageParameters>())
        .await
        .map_err(|e| state.edit_page_error(e))?;
    render_page(state, &page)
}

async fn submit<T: Persistable>(
    state: &AppState,
    definition: Arc<EditPageDefinition<T>>,
    query: QueryPairs,
    headers: &HeaderMap,
    input: FormInput,
) -> Result<Response, PageError> {
    let mut page = EditPage::open(definition, query.into_iter().collect::<PageParameters>())
        .await
        .map_err(|e| state.edit_page_error(e))?;

    let action = pressed_button(&input);
    debug!("Submitting '{}' with action {:?}", page.definition().name(), action);

    let outcome = page
        .submit(action, &input)
        .await
        .map_err(|e| state.edit_page_error(e))?;

    if is_ajax(headers) {
        return ajax_response(state, &page, outcome).map(IntoResponse::into_response);
    }

    match outcome {
        ActionOutcome::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        ActionOutcome::Stay => render_page(state, &page).map(IntoResponse::into_response),
    }
}

/// Browsers only send the name of the button that was pressed
fn pressed_button(input: &FormInput) -> FormAction {
    let name = ["delete", "cancel", "save"]
        .into_iter()
        .find(|name| input.contains_key(*name));
    FormAction::from_button(name)
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
}

fn render_page<T: Persistable>(state: &AppState, page: &EditPage<T>) -> Result<Html<String>, PageError> {
    let view = EditPageView::from_page(page);
    state.render("edit_page", &view).map(Html)
}

fn ajax_response<T: Persistable>(
    state: &AppState,
    page: &EditPage<T>,
    outcome: ActionOutcome,
) -> Result<Json<AjaxResponse>, PageError> {
    let redirect = match outcome {
        ActionOutcome::Redirect(url) => Some(url),
        ActionOutcome::Stay => None,
    };

    let view = EditPageView::from_page(page);
    let mut components = Vec::new();
    for component in page.target().components() {
        let markup = match component {
            Component::FeedbackPanel => state.render("feedback_panel", &view)?,
            Component::Form(_) => state.render("edit_form", &view)?,
            Component::FieldBorder(id) => match view.field_by_border_id(id) {
                Some(field) => state.render("field", field)?,
                None => continue,
            },
        };
        components.push(ComponentMarkup {
            id: component.markup_id(),
            markup,
        });
    }

    Ok(Json(AjaxResponse {
        redirect,
        components,
        scripts: page.target().scripts().iter().map(ToString::to_string).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn input(keys: &[&str]) -> FormInput {
        keys.iter().map(|k| (k.to_string(), String::new())).collect()
    }

    #[test]
    fn test_pressed_button() {
        assert_eq!(pressed_button(&input(&["name", "delete"])), FormAction::Delete);
        assert_eq!(pressed_button(&input(&["cancel"])), FormAction::Cancel);
        assert_eq!(pressed_button(&input(&["name"])), FormAction::Save);
    }

    #[test]
    fn test_is_ajax() {
        let mut headers = HeaderMap::new();
        assert!(!is_ajax(&headers));
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_ajax(&headers));
    }
}
