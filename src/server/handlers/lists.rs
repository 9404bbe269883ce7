use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Serialize;
use std::collections::HashMap;

use crate::forms::{PageLink, PageParameters, PARAM_ID};
use crate::server::app::AppState;
use crate::server::error::PageError;
use crate::server::pages::GROUPS_PATH;

#[derive(Debug, Serialize)]
struct ListView {
    title: String,
    new_url: String,
    new_label: String,
    edit_label: String,
    empty_label: String,
    columns: Vec<String>,
    rows: Vec<RowView>,
}

#[derive(Debug, Serialize)]
struct RowView {
    edit_url: String,
    cells: Vec<String>,
}

impl ListView {
    fn new(state: &AppState, title: &str, edit_path: &str, columns: &[&str]) -> Self {
        let messages = &state.messages;
        Self {
            title: messages.get(title),
            new_url: edit_path.to_string(),
            new_label: messages.get("list.new"),
            edit_label: messages.get("list.edit"),
            empty_label: messages.get("list.empty"),
            columns: columns.iter().map(|key| messages.get(key)).collect(),
            rows: Vec::new(),
        }
    }
}

fn edit_url(edit_path: &str, id: i64) -> String {
    PageLink::new(edit_path).url(Some(&PageParameters::new().with(PARAM_ID, id)))
}

pub async fn index() -> Redirect {
    Redirect::to(GROUPS_PATH)
}

pub async fn list_groups(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let summary = state
        .reports
        .group_summary()
        .await
        .map_err(|e| state.internal_error(e))?;

    let edit_path = state.groups.edit_path();
    let mut view = ListView::new(
        &state,
        "group.list",
        edit_path,
        &["group.name", "group.description", "group.personCount"],
    );
    view.rows = summary
        .into_iter()
        .map(|group| RowView {
            edit_url: edit_url(edit_path, group.id),
            cells: vec![
                group.name,
                group.description.unwrap_or_default(),
                group.person_count.to_string(),
            ],
        })
        .collect();

    state.render("list_page", &view).map(Html)
}

pub async fn list_persons(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let persons = state
        .persons
        .repository()
        .find_all()
        .await
        .map_err(|e| state.internal_error(e))?;
    let group_names: HashMap<i64, String> = state
        .reports
        .group_summary()
        .await
        .map_err(|e| state.internal_error(e))?
        .into_iter()
        .map(|group| (group.id, group.name))
        .collect();

    let edit_path = state.persons.edit_path();
    let mut view = ListView::new(
        &state,
        "person.list",
        edit_path,
        &[
            "person.lastName",
            "person.firstName",
            "person.email",
            "person.group",
            "person.enabled",
        ],
    );
    view.rows = persons
        .into_iter()
        .filter_map(|person| {
            let id = person.id?;
            let group = person
                .group_id
                .and_then(|group_id| group_names.get(&group_id).cloned())
                .unwrap_or_default();
            Some(RowView {
                edit_url: edit_url(edit_path, id),
                cells: vec![
                    person.last_name,
                    person.first_name,
                    person.email.unwrap_or_default(),
                    group,
                    if person.enabled { "✓" } else { "" }.to_string(),
                ],
            })
        })
        .collect();

    state.render("list_page", &view).map(Html)
}

pub async fn not_found(State(state): State<AppState>) -> PageError {
    state.error_page(StatusCode::NOT_FOUND, "Page not found")
}
