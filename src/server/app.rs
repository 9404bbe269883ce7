use axum::{
    http::{HeaderValue, StatusCode},
    routing::get,
    Router,
};
use handlebars::Handlebars;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use anyhow::{Context, Result};
use tracing::error;

use super::error::PageError;
use super::handlers::{edit, files, health, lists};
use super::pages::{group_page, person_page};
use crate::cache::ReportsCache;
use crate::common::get_page_templates;
use crate::config::ReportSettings;
use crate::domain::{Group, Person};
use crate::errors::EditPageError;
use crate::forms::EditPageDefinition;
use crate::i18n::Messages;
use crate::services::ReportService;
use crate::storage::DbFileStorage;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub templates: Arc<Handlebars<'static>>,
    pub messages: Arc<Messages>,
    pub reports: Arc<ReportService>,
    pub storage: Arc<DbFileStorage>,
    pub groups: Arc<EditPageDefinition<Group>>,
    pub persons: Arc<EditPageDefinition<Person>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, messages: Messages, reports: &ReportSettings) -> Result<Self> {
        let templates = get_page_templates().context("Failed to register page templates")?;
        let messages = Arc::new(messages);
        let cache = ReportsCache::new("reports", reports.capacity, reports.ttl());
        let reports = Arc::new(ReportService::new(db.clone(), cache));

        let groups = group_page(db.clone(), messages.clone(), reports.invalidator())?;
        let persons = person_page(db.clone(), messages.clone(), reports.invalidator())?;

        Ok(Self {
            storage: Arc::new(DbFileStorage::new(db.clone())),
            db,
            templates: Arc::new(templates),
            messages,
            reports,
            groups: Arc::new(groups),
            persons: Arc::new(persons),
        })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, PageError> {
        self.templates.render(template, data).map_err(|e| {
            error!("Failed to render template '{}': {}", template, e);
            PageError::plain(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
        })
    }

    pub fn error_page(&self, status: StatusCode, message: impl Display) -> PageError {
        let message = message.to_string();
        let data = json!({
            "title": status.canonical_reason().unwrap_or("Error"),
            "status": status.as_u16(),
            "message": message,
        });
        match self.templates.render("error_page", &data) {
            Ok(body) => PageError { status, body },
            Err(e) => {
                error!("Failed to render error page: {}", e);
                PageError::plain(status, &message)
            }
        }
    }

    pub fn edit_page_error(&self, err: EditPageError) -> PageError {
        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Edit page failed: {}", err);
            self.error_page(status, "An internal error occurred")
        } else {
            self.error_page(status, err)
        }
    }

    pub fn internal_error(&self, err: impl Display) -> PageError {
        error!("Request failed: {}", err);
        self.error_page(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred")
    }
}

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState::new(db, Messages::default(), &ReportSettings::default())?;
    create_app_with_state(state, cors_origin)
}

pub fn create_app_with_state(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let cors = match cors_origin {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", origin))?,
            )
            .allow_methods(Any)
            .allow_headers(Any),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/", get(lists::index))
        .route("/health", get(health::health_check))
        .route("/groups", get(lists::list_groups))
        .route("/groups/edit", get(edit::show_group).post(edit::submit_group))
        .route("/persons", get(lists::list_persons))
        .route("/persons/edit", get(edit::show_person).post(edit::submit_person))
        .route(
            "/files/:name",
            get(files::get_file).put(files::put_file).delete(files::delete_file),
        )
        .fallback(lists::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}
