//! HTTP tests for the admin pages and file endpoints

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::Database;
use serde_json::Value;
use tempfile::NamedTempFile;
use toolkit::database::connection::setup_database;
use toolkit::server::app::create_app;

/// Create a test server backed by a fresh sqlite file
async fn setup_test_server() -> Result<(TestServer, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let app = create_app(db, Some("*")).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file))
}

fn ajax_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    )
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "admin-toolkit");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_index_redirects_to_groups() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/groups");

    Ok(())
}

#[tokio::test]
async fn test_new_group_page_renders_blank_form() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/groups/edit").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains(r#"id="editForm""#));
    assert!(html.contains(r#"name="name""#));
    assert!(html.contains("required"));
    assert!(html.contains(r#"name="save""#));
    assert!(!html.contains(r#"name="delete""#));

    Ok(())
}

#[tokio::test]
async fn test_create_group_redirects_to_listing() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/groups/edit")
        .form(&[("name", "Admins"), ("description", "Full access"), ("save", "save")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/groups");

    let listing = server.get("/groups").await;
    assert_eq!(listing.status_code(), StatusCode::OK);
    let html = listing.text();
    assert!(html.contains("Admins"));
    assert!(html.contains("Full access"));
    assert!(html.contains("/groups/edit?id=1"));

    let edit = server.get("/groups/edit").add_query_param("id", 1).await;
    assert_eq!(edit.status_code(), StatusCode::OK);
    let html = edit.text();
    assert!(html.contains(r#"value="Admins""#));
    assert!(html.contains(r#"name="delete""#));

    Ok(())
}

#[tokio::test]
async fn test_invalid_submit_rerenders_with_errors() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/groups/edit")
        .form(&[("name", ""), ("save", "save")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("The form has errors."));
    assert!(html.contains("has-errors"));

    let listing = server.get("/groups").await.text();
    assert!(listing.contains("Nothing here yet."));

    Ok(())
}

#[tokio::test]
async fn test_ajax_invalid_submit_returns_partial_update() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    let (name, value) = ajax_header();

    let response = server
        .post("/persons/edit")
        .add_header(name, value)
        .form(&[("first_name", "Ada"), ("last_name", ""), ("email", "nope")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(body["redirect"].is_null());

    let ids: Vec<&str> = body["components"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["last_name-border", "email-border", "feedback"]);

    let scripts: Vec<&str> = body["scripts"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s.as_str())
        .collect();
    assert_eq!(scripts.len(), 2);
    assert!(scripts[1].contains("section-details"));

    Ok(())
}

#[tokio::test]
async fn test_ajax_save_returns_redirect() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    let (name, value) = ajax_header();

    let response = server
        .post("/groups/edit")
        .add_header(name, value)
        .form(&[("name", "Editors")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["redirect"], "/groups");

    Ok(())
}

#[tokio::test]
async fn test_person_with_group_blocks_group_delete() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    server
        .post("/groups/edit")
        .form(&[("name", "Admins")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let person_form = server.get("/persons/edit").await.text();
    assert!(person_form.contains(r#"<option value="1">Admins</option>"#));

    server
        .post("/persons/edit")
        .form(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.org"),
            ("group_id", "1"),
            ("enabled", "on"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let persons = server.get("/persons").await.text();
    assert!(persons.contains("Lovelace"));
    assert!(persons.contains("Admins"));

    let groups = server.get("/groups").await.text();
    assert!(groups.contains("<td>1</td>"));

    let response = server
        .post("/groups/edit")
        .add_query_param("id", 1)
        .form(&[("delete", "delete")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("cannot be deleted"));

    // Remove the member, then the group can go
    server
        .post("/persons/edit")
        .add_query_param("id", 1)
        .form(&[("delete", "delete")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let response = server
        .post("/groups/edit")
        .add_query_param("id", 1)
        .form(&[("delete", "delete")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/groups");

    server
        .get("/groups/edit")
        .add_query_param("id", 1)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_group_name_keeps_input() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    server
        .post("/groups/edit")
        .form(&[("name", "Admins"), ("save", "save")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let response = server
        .post("/groups/edit")
        .form(&[("name", "Admins"), ("description", "Second"), ("save", "save")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("conflicts with an existing record"));
    assert!(html.contains(r#"value="Admins""#));
    assert!(html.contains("Second"));

    let listing = server.get("/groups").await.text();
    assert!(!listing.contains("/groups/edit?id=2"));

    Ok(())
}

#[tokio::test]
async fn test_delete_on_new_page_returns_to_listing() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/groups/edit")
        .form(&[("name", "Unsaved"), ("delete", "delete")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/groups");
    assert!(!server.get("/groups").await.text().contains("Unsaved"));

    Ok(())
}

#[tokio::test]
async fn test_cancel_redirects_without_saving() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server
        .post("/groups/edit")
        .form(&[("name", "Ignored"), ("cancel", "cancel")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/groups");
    assert!(!server.get("/groups").await.text().contains("Ignored"));

    Ok(())
}

#[tokio::test]
async fn test_error_pages() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/groups/edit").add_query_param("id", 42).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("group 42 not found"));

    let response = server.get("/groups/edit").add_query_param("id", "abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/no/such/page").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_print_view() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    server
        .post("/groups/edit")
        .form(&[("name", "Admins")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let html = server
        .get("/groups/edit")
        .add_query_param("id", 1)
        .add_query_param("view", "print")
        .await
        .text();
    assert!(html.contains("print-view"));
    assert!(!html.contains(r#"name="save""#));

    Ok(())
}

#[tokio::test]
async fn test_file_endpoints() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    server
        .get("/files/logo.png")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .put("/files/logo.png")
        .bytes(vec![1u8, 2, 3].into())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/files/logo.png").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().to_vec(), vec![1u8, 2, 3]);

    server
        .delete("/files/logo.png")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/files/logo.png")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    Ok(())
}
