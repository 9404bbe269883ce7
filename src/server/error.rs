use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Rendered HTML error page
#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub body: String,
}

impl PageError {
    /// Error page without the layout, used when template rendering itself fails
    pub fn plain(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: format!(
                "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p></body></html>",
                status,
                handlebars::html_escape(message)
            ),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.body)).into_response()
    }
}
