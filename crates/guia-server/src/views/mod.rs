//! HTML pages. Every template extends `base.html`, which reads the
//! [`Layout`] field.

pub mod detail;
pub mod listing;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, Utc};

/// Shared header/footer data.
pub struct Layout {
    pub title: String,
    pub year: i32,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: Utc::now().year(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub message: String,
    pub back_href: Option<String>,
}

/// A template rendered with an explicit status code.
pub struct HtmlPage<T>(pub StatusCode, pub T);

impl<T: Template> IntoResponse for HtmlPage<T> {
    fn into_response(self) -> Response {
        let HtmlPage(status, template) = self;
        match template.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
