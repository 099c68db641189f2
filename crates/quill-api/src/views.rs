//! View models for the HTML pages.
//!
//! Each page gets a typed struct rendered by an askama template; handlers
//! never build HTML strings by hand. `user` is the logged-in username shown
//! in the header, empty for anonymous requests.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use quill_db::models::{PostRow, UserRow};

/// A post formatted for display.
#[derive(Debug, Clone)]
pub struct PostView {
    pub id: i64,
    pub subject: String,
    pub body: String,
    pub created: String,
}

impl From<PostRow> for PostView {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            subject: row.subject,
            body: row.body,
            created: format_timestamp(&row.created),
        }
    }
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" (UTC, no timezone).
/// Fall back to the raw string rather than dropping the post.
fn format_timestamp(raw: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%b %e, %Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

pub fn username_of(user: &Option<UserRow>) -> String {
    user.as_ref().map(|u| u.name.clone()).unwrap_or_default()
}

#[derive(Template)]
#[template(path = "main.html")]
pub struct BlogListView {
    pub user: String,
    pub posts: Vec<PostView>,
}

#[derive(Template)]
#[template(path = "permalink.html")]
pub struct PermalinkView {
    pub user: String,
    pub post: PostView,
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct NewPostView {
    pub user: String,
    pub subject: String,
    pub blog: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "signup-form.html")]
pub struct SignupView {
    pub user: String,
    pub username: String,
    pub email: String,
    pub error_username: String,
    pub error_password: String,
    pub error_verify: String,
    pub error_email: String,
}

impl SignupView {
    pub fn empty() -> Self {
        Self {
            user: String::new(),
            username: String::new(),
            email: String::new(),
            error_username: String::new(),
            error_password: String::new(),
            error_verify: String::new(),
            error_email: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "login-form.html")]
pub struct LoginView {
    pub user: String,
    pub username: String,
    pub error: String,
}

impl LoginView {
    pub fn empty() -> Self {
        Self {
            user: String::new(),
            username: String::new(),
            error: String::new(),
        }
    }
}

/// Render a template, logging and degrading to a 500 on failure.
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering error").into_response()
        }
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

pub fn internal_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
