//! Blog list, new-post form, and permalink handlers.

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use quill_db::StoreError;
use quill_types::forms::NewPostForm;

use crate::auth::AppState;
use crate::session;
use crate::views::{self, BlogListView, NewPostView, PermalinkView, render_template, username_of};

/// GET /blog — all posts, newest first.
pub async fn blog_index(State(state): State<AppState>, jar: CookieJar) -> Response {
    let user = session::current_user(&state, &jar).await;

    let db = state.clone();
    let rows = match tokio::task::spawn_blocking(move || db.db.list_posts()).await {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => {
            error!("listing posts failed: {}", e);
            return views::internal_error();
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            return views::internal_error();
        }
    };

    render_template(BlogListView {
        user: username_of(&user),
        posts: rows.into_iter().map(Into::into).collect(),
    })
}

/// GET /blog/newpost — empty form.
pub async fn new_post_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let user = session::current_user(&state, &jar).await;
    render_template(NewPostView {
        user: username_of(&user),
        subject: String::new(),
        blog: String::new(),
        error: String::new(),
    })
}

/// POST /blog/newpost — create and redirect to the permalink, or re-render
/// the form with the entered values.
pub async fn new_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NewPostForm>,
) -> Response {
    let user = session::current_user(&state, &jar).await;

    let db = state.clone();
    let subject = form.subject.clone();
    let body = form.blog.clone();

    let created = tokio::task::spawn_blocking(move || db.db.create_post(&subject, &body)).await;

    match created {
        Ok(Ok(id)) => Redirect::to(&format!("/blog/{id}")).into_response(),
        Ok(Err(StoreError::Validation(_))) => render_template(NewPostView {
            user: username_of(&user),
            subject: form.subject,
            blog: form.blog,
            error: "we need both a subject and blog entry!".into(),
        }),
        Ok(Err(e)) => {
            error!("creating post failed: {}", e);
            views::internal_error()
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            views::internal_error()
        }
    }
}

/// GET /blog/{id} — permalink; non-numeric or unknown ids are a 404.
pub async fn permalink(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(post_id): Path<String>,
) -> Response {
    let Ok(id) = post_id.parse::<i64>() else {
        return views::not_found();
    };

    let user = session::current_user(&state, &jar).await;

    let db = state.clone();
    let post = match tokio::task::spawn_blocking(move || db.db.get_post(id)).await {
        Ok(Ok(post)) => post,
        Ok(Err(e)) => {
            error!("loading post {} failed: {}", id, e);
            return views::internal_error();
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            return views::internal_error();
        }
    };

    match post {
        Some(row) => render_template(PermalinkView {
            user: username_of(&user),
            post: row.into(),
        }),
        None => views::not_found(),
    }
}
