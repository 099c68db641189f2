use axum::Router;
use axum::routing::get;

use crate::auth::{self, AppState};
use crate::{pages, posts};

/// The full route table. Layers (tracing, etc.) are applied by the server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(posts::blog_index))
        .route("/blog/newpost", get(posts::new_post_page).post(posts::new_post))
        .route("/blog/{id}", get(posts::permalink))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/welcome", get(pages::welcome))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .with_state(state)
}
