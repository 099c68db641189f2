//! Signup, login, and logout handlers.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info};

use quill_crypto::Signer;
use quill_db::{Database, StoreError};
use quill_types::forms::{LoginForm, SignupForm};
use quill_types::validate::check_signup;

use crate::session;
use crate::views::{self, LoginView, SignupView, render_template};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub signer: Signer,
}

pub async fn signup_page() -> Response {
    render_template(SignupView::empty())
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Response {
    let errors = check_signup(&form);
    if errors.any() {
        // Re-render with the entered username/email; never echo the password.
        return render_template(SignupView {
            username: form.username,
            email: form.email,
            error_username: errors.username.into(),
            error_password: errors.password.into(),
            error_verify: errors.verify.into(),
            error_email: errors.email.into(),
            ..SignupView::empty()
        });
    }

    let db = state.clone();
    let name = form.username.clone();
    let password = form.password.clone();
    let email = form.email_opt().map(str::to_owned);

    let registered = tokio::task::spawn_blocking(move || {
        db.db.register(&name, &password, email.as_deref())
    })
    .await;

    match registered {
        Ok(Ok(user)) => {
            info!("registered user {}", user.name);
            let jar = session::establish(&state, jar, user.id);
            (jar, Redirect::to("/blog")).into_response()
        }
        Ok(Err(StoreError::DuplicateUser)) => render_template(SignupView {
            username: form.username,
            email: form.email,
            error_username: "That user already exists".into(),
            ..SignupView::empty()
        }),
        Ok(Err(e)) => {
            error!("registration failed: {}", e);
            views::internal_error()
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            views::internal_error()
        }
    }
}

pub async fn login_page() -> Response {
    render_template(LoginView::empty())
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let db = state.clone();
    let name = form.username.clone();
    let password = form.password.clone();

    let authenticated =
        tokio::task::spawn_blocking(move || db.db.authenticate(&name, &password)).await;

    match authenticated {
        Ok(Ok(Some(user))) => {
            let jar = session::establish(&state, jar, user.id);
            (jar, Redirect::to("/blog")).into_response()
        }
        // Unknown user and wrong password get the same message.
        Ok(Ok(None)) => render_template(LoginView {
            username: form.username,
            error: "Invalid login".into(),
            ..LoginView::empty()
        }),
        Ok(Err(e)) => {
            error!("login query failed: {}", e);
            views::internal_error()
        }
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            views::internal_error()
        }
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    (session::clear(jar), Redirect::to("/blog")).into_response()
}
