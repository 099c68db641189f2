//! End-to-end route tests against the full router with an in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use quill_api::{AppStateInner, router};
use quill_crypto::Signer;

const TEST_SECRET: &str = "test-secret";

fn app() -> Router {
    let db = quill_db::Database::open_in_memory().expect("in-memory db");
    router(Arc::new(AppStateInner {
        db,
        signer: Signer::new(TEST_SECRET),
    }))
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> axum::response::Response {
    let mut req = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, path: &str, body: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `user_id=<value>` pair from a Set-Cookie header.
fn session_cookie(res: &axum::response::Response) -> Option<String> {
    let raw = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();
    pair.starts_with("user_id=").then(|| pair.to_owned())
}

#[tokio::test]
async fn placeholder_pages() {
    let app = app();

    let res = get(&app, "/", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "Main Page Holder");

    let res = get(&app, "/welcome", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "WELCOME!");
}

#[tokio::test]
async fn signup_sets_verifiable_session_and_redirects() {
    let app = app();

    let res = post_form(
        &app,
        "/signup",
        "username=alice&password=secret1&verify=secret1&email=",
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/blog");

    let cookie = session_cookie(&res).expect("session cookie set");
    let signed = cookie.strip_prefix("user_id=").unwrap();
    let uid = Signer::new(TEST_SECRET).verify(signed).expect("cookie verifies");
    assert!(uid.parse::<i64>().is_ok());

    // The cookie authenticates the next request.
    let res = get(&app, "/blog", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;
    assert!(html.contains("alice"));
    assert!(html.contains("/logout"));
}

#[tokio::test]
async fn anonymous_and_forged_cookies_show_login_links() {
    let app = app();

    let res = get(&app, "/blog", None).await;
    let html = body_string(res).await;
    assert!(html.contains("/login"));
    assert!(!html.contains("/logout"));

    // A signature from the wrong secret is treated as no session.
    let forged = format!("user_id={}", Signer::new("wrong-secret").sign("1"));
    let res = get(&app, "/blog", Some(&forged)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("/login"));
}

#[tokio::test]
async fn duplicate_signup_shows_error() {
    let app = app();

    let body = "username=alice&password=secret1&verify=secret1&email=";
    let res = post_form(&app, "/signup", body).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = post_form(&app, "/signup", body).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("That user already exists"));
}

#[tokio::test]
async fn invalid_signup_preserves_fields_but_not_password() {
    let app = app();

    let res = post_form(
        &app,
        "/signup",
        "username=ab&password=secret1&verify=other&email=alice%40example.com",
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_string(res).await;
    assert!(html.contains("That&#x27;s not a valid username.") || html.contains("That's not a valid username."));
    assert!(html.contains("didn&#x27;t match") || html.contains("didn't match"));
    assert!(html.contains("value=\"ab\""));
    assert!(html.contains("alice@example.com"));
    assert!(!html.contains("secret1"));
}

#[tokio::test]
async fn login_flow() {
    let app = app();
    post_form(&app, "/signup", "username=alice&password=secret1&verify=secret1&email=").await;

    // Wrong password and unknown user: one generic message, entered name kept.
    for body in ["username=alice&password=nope", "username=ghost&password=nope"] {
        let res = post_form(&app, "/login", body).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_string(res).await.contains("Invalid login"));
    }

    let res = post_form(&app, "/login", "username=alice&password=secret1").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/blog");
    assert!(session_cookie(&res).is_some());
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = app();

    let res = get(&app, "/logout", None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/blog");
    assert_eq!(session_cookie(&res).as_deref(), Some("user_id="));
}

#[tokio::test]
async fn new_post_round_trips_through_permalink() {
    let app = app();

    let res = post_form(&app, "/blog/newpost", "subject=First+post&blog=hello+world").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_owned();
    assert!(location.starts_with("/blog/"));

    let res = get(&app, &location, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;
    assert!(html.contains("First post"));
    assert!(html.contains("hello world"));

    // And it shows up on the index.
    let res = get(&app, "/blog", None).await;
    assert!(body_string(res).await.contains("First post"));
}

#[tokio::test]
async fn empty_post_re_renders_form_with_values() {
    let app = app();

    let res = post_form(&app, "/blog/newpost", "subject=only+subject&blog=").await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_string(res).await;
    assert!(html.contains("we need both a subject and blog entry!"));
    assert!(html.contains("only subject"));
}

#[tokio::test]
async fn missing_post_is_404() {
    let app = app();

    let res = get(&app, "/blog/999999", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = get(&app, "/blog/not-a-number", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn newest_posts_come_first() {
    let app = app();

    post_form(&app, "/blog/newpost", "subject=older&blog=a").await;
    post_form(&app, "/blog/newpost", "subject=newer&blog=b").await;

    let html = body_string(get(&app, "/blog", None).await).await;
    let older = html.find("older").expect("older post rendered");
    let newer = html.find("newer").expect("newer post rendered");
    assert!(newer < older);
}
