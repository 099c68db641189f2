pub mod auth;
pub mod pages;
pub mod posts;
pub mod routes;
pub mod session;
pub mod views;

pub use auth::{AppState, AppStateInner};
pub use routes::router;
