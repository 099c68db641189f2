//! Static placeholder pages.

pub async fn home() -> &'static str {
    "Main Page Holder"
}

pub async fn welcome() -> &'static str {
    "WELCOME!"
}
