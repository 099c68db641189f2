//! Signup field validation.
//!
//! Rules: usernames are 3-20 chars of `[a-zA-Z0-9_-]`, passwords are any
//! 3-20 chars, emails are optional but must look like `local@domain.tld`
//! when present.

use std::sync::LazyLock;

use regex::Regex;

use crate::forms::SignupForm;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,20}$").unwrap());

static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.{3,20}$").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\S]+@[\S]+\.[\S]+$").unwrap());

pub fn valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn valid_password(password: &str) -> bool {
    PASSWORD_RE.is_match(password)
}

/// Email is optional; an empty string passes.
pub fn valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_RE.is_match(email)
}

/// Per-field signup errors. Empty strings mean "no error" so the template
/// can print the field unconditionally.
#[derive(Debug, Default, PartialEq)]
pub struct SignupErrors {
    pub username: &'static str,
    pub password: &'static str,
    pub verify: &'static str,
    pub email: &'static str,
}

impl SignupErrors {
    pub fn any(&self) -> bool {
        !(self.username.is_empty()
            && self.password.is_empty()
            && self.verify.is_empty()
            && self.email.is_empty())
    }
}

/// Validate a signup submission. Password-mismatch is only reported when the
/// password itself is well-formed.
pub fn check_signup(form: &SignupForm) -> SignupErrors {
    let mut errors = SignupErrors::default();

    if !valid_username(&form.username) {
        errors.username = "That's not a valid username.";
    }

    if !valid_password(&form.password) {
        errors.password = "That's not a valid password.";
    } else if form.password != form.verify {
        errors.verify = "Your passwords didn't match.";
    }

    if !valid_email(&form.email) {
        errors.email = "That's not a valid email.";
    }

    errors
}
