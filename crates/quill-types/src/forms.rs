use serde::Deserialize;

// -- Signup / Login --

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub verify: String,
    /// Optional; browsers submit an empty string when the field is left blank.
    #[serde(default)]
    pub email: String,
}

impl SignupForm {
    /// Empty email means "not provided".
    pub fn email_opt(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// -- Posts --

/// The body field is named `blog` to match the post form's field name.
#[derive(Debug, Deserialize)]
pub struct NewPostForm {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub blog: String,
}
