/// Database row types — these map directly to SQLite rows.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    /// Stored as `"<hex_digest>,<salt>"`.
    pub pw_hash: String,
    pub email: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: i64,
    pub subject: String,
    pub body: String,
    /// Set once at creation.
    pub created: String,
    /// Updated on every write; creation is currently the only write path.
    pub last_modified: String,
}
