use rusqlite::{Connection, OptionalExtension};

use crate::models::{PostRow, UserRow};
use crate::{Database, Result, StoreError};

impl Database {
    // -- Users --

    /// Create a user with a freshly computed password hash.
    ///
    /// Uniqueness of `name` is enforced by the database constraint, not by a
    /// pre-check, so two concurrent registrations of the same name cannot
    /// both succeed; the loser gets `DuplicateUser`.
    pub fn register(&self, name: &str, password: &str, email: Option<&str>) -> Result<UserRow> {
        let pw_hash = quill_crypto::password::make_hash(name, password, None);

        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (name, pw_hash, email) VALUES (?1, ?2, ?3)",
                rusqlite::params![name, pw_hash, email],
            );

            match inserted {
                Ok(_) => {
                    let id = conn.last_insert_rowid();
                    query_user_by_id(conn, id)?
                        .ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
                }
                Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateUser),
                Err(err) => Err(err.into()),
            }
        })
    }

    pub fn get_user_by_name(&self, name: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_name(conn, name))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Look up by name and verify the password against the stored hash.
    ///
    /// Unknown name and wrong password both come back as `Ok(None)`; callers
    /// must not be able to tell which one happened.
    pub fn authenticate(&self, name: &str, password: &str) -> Result<Option<UserRow>> {
        let user = self.get_user_by_name(name)?;
        Ok(user.filter(|u| quill_crypto::password::verify(name, password, &u.pw_hash)))
    }

    // -- Posts --

    /// Insert a post with both timestamps set to now and return its id.
    /// Subject and body must be non-empty after trimming.
    pub fn create_post(&self, subject: &str, body: &str) -> Result<i64> {
        if subject.trim().is_empty() || body.trim().is_empty() {
            return Err(StoreError::Validation(
                "subject and body must both be non-empty".into(),
            ));
        }

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (subject, body) VALUES (?1, ?2)",
                rusqlite::params![subject, body],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            conn.prepare(
                "SELECT id, subject, body, created, last_modified FROM posts WHERE id = ?1",
            )?
            .query_row([id], post_from_row)
            .optional()
            .map_err(Into::into)
        })
    }

    /// All posts, newest first (id breaks same-second ties). Unbounded: the
    /// original had no pagination and this keeps that gap visible rather
    /// than hiding it behind a silent limit.
    pub fn list_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, subject, body, created, last_modified
                 FROM posts
                 ORDER BY created DESC, id DESC",
            )?;

            let rows = stmt
                .query_map([], post_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn post_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<PostRow, rusqlite::Error> {
    Ok(PostRow {
        id: row.get(0)?,
        subject: row.get(1)?,
        body: row.get(2)?,
        created: row.get(3)?,
        last_modified: row.get(4)?,
    })
}

fn query_user_by_name(conn: &Connection, name: &str) -> Result<Option<UserRow>> {
    let row = conn
        .prepare("SELECT id, name, pw_hash, email, created_at FROM users WHERE name = ?1")?
        .query_row([name], user_from_row)
        .optional()?;

    Ok(row)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let row = conn
        .prepare("SELECT id, name, pw_hash, email, created_at FROM users WHERE id = ?1")?
        .query_row([id], user_from_row)
        .optional()?;

    Ok(row)
}

fn user_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        pw_hash: row.get(2)?,
        email: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
