//! Local bookmark storage.
//!
//! Saved posts are kept in a single SQLite table keyed by post id. Loads return
//! the most recently saved post first.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::domain::{Post, PostId};

// Bump when the table layout changes. Older databases are migrated by
// recreating the table; bookmarks do not survive a layout change.
const SCHEMA_VERSION: i32 = 1;

/// Errors from the saved-post store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite reported an error.
    #[error("saved posts database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// The database directory could not be created.
    #[error("saved posts I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A stored row could not be turned back into a post.
    #[error("corrupt saved post {id}: {reason}")]
    Corrupt { id: String, reason: String },
    /// A previous panic left the connection lock poisoned.
    #[error("saved posts store is unavailable")]
    Unavailable,
}

/// Persistent set of bookmarked posts.
#[cfg_attr(test, mockall::automock)]
pub trait SavedPostStore: Send + Sync {
    /// Returns every saved post, most recently saved first.
    fn load_saved(&self) -> Result<Vec<Post>, StoreError>;

    /// Saves a post. Saving an already saved post refreshes its contents.
    fn save(&self, post: &Post) -> Result<(), StoreError>;

    /// Removes a post. Returns whether it was saved.
    fn unsave(&self, id: &PostId) -> Result<bool, StoreError>;

    /// Whether a post is currently saved.
    fn is_saved(&self, id: &PostId) -> Result<bool, StoreError>;
}

/// SQLite-backed [`SavedPostStore`].
pub struct SqliteSavedStore {
    conn: Mutex<Connection>,
}

impl SqliteSavedStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Unavailable)?;
        f(&conn)
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        conn.execute_batch("DROP TABLE IF EXISTS saved_posts;")?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS saved_posts (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL,
            image_url TEXT,
            permalink TEXT,
            saved_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_saved_posts_saved_at ON saved_posts(saved_at);
        "#,
    )?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

struct SavedRow {
    id: String,
    title: String,
    author: String,
    body: String,
    created_at: String,
    image_url: Option<String>,
    permalink: Option<String>,
}

impl SavedRow {
    fn into_post(self) -> Result<Post, StoreError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|err| StoreError::Corrupt {
                id: self.id.clone(),
                reason: err.to_string(),
            })?
            .with_timezone(&Utc);

        Ok(Post {
            id: PostId::from(self.id),
            title: self.title,
            author: self.author,
            body: self.body,
            created_at,
            image_url: self.image_url,
            permalink: self.permalink,
        })
    }
}

impl SavedPostStore for SqliteSavedStore {
    fn load_saved(&self) -> Result<Vec<Post>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, author, body, created_at, image_url, permalink
                 FROM saved_posts
                 ORDER BY saved_at DESC, rowid DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(SavedRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    body: row.get(3)?,
                    created_at: row.get(4)?,
                    image_url: row.get(5)?,
                    permalink: row.get(6)?,
                })
            })?;

            let mut posts = Vec::new();
            for row in rows {
                posts.push(row?.into_post()?);
            }
            Ok(posts)
        })
    }

    fn save(&self, post: &Post) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO saved_posts
                    (id, title, author, body, created_at, image_url, permalink, saved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    author = excluded.author,
                    body = excluded.body,
                    image_url = excluded.image_url,
                    permalink = excluded.permalink",
                params![
                    post.id.as_str(),
                    post.title,
                    post.author,
                    post.body,
                    post.created_at.to_rfc3339(),
                    post.image_url,
                    post.permalink,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            tracing::debug!(id = %post.id, "Saved post");
            Ok(())
        })
    }

    fn unsave(&self, id: &PostId) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM saved_posts WHERE id = ?1", [id.as_str()])?;
            tracing::debug!(%id, removed, "Unsaved post");
            Ok(removed > 0)
        })
    }

    fn is_saved(&self, id: &PostId) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM saved_posts WHERE id = ?1",
                    [id.as_str()],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }
}
