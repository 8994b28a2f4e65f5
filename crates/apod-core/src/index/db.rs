//! SQLite-backed index: connection, migration, timestamp helper.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the index file kept inside the image directory.
pub const DB_FILENAME: &str = "apod_images.db";

/// Percent-encode a path for use in a sqlite:// URI so spaces and special
/// chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the image index database.
#[derive(Clone)]
pub struct ImageIndex {
    pub(crate) pool: Pool<Sqlite>,
}

impl ImageIndex {
    /// Open (or create) the index at `<image_dir>/apod_images.db`.
    pub async fn open_in_dir(image_dir: &Path) -> Result<Self> {
        Self::open_at(image_dir.join(DB_FILENAME)).await
    }

    /// Open (or create) the database at a specific path. Idempotent: an
    /// existing database with the table present is left as is.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        // mode=rwc creates the file when absent.
        let uri = path_to_sqlite_uri(path.as_ref()) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&uri)
            .await?;
        let index = ImageIndex { pool };
        index.migrate().await?;
        Ok(index)
    }

    async fn migrate(&self) -> Result<()> {
        // One row per unique image. `sha256` is TEXT (the digest is a hex
        // string) and UNIQUE, so dedup is a schema constraint rather than
        // an application-level check.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS images (
                location   TEXT NOT NULL,
                filesize   INTEGER NOT NULL,
                sha256     TEXT NOT NULL UNIQUE,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Current time as Unix seconds (for record timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory index for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<ImageIndex> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let index = ImageIndex { pool };
    index.migrate().await?;
    Ok(index)
}
