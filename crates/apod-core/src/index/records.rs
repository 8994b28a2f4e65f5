//! Record operations: digest lookup and insert.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, ImageIndex};

/// One stored image: where its bytes live and how to recognize them again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Absolute path of the stored file.
    pub location: String,
    /// Exact payload byte count.
    pub filesize: i64,
    /// Lowercase hex SHA-256 of the bytes.
    pub sha256: String,
    /// Unix seconds at insert time.
    pub created_at: i64,
}

impl ImageIndex {
    /// True iff a record with this digest is present.
    pub async fn contains(&self, digest: &str) -> Result<bool> {
        Ok(self.find_by_digest(digest).await?.is_some())
    }

    /// Fetch the record holding this digest, if any. The caller uses the
    /// stored `location` so the applied wallpaper always points at bytes
    /// that match the digest, whatever the file was originally named.
    pub async fn find_by_digest(&self, digest: &str) -> Result<Option<ImageRecord>> {
        let row = sqlx::query(
            r#"
            SELECT location, filesize, sha256, created_at
            FROM images
            WHERE sha256 = ?1
            "#,
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ImageRecord {
            location: row.get("location"),
            filesize: row.get("filesize"),
            sha256: row.get("sha256"),
            created_at: row.get("created_at"),
        }))
    }

    /// Insert a record unless one with the same digest already exists
    /// (`INSERT OR IGNORE` against the UNIQUE constraint). Returns true
    /// when a row was written.
    pub async fn insert(&self, location: &str, filesize: i64, sha256: &str) -> Result<bool> {
        let now = unix_timestamp();
        let res = sqlx::query(
            r#"
            INSERT OR IGNORE INTO images (location, filesize, sha256, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(location)
        .bind(filesize)
        .bind(sha256)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Number of records in the index.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM images")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}
