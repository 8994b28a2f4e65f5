//! Persistent image index (SQLite via sqlx).
//!
//! One row per unique image, keyed by SHA-256 digest. The digest column
//! carries a real UNIQUE constraint, so dedup holds even if two
//! invocations race on the same image directory.

pub mod db;
pub mod records;

pub use db::{ImageIndex, DB_FILENAME};
pub use records::ImageRecord;
