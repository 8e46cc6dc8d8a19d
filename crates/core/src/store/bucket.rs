//! Bucket management with pragma configuration.
//!
//! A bucket is a named, persistent key-value store backed by one SQLite
//! database file. Opening by name lazily creates the data directory and the
//! database file, applies the required pragmas (WAL mode), and runs
//! migrations. The bucket persists across runs and is never destroyed here.

use super::migrations;
use crate::Error;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Handle to an open cache bucket.
///
/// Wraps a tokio-rusqlite Connection that runs database operations
/// on a background thread. Cloning shares the same connection.
#[derive(Clone, Debug)]
pub struct Bucket {
    pub(crate) conn: Connection,
}

impl Bucket {
    /// Open the bucket with the given logical name under `data_dir`.
    ///
    /// Creates the directory and the `<name>.sqlite` file if they don't
    /// exist, applies performance pragmas, and runs any pending migrations.
    pub async fn open(data_dir: impl AsRef<Path>, name: &str) -> Result<Self, Error> {
        validate_name(name)?;

        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| Error::StoreOpen(format!("cannot create data dir {}: {}", data_dir.display(), e)))?;

        let path = data_dir.join(format!("{name}.sqlite"));
        tracing::debug!(bucket = name, path = %path.display(), "opening bucket");

        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    /// Open an in-memory bucket for testing.
    ///
    /// Creates a temporary in-memory SQLite database with the same
    /// pragma configuration as file-based buckets.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, Error> {
        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;
                 PRAGMA temp_store=MEMORY;
                 PRAGMA foreign_keys=ON;",
            )?;
            Ok(())
        })
        .await
        .map_err(Error::Database)?;

        migrations::run(&conn).await?;

        Ok(Self { conn })
    }
}

/// A bucket name doubles as a file stem, so it must not traverse paths.
fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::InvalidBucketName("empty".into()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(Error::InvalidBucketName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let bucket = Bucket::open_in_memory().await.unwrap();
        let version = bucket
            .conn
            .call(|conn| conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0)))
            .await
            .unwrap();
        assert!(!version.is_empty());
    }

    #[tokio::test]
    async fn test_open_creates_bucket_lazily() {
        let dir = std::env::temp_dir().join(format!("portal-bucket-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let bucket = Bucket::open(&dir, "portal-cache").await.unwrap();
        assert!(dir.join("portal-cache.sqlite").exists());
        drop(bucket);

        // A second open by the same name reuses the file.
        let _bucket = Bucket::open(&dir, "portal-cache").await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_open_rejects_path_traversal() {
        let dir = std::env::temp_dir();
        let result = Bucket::open(&dir, "../escape").await;
        assert!(matches!(result, Err(Error::InvalidBucketName(_))));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("portal-cache").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }
}
