//! Cached response entry operations.
//!
//! One entry per request key. Writes are idempotent overwrites; a new write
//! with the same key supersedes the prior value.

use super::bucket::Bucket;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A stored response snapshot.
///
/// Holds everything needed to replay a previously observed response for a
/// request: status, content type, headers, and the body bytes.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CachedResponse {
    pub key: String,
    pub method: String,
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub headers_json: Option<String>,
    pub body: Vec<u8>,
    pub stored_at: String,
}

impl CachedResponse {
    /// Decode the stored header pairs.
    ///
    /// Entries written before headers were captured decode to an empty list.
    pub fn headers(&self) -> Vec<(String, String)> {
        self.headers_json
            .as_deref()
            .and_then(|j| serde_json::from_str(j).ok())
            .unwrap_or_default()
    }
}

impl Bucket {
    /// Insert or overwrite the entry for a request key.
    ///
    /// Uses UPSERT semantics: inserts if the key doesn't exist, replaces
    /// every field if it does.
    pub async fn put_response(&self, entry: &CachedResponse) -> Result<(), Error> {
        let entry = entry.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO responses (
                    key, method, url, status_code, content_type,
                    headers_json, body, stored_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(key) DO UPDATE SET
                    method = excluded.method,
                    url = excluded.url,
                    status_code = excluded.status_code,
                    content_type = excluded.content_type,
                    headers_json = excluded.headers_json,
                    body = excluded.body,
                    stored_at = excluded.stored_at",
                    params![
                        &entry.key,
                        &entry.method,
                        &entry.url,
                        entry.status_code as i64,
                        &entry.content_type,
                        &entry.headers_json,
                        &entry.body,
                        &entry.stored_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up the entry for a request key.
    ///
    /// Returns None if nothing was stored under the key.
    pub async fn match_response(&self, key: &str) -> Result<Option<CachedResponse>, Error> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CachedResponse>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT
                    key, method, url, status_code, content_type,
                    headers_json, body, stored_at
                FROM responses WHERE key = ?1",
                )?;

                let result = stmt.query_row(params![key], |row| {
                    Ok(CachedResponse {
                        key: row.get(0)?,
                        method: row.get(1)?,
                        url: row.get(2)?,
                        status_code: row.get::<_, i64>(3)? as u16,
                        content_type: row.get(4)?,
                        headers_json: row.get(5)?,
                        body: row.get(6)?,
                        stored_at: row.get(7)?,
                    })
                });

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored entries.
    pub async fn count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::key::request_key;

    fn make_test_entry(url: &str, body: &[u8]) -> CachedResponse {
        CachedResponse {
            key: request_key("GET", url),
            method: "GET".to_string(),
            url: url.to_string(),
            status_code: 200,
            content_type: Some("image/png".to_string()),
            headers_json: Some(r#"[["content-type","image/png"]]"#.to_string()),
            body: body.to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_put_and_match() {
        let bucket = Bucket::open_in_memory().await.unwrap();
        let entry = make_test_entry("https://example.com/a.png", b"B");

        bucket.put_response(&entry).await.unwrap();

        let found = bucket.match_response(&entry.key).await.unwrap().unwrap();
        assert_eq!(found.url, entry.url);
        assert_eq!(found.status_code, 200);
        assert_eq!(found.body, b"B");
    }

    #[tokio::test]
    async fn test_match_missing() {
        let bucket = Bucket::open_in_memory().await.unwrap();
        let result = bucket.match_response("nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_put_supersedes_prior_entry() {
        let bucket = Bucket::open_in_memory().await.unwrap();
        let url = "https://example.com/a.png";

        bucket.put_response(&make_test_entry(url, b"old")).await.unwrap();
        bucket.put_response(&make_test_entry(url, b"new")).await.unwrap();

        assert_eq!(bucket.count().await.unwrap(), 1);
        let found = bucket.match_response(&request_key("GET", url)).await.unwrap().unwrap();
        assert_eq!(found.body, b"new");
    }

    #[tokio::test]
    async fn test_entries_keyed_independently() {
        let bucket = Bucket::open_in_memory().await.unwrap();
        bucket
            .put_response(&make_test_entry("https://example.com/a.png", b"A"))
            .await
            .unwrap();
        bucket
            .put_response(&make_test_entry("https://example.com/b.png", b"B"))
            .await
            .unwrap();

        assert_eq!(bucket.count().await.unwrap(), 2);
    }

    #[test]
    fn test_headers_decode() {
        let entry = make_test_entry("https://example.com", b"");
        assert_eq!(entry.headers(), vec![("content-type".to_string(), "image/png".to_string())]);
    }

    #[test]
    fn test_headers_decode_absent() {
        let mut entry = make_test_entry("https://example.com", b"");
        entry.headers_json = None;
        assert!(entry.headers().is_empty());
    }
}
