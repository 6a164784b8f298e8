//! Expiring memoization of category listings.
//!
//! One generic [`CacheDb::get_or_create`] serves every listing operation; the
//! caller picks the key (see [`super::keys`]) and supplies the factory that
//! fetches and extracts on a miss.

use std::future::Future;
use std::time::Duration;

use super::connection::CacheDb;
use crate::{CategoryRecord, Error};
use chrono::{DateTime, Utc};
use tokio_rusqlite::params;

/// A stored listing as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub records: Vec<CategoryRecord>,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry has outlived `ttl` at instant `now`.
    ///
    /// An entry stamped in the future (clock skew) is treated as fresh.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(self.created_at).to_std() {
            Ok(age) => age >= ttl,
            Err(_) => false,
        }
    }
}

/// Raw row before decoding: (records_json, created_at).
type RawEntry = (String, String);

impl CacheDb {
    /// Return the cached listing for `key`, or build and store it.
    ///
    /// Runs `factory` when no entry exists or the stored one is at least
    /// `ttl` old. A factory error is returned unchanged and nothing is stored.
    pub async fn get_or_create<F, Fut>(&self, key: &str, ttl: Duration, factory: F) -> Result<Vec<CategoryRecord>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CategoryRecord>, Error>>,
    {
        self.get_or_create_at(key, ttl, Utc::now(), factory).await
    }

    /// [`CacheDb::get_or_create`] evaluated at an explicit instant.
    ///
    /// `now` is used both for the freshness check and as the creation time of
    /// a newly stored entry.
    pub async fn get_or_create_at<F, Fut>(
        &self, key: &str, ttl: Duration, now: DateTime<Utc>, factory: F,
    ) -> Result<Vec<CategoryRecord>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CategoryRecord>, Error>>,
    {
        match self.get_entry(key).await? {
            Some(entry) if !entry.is_expired(ttl, now) => {
                tracing::debug!(key, records = entry.records.len(), "category cache hit");
                return Ok(entry.records);
            }
            Some(_) => tracing::debug!(key, "category cache entry expired"),
            None => tracing::debug!(key, "category cache miss"),
        }

        let records = factory().await?;
        self.put_entry(key, &records, now).await?;
        Ok(records)
    }

    /// Read the stored entry for `key` regardless of age.
    ///
    /// An entry that no longer decodes is reported as absent so that the next
    /// [`CacheDb::get_or_create`] overwrites it.
    pub async fn get_entry(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        let key_owned = key.to_string();
        let raw = self
            .conn
            .call(move |conn| -> Result<Option<RawEntry>, Error> {
                let mut stmt =
                    conn.prepare("SELECT records_json, created_at FROM category_cache WHERE cache_key = ?1")?;

                let result = stmt.query_row(params![key_owned], |row| Ok((row.get(0)?, row.get(1)?)));

                match result {
                    Ok(raw) => Ok(Some(raw)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        let Some((records_json, created_at)) = raw else {
            return Ok(None);
        };

        match decode_entry(&records_json, &created_at) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding undecodable category cache entry");
                Ok(None)
            }
        }
    }

    /// Store `records` under `key`, stamped with `created_at`.
    ///
    /// Uses a single UPSERT, so concurrent readers see either the old entry
    /// or the new one.
    pub async fn put_entry(&self, key: &str, records: &[CategoryRecord], created_at: DateTime<Utc>) -> Result<(), Error> {
        let key = key.to_string();
        let records_json = serde_json::to_string(records)?;
        let created_at = created_at.to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO category_cache (cache_key, records_json, created_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(cache_key) DO UPDATE SET
                        records_json = excluded.records_json,
                        created_at = excluded.created_at",
                    params![key, records_json, created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Discard every entry regardless of age.
    ///
    /// Returns the number of entries removed.
    pub async fn clear(&self) -> Result<u64, Error> {
        let deleted = self
            .conn
            .call(|conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM category_cache", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)?;

        tracing::debug!(deleted, "category cache cleared");
        Ok(deleted)
    }
}

fn decode_entry(records_json: &str, created_at: &str) -> Result<CacheEntry, Error> {
    let records = serde_json::from_str(records_json)?;
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|e| Error::Serialization(format!("bad created_at {created_at:?}: {e}")))?
        .with_timezone(&Utc);
    Ok(CacheEntry { records, created_at })
}
