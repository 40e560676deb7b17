//! File-backed snapshots of a store's collections.
//!
//! Each domain persists under its own fixed storage key
//! (`<module>-<resource>-storage.json` in the state directory), so a
//! restarted process can show the last-known records before the first
//! network fetch lands. The snapshot is a warm-boot cache, not a source of
//! truth: anything unreadable, version-skewed, or failing its digest check
//! is discarded with a warning and the store boots empty.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use regops_core::Resource;

const SNAPSHOT_SCHEMA_VERSION: u16 = 1;

/// Errors raised while writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// On-disk document: integrity header plus both collections.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument<R> {
    schema_version: u16,
    storage_key: String,
    saved_at: DateTime<Utc>,
    digest: String,
    items: Vec<R>,
    deleted_items: Vec<R>,
}

/// Reads and writes per-domain snapshot files inside one state directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store rooted at `dir`. The directory is created
    /// lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file for a storage key.
    pub fn path_for(&self, storage_key: &str) -> PathBuf {
        self.dir.join(format!("{storage_key}.json"))
    }

    /// Load the persisted collections for `R`, if an intact snapshot
    /// exists.
    ///
    /// Any defect — unreadable file, parse failure, schema or key
    /// mismatch, digest mismatch — yields `None` after a warning; a
    /// missing file is silent.
    pub async fn load<R: Resource>(&self) -> Option<(Vec<R>, Vec<R>)> {
        let storage_key = R::storage_key();
        let path = self.path_for(&storage_key);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read store snapshot; starting empty"
                );
                return None;
            }
        };

        let doc: SnapshotDocument<R> = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse store snapshot; starting empty"
                );
                return None;
            }
        };

        if doc.schema_version != SNAPSHOT_SCHEMA_VERSION {
            tracing::warn!(
                path = %path.display(),
                found = doc.schema_version,
                expected = SNAPSHOT_SCHEMA_VERSION,
                "snapshot schema version mismatch; starting empty"
            );
            return None;
        }

        if doc.storage_key != storage_key {
            tracing::warn!(
                path = %path.display(),
                found = %doc.storage_key,
                expected = %storage_key,
                "snapshot storage key mismatch; starting empty"
            );
            return None;
        }

        match collections_digest(&doc.items, &doc.deleted_items) {
            Ok(digest) if digest == doc.digest => Some((doc.items, doc.deleted_items)),
            Ok(_) => {
                tracing::warn!(
                    path = %path.display(),
                    "snapshot digest mismatch; starting empty"
                );
                None
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to verify snapshot digest; starting empty"
                );
                None
            }
        }
    }

    /// Persist the collections for `R`, replacing any previous snapshot.
    ///
    /// The document is written to a temporary file and renamed into place,
    /// so a crash mid-write leaves the previous snapshot intact.
    pub async fn save<R: Resource>(
        &self,
        items: Vec<R>,
        deleted_items: Vec<R>,
    ) -> Result<(), SnapshotError> {
        let storage_key = R::storage_key();
        let path = self.path_for(&storage_key);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SnapshotError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let digest = collections_digest(&items, &deleted_items)?;
        let doc = SnapshotDocument {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            storage_key,
            saved_at: Utc::now(),
            digest,
            items,
            deleted_items,
        };
        let payload = serde_json::to_vec(&doc)?;

        let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        write_file(&tmp, &payload).await?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(())
    }
}

async fn write_file(path: &Path, payload: &[u8]) -> Result<(), SnapshotError> {
    tokio::fs::write(path, payload)
        .await
        .map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// SHA-256 hex digest over the serialized collections.
fn collections_digest<R: Serialize>(
    items: &[R],
    deleted_items: &[R],
) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct DigestPayload<'a, R> {
        items: &'a [R],
        deleted_items: &'a [R],
    }

    let bytes = serde_json::to_vec(&DigestPayload {
        items,
        deleted_items,
    })?;
    Ok(sha256_hex(&bytes))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    result.iter().map(|b| format!("{b:02x}")).collect()
}
