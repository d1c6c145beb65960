//! File-based Session Repository Adapter
//!
//! Stores every checkout session as one JSON list on disk:
//! `[{sessionId, userId, priceId, createdAt}, ...]`.
//!
//! Writes are read-modify-write cycles serialized by an async mutex and
//! land through a temp file + rename, so a reader never observes a
//! half-written list. A missing or unparseable file is treated as empty;
//! any other I/O failure is reported, so `save` never replaces a list it
//! could not read.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::checkout::{CheckoutSession, SessionRecord};
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::SessionRepository;

/// File-backed durable store for checkout sessions
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileSessionRepository {
    /// Create a repository persisting to `path`
    ///
    /// # Example
    /// ```ignore
    /// let repo = FileSessionRepository::new("./data/checkout_sessions.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<SessionRecord>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read sessions from {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Session file corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_records(&self, records: &[SessionRecord]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| DomainError::storage(format!("Failed to encode sessions: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn save(&self, session: &CheckoutSession) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        records.retain(|r| r.session_id != session.id.as_str());
        records.push(SessionRecord::from(session));

        self.write_records(&records).await
    }

    async fn find(&self, id: &SessionId) -> Result<Option<CheckoutSession>, DomainError> {
        let records = self.read_records().await?;

        match records.into_iter().find(|r| r.session_id == id.as_str()) {
            Some(record) => {
                let session = CheckoutSession::try_from(record)
                    .map_err(|e| DomainError::storage(format!("Invalid session record: {}", e)))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }
}
