//! File-based Entitlement Repository Adapter
//!
//! Persists all entitlements as one JSON object keyed by user id:
//! `{"<userId>": {status, plan, customerId?, updatedAt?}, ...}`.
//!
//! Entries are kept as raw JSON and decoded one at a time, so a malformed
//! entry only affects its own user. A missing file reads as empty and an
//! unparseable one reads as empty for `load`. A file that cannot be read or
//! parsed is never overwritten: `store` fails instead, leaving every other
//! user's entitlement on disk.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{Entitlement, EntitlementRecord};
use crate::ports::EntitlementRepository;

type EntryMap = BTreeMap<String, Value>;

/// File-backed entitlement storage
#[derive(Debug, Clone)]
pub struct FileEntitlementRepository {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileEntitlementRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; `None` when the file is missing or blank.
    async fn read_raw(&self) -> Result<Option<String>, DomainError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to read entitlements from {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn parse_entries(&self, raw: &str) -> Result<EntryMap, DomainError> {
        serde_json::from_str(raw).map_err(|e| {
            DomainError::storage(format!(
                "Entitlement file {} is not a JSON object: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write_entries(&self, entries: &EntryMap) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::storage(format!("Failed to encode entitlements: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }
}

#[async_trait]
impl EntitlementRepository for FileEntitlementRepository {
    async fn load(&self, user_id: &UserId) -> Result<Option<Entitlement>, DomainError> {
        let Some(raw) = self.read_raw().await? else {
            return Ok(None);
        };
        let entries = match self.parse_entries(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                // Unparseable content reads as "no entitlement"; writes still refuse it.
                tracing::warn!(error = %e, "Entitlement file corrupt, reading as empty");
                return Ok(None);
            }
        };

        Ok(entries
            .get(user_id.as_str())
            .map(|value| Entitlement::from(EntitlementRecord::from_value(value))))
    }

    async fn store(&self, user_id: &UserId, entitlement: &Entitlement) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = match self.read_raw().await? {
            Some(raw) => self.parse_entries(&raw)?,
            None => EntryMap::new(),
        };
        let record = serde_json::to_value(EntitlementRecord::from(entitlement))
            .map_err(|e| DomainError::storage(format!("Failed to encode entitlement: {}", e)))?;
        entries.insert(user_id.as_str().to_string(), record);

        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::CustomerId;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::{SubscriptionPlan, SubscriptionStatus};
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> FileEntitlementRepository {
        FileEntitlementRepository::new(dir.path().join("entitlements.json"))
    }

    #[tokio::test]
    async fn store_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        let user = UserId::new("u1").unwrap();
        let entitlement = Entitlement::activated(
            CustomerId::parse("mock_cus_u1"),
            Timestamp::from_unix_millis(1_700_000_000_000),
        );

        repo.store(&user, &entitlement).await.unwrap();

        assert_eq!(repo.load(&user).await.unwrap(), Some(entitlement));
    }

    #[tokio::test]
    async fn users_are_stored_independently() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        let u1 = UserId::new("u1").unwrap();
        let u2 = UserId::new("u2").unwrap();

        repo.store(&u1, &Entitlement::activated(None, Timestamp::now()))
            .await
            .unwrap();
        repo.store(&u2, &Entitlement::canceled(Timestamp::now()))
            .await
            .unwrap();

        assert!(repo.load(&u1).await.unwrap().unwrap().is_pro());
        assert!(!repo.load(&u2).await.unwrap().unwrap().is_pro());
    }

    #[tokio::test]
    async fn hand_edited_record_decodes_leniently() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(
            repo.path(),
            r#"{"u1": {"status": "trialing", "plan": "gold", "customerId": ""}}"#,
        )
        .unwrap();

        let e = repo.load(&UserId::new("u1").unwrap()).await.unwrap().unwrap();
        assert_eq!(e.status, SubscriptionStatus::Inactive);
        assert_eq!(e.plan, SubscriptionPlan::Free);
        assert!(e.customer_id.is_none());
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(repo.path(), "[[[").unwrap();

        assert!(repo.load(&UserId::new("u1").unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_entry_does_not_hide_other_users() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(
            repo.path(),
            r#"{"u1":{"status":"active","plan":"pro","customerId":"c1"},"u2":{"status":1}}"#,
        )
        .unwrap();

        let u1 = repo.load(&UserId::new("u1").unwrap()).await.unwrap().unwrap();
        assert!(u1.is_pro());
        assert_eq!(u1.customer_id.unwrap().as_str(), "c1");

        let u2 = repo.load(&UserId::new("u2").unwrap()).await.unwrap().unwrap();
        assert_eq!(u2.status, SubscriptionStatus::Inactive);
    }

    #[tokio::test]
    async fn store_keeps_other_entries_including_malformed_ones() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(
            repo.path(),
            r#"{"u1":{"status":"active","plan":"pro","customerId":"c1"},"u2":{"status":1}}"#,
        )
        .unwrap();

        repo.store(&UserId::new("u3").unwrap(), &Entitlement::inactive())
            .await
            .unwrap();

        let u1 = repo.load(&UserId::new("u1").unwrap()).await.unwrap().unwrap();
        assert!(u1.is_pro());
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(on_disk["u2"]["status"], 1);
        assert_eq!(on_disk["u3"]["status"], "inactive");
    }

    #[tokio::test]
    async fn store_refuses_to_overwrite_unparseable_file() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(repo.path(), r#"{"u1":{"status":"active""#).unwrap();

        let result = repo
            .store(&UserId::new("u3").unwrap(), &Entitlement::inactive())
            .await;

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(repo.path()).unwrap(),
            r#"{"u1":{"status":"active""#
        );
    }

    #[tokio::test]
    async fn unreadable_path_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        // A directory in place of the file fails to read regardless of privileges.
        std::fs::create_dir(repo.path()).unwrap();
        let user = UserId::new("u1").unwrap();

        assert!(repo.load(&user).await.is_err());
        assert!(repo.store(&user, &Entitlement::inactive()).await.is_err());
        assert!(repo.path().is_dir());
    }
}
