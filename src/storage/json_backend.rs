use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PendingAssessment;
use crate::errors::{AssessmentError, Result};
use crate::utils::{fs::ensure_dir, fs::write_atomic, paths};

/// Processed checkout returns, keyed by idempotency key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLedger {
    pub processed: BTreeMap<String, DateTime<Utc>>,
}

impl SubmissionLedger {
    pub fn contains(&self, key: &str) -> bool {
        self.processed.contains_key(key)
    }
}

/// JSON files under the application data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    pending_file: PathBuf,
    submissions_file: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = paths::resolve_base(root);
        ensure_dir(&root)?;
        Ok(Self {
            pending_file: paths::pending_file_in(&root),
            submissions_file: paths::submissions_file_in(&root),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn pending_path(&self) -> &Path {
        &self.pending_file
    }

    pub fn save_pending(&self, pending: &PendingAssessment) -> Result<()> {
        let json = serde_json::to_string_pretty(pending)?;
        write_atomic(&self.pending_file, &json)?;
        tracing::debug!(path = %self.pending_file.display(), "saved pending assessment");
        Ok(())
    }

    /// Reads the snapshot. An unreadable snapshot is treated as missing; the
    /// snapshot is best-effort and carries no integrity check.
    pub fn load_pending(&self) -> Result<Option<PendingAssessment>> {
        if !self.pending_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.pending_file)?;
        match serde_json::from_str(&data) {
            Ok(pending) => Ok(Some(pending)),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable pending assessment");
                Ok(None)
            }
        }
    }

    /// Removes the snapshot. Returns whether one existed.
    pub fn clear_pending(&self) -> Result<bool> {
        if self.pending_file.exists() {
            fs::remove_file(&self.pending_file)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn submissions(&self) -> Result<SubmissionLedger> {
        if !self.submissions_file.exists() {
            return Ok(SubmissionLedger::default());
        }
        let data = fs::read_to_string(&self.submissions_file)?;
        serde_json::from_str(&data).map_err(|err| {
            AssessmentError::Storage(format!(
                "submission ledger `{}` is corrupt: {err}",
                self.submissions_file.display()
            ))
        })
    }

    /// Records `key` as processed. Returns `false` when it was already
    /// claimed, in which case nothing is written.
    pub fn claim_submission(&self, key: &str) -> Result<bool> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AssessmentError::Storage(
                "cannot claim an empty idempotency key".into(),
            ));
        }
        let mut ledger = self.submissions()?;
        if ledger.contains(key) {
            tracing::info!(key, "checkout return already processed");
            return Ok(false);
        }
        ledger.processed.insert(key.to_string(), Utc::now());
        let json = serde_json::to_string_pretty(&ledger)?;
        write_atomic(&self.submissions_file, &json)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::Plan;
    use crate::test_support::complete_form;
    use tempfile::tempdir;

    #[test]
    fn pending_snapshot_round_trip_and_clear() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.load_pending().unwrap().is_none());

        let pending = PendingAssessment::new(complete_form(), Some(Plan::Meal))
            .with_reference("meal_abc");
        store.save_pending(&pending).unwrap();
        assert_eq!(store.load_pending().unwrap(), Some(pending));

        assert!(store.clear_pending().unwrap());
        assert!(!store.clear_pending().unwrap());
    }

    #[test]
    fn corrupt_snapshot_reads_as_missing() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(store.pending_path(), "{not json").unwrap();
        assert!(store.load_pending().unwrap().is_none());
    }

    #[test]
    fn claims_are_one_shot_and_persisted() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.claim_submission("cs_test_1").unwrap());
        assert!(!store.claim_submission("cs_test_1").unwrap());

        let reopened = JsonStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(!reopened.claim_submission("cs_test_1").unwrap());
        assert!(reopened.claim_submission("cs_test_2").unwrap());
        assert_eq!(reopened.submissions().unwrap().processed.len(), 2);
    }

    #[test]
    fn blank_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(matches!(
            store.claim_submission("  "),
            Err(AssessmentError::Storage(_))
        ));
    }
}
