//! JSON snapshots of the record store.
//!
//! A snapshot is the persisted form of every record, including each
//! record's audit trail and override map. Loading a snapshot does not touch
//! history; migration of legacy entries is the keeper's decision.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use casefile_contracts::{
    error::{CasefileError, CasefileResult},
    record::Complaint,
};

/// A point-in-time export of all records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSnapshot {
    /// Snapshot format version.
    pub version: u32,

    /// Wall-clock time (UTC) the snapshot was taken.
    pub exported_at: DateTime<Utc>,

    pub complaints: Vec<Complaint>,
}

impl CaseSnapshot {
    pub const FORMAT_VERSION: u32 = 1;

    pub fn new(complaints: Vec<Complaint>) -> Self {
        Self {
            version: Self::FORMAT_VERSION,
            exported_at: Utc::now(),
            complaints,
        }
    }

    pub fn to_json(&self) -> CasefileResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CasefileError::Serialization {
            reason: format!("failed to encode snapshot: {}", e),
        })
    }

    /// Decode a snapshot, rejecting format versions newer than this build.
    pub fn from_json(s: &str) -> CasefileResult<Self> {
        let snapshot: Self = serde_json::from_str(s).map_err(|e| CasefileError::Serialization {
            reason: format!("failed to decode snapshot: {}", e),
        })?;

        if snapshot.version > Self::FORMAT_VERSION {
            return Err(CasefileError::Serialization {
                reason: format!(
                    "snapshot format version {} is newer than supported version {}",
                    snapshot.version,
                    Self::FORMAT_VERSION
                ),
            });
        }
        Ok(snapshot)
    }

    pub fn save_to(&self, path: &Path) -> CasefileResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| CasefileError::StoreFailed {
            reason: format!("failed to write snapshot '{}': {}", path.display(), e),
        })?;

        info!(path = %path.display(), records = self.complaints.len(), "snapshot saved");
        Ok(())
    }

    pub fn load_from(path: &Path) -> CasefileResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CasefileError::StoreFailed {
            reason: format!("failed to read snapshot '{}': {}", path.display(), e),
        })?;
        let snapshot = Self::from_json(&contents)?;

        info!(path = %path.display(), records = snapshot.complaints.len(), "snapshot loaded");
        Ok(snapshot)
    }
}
