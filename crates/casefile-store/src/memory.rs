//! In-memory implementation of `CaseStore`.
//!
//! Records live in a `BTreeMap` behind `Arc<Mutex<_>>`, so clones of the
//! store share the same records and `update()` calls are serialized. Every
//! update works on a copy and only commits it when the mutation succeeds.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use casefile_contracts::{
    error::{CasefileError, CasefileResult},
    record::{Complaint, ComplaintId},
};
use casefile_core::traits::{CaseStore, RecordMutation};

use crate::snapshot::CaseSnapshot;

type Records = BTreeMap<ComplaintId, Complaint>;

/// A shared, lock-protected record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseStore {
    pub(crate) records: Arc<Mutex<Records>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture every stored record in a snapshot.
    pub fn snapshot(&self) -> CasefileResult<CaseSnapshot> {
        Ok(CaseSnapshot::new(self.all()?))
    }

    pub fn len(&self) -> CasefileResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> CasefileResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> CasefileResult<MutexGuard<'_, Records>> {
        self.records.lock().map_err(|e| CasefileError::StoreFailed {
            reason: format!("record store lock poisoned: {}", e),
        })
    }
}

impl CaseStore for InMemoryCaseStore {
    fn insert(&self, complaint: Complaint) -> CasefileResult<()> {
        let mut records = self.lock()?;
        if records.contains_key(&complaint.id) {
            return Err(CasefileError::DuplicateRecord { id: complaint.id.to_string() });
        }

        debug!(record_id = %complaint.id, "record stored");
        records.insert(complaint.id, complaint);
        Ok(())
    }

    fn get(&self, id: &ComplaintId) -> CasefileResult<Complaint> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| CasefileError::RecordNotFound { id: id.to_string() })
    }

    fn update(&self, id: &ComplaintId, mutation: &mut RecordMutation<'_>) -> CasefileResult<()> {
        let mut records = self.lock()?;
        let stored = records
            .get_mut(id)
            .ok_or_else(|| CasefileError::RecordNotFound { id: id.to_string() })?;

        let mut working = stored.clone();
        mutation(&mut working)?;
        *stored = working;
        Ok(())
    }

    fn ids(&self) -> CasefileResult<Vec<ComplaintId>> {
        Ok(self.lock()?.keys().copied().collect())
    }

    fn all(&self) -> CasefileResult<Vec<Complaint>> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
