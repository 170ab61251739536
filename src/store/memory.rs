//! In-memory backing store.
//!
//! One mutex per collection; guard and transform run under the same lock
//! acquisition, which is what makes the conditional write atomic with
//! respect to every other caller of the same collection.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::{ContestedStore, StoreError, UpdateOutcome};

/// A named collection of shared records keyed by string.
#[derive(Debug)]
pub struct MemoryCollection<T: Clone> {
    name: String,
    records: Mutex<HashMap<String, T>>,
}

impl<T: Clone> MemoryCollection<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, T>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::LockPoisoned(self.name.clone()))
    }

    /// Number of records currently stored. Test and dashboard helper.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    /// Snapshot of all records, for callers that need to list a collection
    /// (e.g. open market listings). Not a consistency point across keys.
    pub fn snapshot(&self) -> Result<Vec<(String, T)>, StoreError> {
        Ok(self
            .lock()?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl<T: Clone> ContestedStore<T> for MemoryCollection<T> {
    fn read(&self, key: &str) -> Result<Option<T>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn insert_if_absent(&self, key: &str, value: T) -> Result<UpdateOutcome<T>, StoreError> {
        let mut records = self.lock()?;
        if records.contains_key(key) {
            return Ok(UpdateOutcome::GuardFailed);
        }
        records.insert(key.to_string(), value.clone());
        Ok(UpdateOutcome::Applied(value))
    }

    fn update_if(
        &self,
        key: &str,
        guard: impl FnOnce(&T) -> bool,
        transform: impl FnOnce(&mut T),
    ) -> Result<UpdateOutcome<T>, StoreError> {
        let mut records = self.lock()?;
        match records.get_mut(key) {
            Some(record) if guard(record) => {
                transform(record);
                Ok(UpdateOutcome::Applied(record.clone()))
            }
            _ => Ok(UpdateOutcome::GuardFailed),
        }
    }

    fn remove_if(
        &self,
        key: &str,
        guard: impl FnOnce(&T) -> bool,
    ) -> Result<UpdateOutcome<T>, StoreError> {
        let mut records = self.lock()?;
        let passes = records.get(key).map(guard).unwrap_or(false);
        if !passes {
            return Ok(UpdateOutcome::GuardFailed);
        }
        match records.remove(key) {
            Some(removed) => Ok(UpdateOutcome::Applied(removed)),
            None => Ok(UpdateOutcome::GuardFailed),
        }
    }
}
