//! Contested-state mutation primitives.
//!
//! Every shared aggregate (boss state, faction roster, listings, wallets,
//! progression counters) is updated through a guarded conditional write:
//! the caller supplies a guard predicate over the current stored value and a
//! transformation, and the store applies both atomically. A guard that no
//! longer holds means a concurrent writer got there first; that is an
//! ordinary [`UpdateOutcome::GuardFailed`], never an error.

pub mod memory;

use thiserror::Error;

pub use memory::MemoryCollection;

/// Result of a guarded conditional update.
///
/// `GuardFailed` is the race-loss signal: the stored state no longer matched
/// the expected precondition. Callers must branch on it explicitly (retry,
/// treat as already-handled, or surface a message) - it is deliberately not
/// an `Err` so it cannot be confused with storage failure.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<T> {
    /// The guard held and the transform was applied; carries the
    /// post-update record.
    Applied(T),
    /// The guard did not hold (or the record was absent).
    GuardFailed,
}

impl<T> UpdateOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied(_))
    }

    /// Unwraps the post-update record, if the update applied.
    pub fn applied(self) -> Option<T> {
        match self {
            UpdateOutcome::Applied(value) => Some(value),
            UpdateOutcome::GuardFailed => None,
        }
    }
}

/// Genuine storage faults. Failed guards are not errors; for the in-memory
/// store only lock poisoning can end up here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage lock poisoned for collection '{0}'")]
    LockPoisoned(String),
}

/// Repository seam for one collection of shared records.
///
/// Exposes plain reads and guarded conditional writes only - there is no
/// unconditional write, so call sites cannot read-modify-write a contested
/// record without encoding their precondition in the guard.
pub trait ContestedStore<T: Clone> {
    /// Plain read of the current record, if present.
    fn read(&self, key: &str) -> Result<Option<T>, StoreError>;

    /// First-writer-wins reservation: stores `value` only if no record
    /// exists under `key`. The losing writer gets `GuardFailed`.
    fn insert_if_absent(&self, key: &str, value: T) -> Result<UpdateOutcome<T>, StoreError>;

    /// Applies `transform` only if `guard` holds for the current record.
    /// A missing record fails the guard.
    fn update_if(
        &self,
        key: &str,
        guard: impl FnOnce(&T) -> bool,
        transform: impl FnOnce(&mut T),
    ) -> Result<UpdateOutcome<T>, StoreError>;

    /// Removes the record only if `guard` holds; returns the removed value.
    fn remove_if(
        &self,
        key: &str,
        guard: impl FnOnce(&T) -> bool,
    ) -> Result<UpdateOutcome<T>, StoreError>;
}
