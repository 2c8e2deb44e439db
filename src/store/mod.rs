//! In-process persistence for leave requests and employee profiles.
//!
//! Rows live behind their own `Mutex` so that an operation holding one row
//! does not block work on another. Lock order is always request row, then
//! ledger row; nothing locks a request row while holding a ledger row.

mod directory;
mod requests;

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use directory::{EmployeeDirectory, InMemoryDirectory};
pub use requests::{Page, RequestTable};

use crate::error::{EngineError, EngineResult};

fn poisoned(what: &str) -> EngineError {
    EngineError::Internal {
        message: format!("{} lock poisoned", what),
    }
}

/// Locks a row, mapping poisoning to an internal error.
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> EngineResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| poisoned(what))
}

/// Takes a shared lock on a table.
pub(crate) fn read<'a, T>(
    lock: &'a RwLock<T>,
    what: &str,
) -> EngineResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| poisoned(what))
}

/// Takes an exclusive lock on a table.
pub(crate) fn write<'a, T>(
    lock: &'a RwLock<T>,
    what: &str,
) -> EngineResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| poisoned(what))
}
