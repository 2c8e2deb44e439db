//! The leave request table.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{lock, read, write};
use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, EmployeeId, LeaveApplication, LeaveRequest, RequestId};

const TABLE: &str = "request table";
const ROW: &str = "request row";

/// Offset pagination, `skip` rows then at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Rows to skip.
    #[serde(default)]
    pub skip: usize,
    /// Maximum rows to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Page {
    fn apply(&self, rows: Vec<LeaveRequest>) -> Vec<LeaveRequest> {
        rows.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// Leave requests keyed by id, each behind its own row lock.
#[derive(Debug)]
pub struct RequestTable {
    rows: RwLock<BTreeMap<RequestId, Arc<Mutex<LeaveRequest>>>>,
    sequence: AtomicU64,
}

impl Default for RequestTable {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl RequestTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists a new pending request and returns it.
    pub fn insert(
        &self,
        application: LeaveApplication,
        period: DateRange,
        submitted_at: DateTime<Utc>,
    ) -> EngineResult<LeaveRequest> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        let request = LeaveRequest::pending(id, application, period, submitted_at);
        write(&self.rows, TABLE)?.insert(id, Arc::new(Mutex::new(request.clone())));
        Ok(request)
    }

    /// The lockable row for `request_id`.
    pub fn row(&self, request_id: RequestId) -> EngineResult<Arc<Mutex<LeaveRequest>>> {
        read(&self.rows, TABLE)?
            .get(&request_id)
            .cloned()
            .ok_or(EngineError::RequestNotFound { request_id })
    }

    /// A copy of one request.
    pub fn get(&self, request_id: RequestId) -> EngineResult<LeaveRequest> {
        let row = self.row(request_id)?;
        let request = lock(&row, ROW)?;
        Ok(request.clone())
    }

    /// A copy of every request, in id order.
    pub fn snapshot(&self) -> EngineResult<Vec<LeaveRequest>> {
        let rows = read(&self.rows, TABLE)?;
        rows.values()
            .map(|row| lock(row, ROW).map(|request| request.clone()))
            .collect()
    }

    /// All requests, newest first.
    pub fn newest_first(&self, page: Page) -> EngineResult<Vec<LeaveRequest>> {
        self.newest_first_where(page, |_| true)
    }

    /// Requests matching `filter`, newest first.
    pub fn newest_first_where(
        &self,
        page: Page,
        filter: impl Fn(&LeaveRequest) -> bool,
    ) -> EngineResult<Vec<LeaveRequest>> {
        let mut requests: Vec<LeaveRequest> =
            self.snapshot()?.into_iter().filter(|r| filter(r)).collect();
        requests.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(page.apply(requests))
    }

    /// An employee's requests, newest first.
    pub fn for_employee(
        &self,
        employee_id: EmployeeId,
        page: Page,
    ) -> EngineResult<Vec<LeaveRequest>> {
        self.newest_first_where(page, |r| r.employee_id == employee_id)
    }

    /// Number of stored requests.
    pub fn len(&self) -> EngineResult<usize> {
        Ok(read(&self.rows, TABLE)?.len())
    }

    /// Returns true if no request has been stored.
    pub fn is_empty(&self) -> EngineResult<bool> {
        Ok(self.len()? == 0)
    }
}
