//! Leave balance ledger.
//!
//! One row per (employee, leave type, year). Rows are created lazily with
//! the policy's default entitlement the first time they are touched, and are
//! only ever mutated by [`LeaveLedger::debit`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, LedgerKey};
use crate::store::lock;

const TABLE: &str = "ledger table";
const ROW: &str = "ledger row";

/// The ledger table.
///
/// Row creation is an upsert under the table lock, so concurrent callers for
/// the same key always share one row. Check-and-debit runs under the row
/// lock, so concurrent debits against one row see each other's effects.
#[derive(Debug, Default)]
pub struct LeaveLedger {
    rows: Mutex<HashMap<LedgerKey, Arc<Mutex<LeaveBalance>>>>,
}

impl LeaveLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn row(&self, key: LedgerKey, policy: &LeavePolicy) -> EngineResult<Arc<Mutex<LeaveBalance>>> {
        let mut rows = lock(&self.rows, TABLE)?;
        if let Some(row) = rows.get(&key) {
            return Ok(Arc::clone(row));
        }

        let entitlement = policy
            .default_entitlement(key.leave_type)
            .ok_or_else(|| EngineError::Validation {
                field: "leave_type".to_string(),
                message: format!("{} leave is not balance-tracked", key.leave_type),
            })?;

        let row = Arc::new(Mutex::new(LeaveBalance::new(key, entitlement)));
        rows.insert(key, Arc::clone(&row));
        info!(ledger = %key, total_days = %entitlement, "Created ledger row");
        Ok(row)
    }

    /// Returns the row for `key`, creating it with the policy default if absent.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::config::LeavePolicy;
    /// use leave_engine::models::{LedgerKey, LeaveType};
    /// use leave_engine::policy::LeaveLedger;
    /// use rust_decimal::Decimal;
    ///
    /// let ledger = LeaveLedger::new();
    /// let policy = LeavePolicy::default();
    /// let key = LedgerKey::new(1, LeaveType::Sick, 2025);
    ///
    /// let balance = ledger.get_or_create(key, &policy).unwrap();
    /// assert_eq!(balance.total_days(), Decimal::new(10, 0));
    /// assert_eq!(balance.used_days(), Decimal::ZERO);
    /// ```
    pub fn get_or_create(&self, key: LedgerKey, policy: &LeavePolicy) -> EngineResult<LeaveBalance> {
        let row = self.row(key, policy)?;
        let balance = lock(&row, ROW)?;
        Ok(balance.clone())
    }

    /// Succeeds iff the row has at least `requested` days remaining.
    ///
    /// This is a point-in-time check; it reserves nothing.
    pub fn check_available(
        &self,
        key: LedgerKey,
        requested: Decimal,
        policy: &LeavePolicy,
    ) -> EngineResult<LeaveBalance> {
        let row = self.row(key, policy)?;
        let balance = lock(&row, ROW)?;
        balance.check_available(requested)?;
        Ok(balance.clone())
    }

    /// Atomically consumes `days` from the row.
    ///
    /// Fails without touching the row if fewer than `days` remain.
    pub fn debit(
        &self,
        key: LedgerKey,
        days: Decimal,
        policy: &LeavePolicy,
    ) -> EngineResult<LeaveBalance> {
        let row = self.row(key, policy)?;
        let mut balance = lock(&row, ROW)?;
        balance.debit(days)?;
        debug!(
            ledger = %key,
            days = %days,
            remaining_days = %balance.remaining_days(),
            "Debited ledger"
        );
        Ok(balance.clone())
    }
}
