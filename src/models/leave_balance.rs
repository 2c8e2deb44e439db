//! Ledger rows: per-employee, per-leave-type, per-year entitlement and usage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, LeaveType};
use crate::error::{EngineError, EngineResult};

/// Unique key of a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerKey {
    /// The employee the row belongs to.
    pub employee_id: EmployeeId,
    /// The leave type tracked by the row.
    pub leave_type: LeaveType,
    /// The calendar year of the entitlement.
    pub year: i32,
}

impl LedgerKey {
    /// Creates a ledger key.
    pub fn new(employee_id: EmployeeId, leave_type: LeaveType, year: i32) -> Self {
        Self {
            employee_id,
            leave_type,
            year,
        }
    }
}

impl std::fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.employee_id, self.leave_type, self.year)
    }
}

/// A ledger row.
///
/// Only `total_days` and `used_days` are stored; `remaining_days` is always
/// computed from them so the two can never drift apart.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveBalance, LedgerKey, LeaveType};
/// use rust_decimal::Decimal;
///
/// let mut balance = LeaveBalance::new(LedgerKey::new(1, LeaveType::Vacation, 2025), Decimal::new(15, 0));
/// balance.debit(Decimal::new(3, 0)).unwrap();
/// assert_eq!(balance.used_days(), Decimal::new(3, 0));
/// assert_eq!(balance.remaining_days(), Decimal::new(12, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "BalanceSnapshot")]
pub struct LeaveBalance {
    key: LedgerKey,
    total_days: Decimal,
    used_days: Decimal,
}

impl LeaveBalance {
    /// Creates a fresh row with the given entitlement and no usage.
    pub fn new(key: LedgerKey, total_days: Decimal) -> Self {
        Self {
            key,
            total_days,
            used_days: Decimal::ZERO,
        }
    }

    /// The row's key.
    pub fn key(&self) -> LedgerKey {
        self.key
    }

    /// Entitlement for the year.
    pub fn total_days(&self) -> Decimal {
        self.total_days
    }

    /// Days consumed by approved requests.
    pub fn used_days(&self) -> Decimal {
        self.used_days
    }

    /// `total_days - used_days`.
    pub fn remaining_days(&self) -> Decimal {
        self.total_days - self.used_days
    }

    /// Succeeds iff `remaining_days >= requested`.
    pub fn check_available(&self, requested: Decimal) -> EngineResult<()> {
        let available = self.remaining_days();
        if available < requested {
            return Err(EngineError::InsufficientBalance {
                leave_type: self.key.leave_type,
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Consumes `days`, leaving the row untouched if that would overdraw it.
    pub fn debit(&mut self, days: Decimal) -> EngineResult<()> {
        if days <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "days".to_string(),
                message: format!("debit must be positive, got {}", days),
            });
        }
        self.check_available(days)?;
        self.used_days += days;
        Ok(())
    }
}

/// Serialized form of a ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// The employee the row belongs to.
    pub employee_id: EmployeeId,
    /// The leave type tracked by the row.
    pub leave_type: LeaveType,
    /// The calendar year of the entitlement.
    pub year: i32,
    /// Entitlement for the year.
    pub total_days: Decimal,
    /// Days consumed.
    pub used_days: Decimal,
    /// Days still available.
    pub remaining_days: Decimal,
}

impl From<LeaveBalance> for BalanceSnapshot {
    fn from(balance: LeaveBalance) -> Self {
        Self {
            employee_id: balance.key.employee_id,
            leave_type: balance.key.leave_type,
            year: balance.key.year,
            total_days: balance.total_days,
            used_days: balance.used_days,
            remaining_days: balance.remaining_days(),
        }
    }
}
