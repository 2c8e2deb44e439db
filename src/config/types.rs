//! Configuration types for the leave policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{BlackoutPeriod, EmployeeProfile, LeaveType, LeaveTypeSummary};

/// Default width of the upcoming-expirations window, in days.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 30;

/// Policy for one leave type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaveTypePolicy {
    /// Display name (e.g. "Vacation Leave").
    pub name: String,
    /// Short code (e.g. "VL").
    pub code: String,
    /// A description of the leave type.
    #[serde(default)]
    pub description: String,
    /// Yearly entitlement given to a ledger row on first use.
    /// `None` means the leave type is not balance-tracked.
    #[serde(default)]
    pub default_entitlement: Option<Decimal>,
    /// Inactive leave types cannot be applied for.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn default_window() -> u32 {
    DEFAULT_UPCOMING_WINDOW_DAYS
}

/// The policy file structure (`policy.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeavePolicy {
    /// Human-readable policy name.
    pub name: String,
    /// Width of the dashboard's upcoming-expirations window.
    #[serde(default = "default_window")]
    pub upcoming_window_days: u32,
    /// Per-leave-type policy.
    pub leave_types: BTreeMap<LeaveType, LeaveTypePolicy>,
}

impl LeavePolicy {
    /// Looks up the policy for a leave type.
    pub fn leave_type(&self, leave_type: LeaveType) -> Option<&LeaveTypePolicy> {
        self.leave_types.get(&leave_type)
    }

    /// Yearly entitlement for a tracked leave type, `None` if untracked or unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::config::LeavePolicy;
    /// use leave_engine::models::LeaveType;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = LeavePolicy::default();
    /// assert_eq!(policy.default_entitlement(LeaveType::Vacation), Some(Decimal::new(15, 0)));
    /// assert_eq!(policy.default_entitlement(LeaveType::OfficialBusiness), None);
    /// ```
    pub fn default_entitlement(&self, leave_type: LeaveType) -> Option<Decimal> {
        self.leave_type(leave_type)
            .and_then(|policy| policy.default_entitlement)
    }

    /// Returns true if the leave type is known and active.
    pub fn is_active(&self, leave_type: LeaveType) -> bool {
        self.leave_type(leave_type)
            .is_some_and(|policy| policy.is_active)
    }

    /// Leave types that carry a ledger, in declaration order.
    pub fn tracked_types(&self) -> Vec<LeaveType> {
        self.leave_types
            .iter()
            .filter(|(_, policy)| policy.default_entitlement.is_some())
            .map(|(leave_type, _)| *leave_type)
            .collect()
    }

    /// Rejects entitlements below zero.
    pub fn validate(&self) -> EngineResult<()> {
        for (leave_type, policy) in &self.leave_types {
            if policy.default_entitlement.is_some_and(|days| days < Decimal::ZERO) {
                return Err(EngineError::Validation {
                    field: "default_entitlement".to_string(),
                    message: format!("{} default_entitlement must not be negative", leave_type),
                });
            }
        }
        Ok(())
    }

    /// Catalogue of active leave types for presentation.
    pub fn active_summaries(&self) -> Vec<LeaveTypeSummary> {
        self.leave_types
            .iter()
            .filter(|(_, policy)| policy.is_active)
            .map(|(leave_type, policy)| LeaveTypeSummary {
                leave_type: *leave_type,
                name: policy.name.clone(),
                code: policy.code.clone(),
                description: policy.description.clone(),
                default_entitlement: policy.default_entitlement,
            })
            .collect()
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        let entry = |name: &str, code: &str, description: &str, days: Option<i64>| LeaveTypePolicy {
            name: name.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            default_entitlement: days.map(|d| Decimal::new(d, 0)),
            is_active: true,
        };

        let leave_types = BTreeMap::from([
            (
                LeaveType::Vacation,
                entry("Vacation Leave", "VL", "Planned time off", Some(15)),
            ),
            (
                LeaveType::Sick,
                entry("Sick Leave", "SL", "Illness or medical care", Some(10)),
            ),
            (
                LeaveType::Personal,
                entry("Personal Leave", "PL", "Personal matters", Some(5)),
            ),
            (
                LeaveType::Emergency,
                entry("Emergency Leave", "EL", "Unplanned emergencies", Some(5)),
            ),
            (
                LeaveType::OfficialBusiness,
                entry("Official Business", "OB", "Work performed off-site", None),
            ),
        ]);

        Self {
            name: "Default leave policy".to_string(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            leave_types,
        }
    }
}

/// Blackout calendar file structure (`blackouts.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BlackoutsConfig {
    /// The configured blackout periods.
    #[serde(default)]
    pub blackout_periods: Vec<BlackoutPeriod>,
}

/// Employee directory file structure (`employees.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// Display profiles.
    #[serde(default)]
    pub employees: Vec<EmployeeProfile>,
}

/// The complete policy configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PolicyConfig {
    /// Leave type policy and dashboard window.
    policy: LeavePolicy,
    /// Blackout periods (sorted by start date).
    blackout_periods: Vec<BlackoutPeriod>,
    /// Directory profiles.
    employees: Vec<EmployeeProfile>,
}

impl PolicyConfig {
    /// Creates a new PolicyConfig from its component parts.
    pub fn new(
        policy: LeavePolicy,
        blackout_periods: Vec<BlackoutPeriod>,
        employees: Vec<EmployeeProfile>,
    ) -> Self {
        let mut sorted_periods = blackout_periods;
        sorted_periods.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Self {
            policy,
            blackout_periods: sorted_periods,
            employees,
        }
    }

    /// Returns the leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Returns the blackout periods.
    pub fn blackout_periods(&self) -> &[BlackoutPeriod] {
        &self.blackout_periods
    }

    /// Returns the employee profiles.
    pub fn employees(&self) -> &[EmployeeProfile] {
        &self.employees
    }
}
