//! The leave policy engine.
//!
//! [`LeavePolicyEngine`] owns the request table, the ledger and the blackout
//! calendar, and is the only place that moves a request between statuses.
//! Every mutating operation either completes fully or leaves all state as it
//! found it.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use super::blackout::BlackoutCalendar;
use super::dashboard::{enrich, summarize};
use super::ledger::LeaveLedger;
use super::lifecycle::{LeaveAction, ensure_transition, record_decision};
use crate::clock::Clock;
use crate::config::{ConfigLoader, LeavePolicy, PolicyConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BlackoutPeriod, Caller, Dashboard, DateRange, EmployeeId, LeaveApplication, LeaveBalance,
    LeaveRequest, LeaveRequestView, LeaveStatus, LeaveType, LedgerKey, RequestId,
};
use crate::store::{EmployeeDirectory, InMemoryDirectory, Page, RequestTable, lock};

/// Orchestrates submission, decisions, cancellation and the read side.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use leave_engine::clock::FixedClock;
/// use leave_engine::config::PolicyConfig;
/// use leave_engine::models::{Caller, LeaveApplication, LeaveStatus, LeaveType};
/// use leave_engine::policy::LeavePolicyEngine;
/// use leave_engine::store::InMemoryDirectory;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let engine = LeavePolicyEngine::new(
///     PolicyConfig::default(),
///     Arc::new(InMemoryDirectory::default()),
///     Arc::new(FixedClock::on(date(2025, 3, 1))),
/// )
/// .unwrap();
///
/// let request = engine
///     .submit(LeaveApplication {
///         employee_id: 1001,
///         leave_type: LeaveType::Vacation,
///         start_date: date(2025, 3, 10),
///         end_date: date(2025, 3, 12),
///         reason: "Family trip".to_string(),
///     })
///     .unwrap();
/// assert_eq!(request.duration, 3);
///
/// let approved = engine.approve(request.id, &Caller::admin(9001), None).unwrap();
/// assert_eq!(approved.status, LeaveStatus::Approved);
///
/// let balance = engine.balance(1001, LeaveType::Vacation, 2025).unwrap();
/// assert_eq!(balance.remaining_days(), Decimal::new(12, 0));
/// ```
pub struct LeavePolicyEngine {
    policy: LeavePolicy,
    calendar: BlackoutCalendar,
    ledger: LeaveLedger,
    requests: RequestTable,
    directory: Arc<dyn EmployeeDirectory>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for LeavePolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeavePolicyEngine")
            .field("policy", &self.policy.name)
            .field("calendar", &self.calendar)
            .finish_non_exhaustive()
    }
}

impl LeavePolicyEngine {
    /// Builds an engine with empty request and ledger tables.
    ///
    /// Fails if any blackout period ends before it starts.
    pub fn new(
        config: PolicyConfig,
        directory: Arc<dyn EmployeeDirectory>,
        clock: Arc<dyn Clock>,
    ) -> EngineResult<Self> {
        config.policy().validate()?;
        let calendar = BlackoutCalendar::new(config.blackout_periods().to_vec())?;
        Ok(Self {
            policy: config.policy().clone(),
            calendar,
            ledger: LeaveLedger::new(),
            requests: RequestTable::new(),
            directory,
            clock,
        })
    }

    /// Builds an engine from loaded configuration, using the configured
    /// employee profiles as the directory.
    pub fn from_loader(loader: &ConfigLoader, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        let config = loader.config();
        let directory = InMemoryDirectory::new(config.employees().iter().cloned());
        Self::new(config.clone(), Arc::new(directory), clock)
    }

    /// The active leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Today, according to the engine's clock.
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Validates an application and stores it as a pending request.
    ///
    /// Checks run in order: date range, reason, leave type, blackout
    /// calendar, balance. The balance check reserves nothing; only approval
    /// debits the ledger.
    pub fn submit(&self, application: LeaveApplication) -> EngineResult<LeaveRequest> {
        let period = DateRange::new(application.start_date, application.end_date)?;

        if application.reason.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "reason".to_string(),
                message: "reason must not be empty".to_string(),
            });
        }

        if !self.policy.is_active(application.leave_type) {
            return Err(EngineError::Validation {
                field: "leave_type".to_string(),
                message: format!("{} leave is not currently offered", application.leave_type),
            });
        }

        self.calendar.ensure_clear(&period)?;

        if self.is_tracked(application.leave_type) {
            let key = LedgerKey::new(
                application.employee_id,
                application.leave_type,
                period.start_year(),
            );
            self.ledger
                .check_available(key, Decimal::from(period.days()), &self.policy)?;
        }

        let request = self.requests.insert(application, period, self.clock.now())?;
        info!(
            request_id = request.id,
            employee_id = request.employee_id,
            leave_type = %request.leave_type,
            period = %period,
            duration = request.duration,
            "Leave request submitted"
        );
        Ok(request)
    }

    /// Approves a pending request and debits the ledger by its duration.
    ///
    /// If the debit fails the request stays pending.
    pub fn approve(
        &self,
        request_id: RequestId,
        approver: &Caller,
        remarks: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        self.decide(request_id, approver, LeaveAction::Approve, remarks)
    }

    /// Declines a pending request. The ledger is not touched.
    pub fn decline(
        &self,
        request_id: RequestId,
        approver: &Caller,
        remarks: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        self.decide(request_id, approver, LeaveAction::Decline, remarks)
    }

    fn decide(
        &self,
        request_id: RequestId,
        approver: &Caller,
        action: LeaveAction,
        remarks: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        if action.requires_admin() && !approver.is_admin() {
            return Err(EngineError::NotAuthorized {
                message: format!("only administrators may {} leave requests", action),
            });
        }

        let row = self.requests.row(request_id)?;
        let mut request = lock(&row, "request row")?;
        let status = ensure_transition(&request, action)?;

        if action == LeaveAction::Approve && self.is_tracked(request.leave_type) {
            let key = LedgerKey::new(request.employee_id, request.leave_type, request.ledger_year());
            self.ledger
                .debit(key, Decimal::from(request.duration), &self.policy)?;
        }

        record_decision(
            &mut request,
            status,
            approver.employee_id,
            self.clock.now(),
            remarks,
        );
        info!(
            request_id,
            approver_id = approver.employee_id,
            status = %status,
            "Leave request decided"
        );
        Ok(request.clone())
    }

    /// Withdraws a pending request on behalf of its owner.
    pub fn cancel(&self, request_id: RequestId, employee_id: EmployeeId) -> EngineResult<LeaveRequest> {
        let row = self.requests.row(request_id)?;
        let mut request = lock(&row, "request row")?;

        if request.employee_id != employee_id {
            return Err(EngineError::NotAuthorized {
                message: "only the owner may cancel a leave request".to_string(),
            });
        }

        request.status = ensure_transition(&request, LeaveAction::Cancel)?;
        info!(request_id, employee_id, "Leave request cancelled");
        Ok(request.clone())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// One request by id.
    pub fn get_request(&self, request_id: RequestId) -> EngineResult<LeaveRequest> {
        self.requests.get(request_id)
    }

    /// One request by id, visible only to its owner or an administrator.
    pub fn get_request_as(&self, request_id: RequestId, caller: &Caller) -> EngineResult<LeaveRequest> {
        let request = self.requests.get(request_id)?;
        if caller.is_admin() || request.employee_id == caller.employee_id {
            Ok(request)
        } else {
            Err(EngineError::NotAuthorized {
                message: "leave request belongs to another employee".to_string(),
            })
        }
    }

    /// The ledger row for one leave type and year, created if absent.
    pub fn balance(
        &self,
        employee_id: EmployeeId,
        leave_type: LeaveType,
        year: i32,
    ) -> EngineResult<LeaveBalance> {
        self.ledger
            .get_or_create(LedgerKey::new(employee_id, leave_type, year), &self.policy)
    }

    /// The ledger rows for every tracked leave type in `year`.
    pub fn balances(&self, employee_id: EmployeeId, year: i32) -> EngineResult<Vec<LeaveBalance>> {
        self.policy
            .tracked_types()
            .into_iter()
            .map(|leave_type| self.balance(employee_id, leave_type, year))
            .collect()
    }

    /// An employee's own requests, newest first.
    pub fn requests_for(&self, employee_id: EmployeeId, page: Page) -> EngineResult<Vec<LeaveRequest>> {
        self.requests.for_employee(employee_id, page)
    }

    /// Pending requests with owner display fields, newest first.
    pub fn pending_requests(&self, page: Page) -> EngineResult<Vec<LeaveRequestView>> {
        let requests = self
            .requests
            .newest_first_where(page, |r| r.status == LeaveStatus::Pending)?;
        Ok(enrich(requests, self.directory.as_ref()))
    }

    /// All requests with owner display fields, newest first.
    pub fn all_requests(&self, page: Page) -> EngineResult<Vec<LeaveRequestView>> {
        let requests = self.requests.newest_first(page)?;
        Ok(enrich(requests, self.directory.as_ref()))
    }

    /// The blackout calendar, ordered by start date.
    pub fn blackout_periods(&self) -> Vec<BlackoutPeriod> {
        self.calendar.periods().cloned().collect()
    }

    /// Computes the administrative dashboard from current state.
    pub fn dashboard(&self) -> EngineResult<Dashboard> {
        let today = self.clock.today();
        let requests = self.requests.newest_first(Page {
            skip: 0,
            limit: usize::MAX,
        })?;
        let stats = summarize(&requests, today, self.policy.upcoming_window_days);

        Ok(Dashboard {
            as_of: today,
            stats,
            requests: enrich(requests, self.directory.as_ref()),
            leave_types: self.policy.active_summaries(),
            blackout_periods: self.blackout_periods(),
        })
    }

    fn is_tracked(&self, leave_type: LeaveType) -> bool {
        self.policy.default_entitlement(leave_type).is_some()
    }
}
