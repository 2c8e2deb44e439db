//! Leave policy rules.
//!
//! This module contains the blackout conflict detector, the balance ledger,
//! the request state machine, dashboard aggregation, and the
//! [`LeavePolicyEngine`] that ties them together.

mod blackout;
mod dashboard;
mod engine;
mod ledger;
mod lifecycle;

pub use blackout::BlackoutCalendar;
pub use dashboard::{enrich, summarize};
pub use engine::LeavePolicyEngine;
pub use ledger::LeaveLedger;
pub use lifecycle::{LeaveAction, ensure_transition, next_status};
