//! Leave Policy Engine
//!
//! This crate implements the core of a leave management system: the leave
//! request lifecycle, the per-employee balance ledger, blackout conflict
//! detection and the administrative dashboard.
//!
//! The [`policy::LeavePolicyEngine`] is the entry point for library use;
//! [`api::create_router`] exposes the same operations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod store;
pub mod telemetry;
