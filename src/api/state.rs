//! Application state for the Leave Policy Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::policy::LeavePolicyEngine;

/// Shared application state.
///
/// Every handler works against the same engine, so request and ledger rows
/// are shared across connections.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<LeavePolicyEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: LeavePolicyEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &LeavePolicyEngine {
        &self.engine
    }
}
