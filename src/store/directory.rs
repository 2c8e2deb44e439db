//! Employee display profiles.
//!
//! The identity provider owns employee records; the engine only needs to
//! look up display fields when building administrative listings.

use std::collections::HashMap;

use crate::models::{EmployeeId, EmployeeProfile};

/// Read-only access to employee display profiles.
pub trait EmployeeDirectory: Send + Sync {
    /// The profile for `employee_id`, if known.
    fn profile(&self, employee_id: EmployeeId) -> Option<EmployeeProfile>;
}

/// A directory backed by a fixed set of profiles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    profiles: HashMap<EmployeeId, EmployeeProfile>,
}

impl InMemoryDirectory {
    /// Builds a directory from profiles; later duplicates win.
    pub fn new(profiles: impl IntoIterator<Item = EmployeeProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.employee_id, profile))
                .collect(),
        }
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn profile(&self, employee_id: EmployeeId) -> Option<EmployeeProfile> {
        self.profiles.get(&employee_id).cloned()
    }
}
