//! Caller identity and employee display profiles.
//!
//! Identity is issued by an external provider; the engine only consumes the
//! authenticated caller's id and role, plus display fields for admin listings.

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Role granted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular employee.
    #[default]
    Employee,
    /// An administrator who may decide on leave requests.
    Admin,
}

/// The authenticated caller of an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's employee id.
    pub employee_id: EmployeeId,
    /// The caller's role.
    pub role: Role,
}

impl Caller {
    /// A caller with the employee role.
    pub fn employee(employee_id: EmployeeId) -> Self {
        Self {
            employee_id,
            role: Role::Employee,
        }
    }

    /// A caller with the admin role.
    pub fn admin(employee_id: EmployeeId) -> Self {
        Self {
            employee_id,
            role: Role::Admin,
        }
    }

    /// Returns true if the caller is an administrator.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Caller;
    ///
    /// assert!(Caller::admin(1).is_admin());
    /// assert!(!Caller::employee(2).is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Display fields for an employee, used by administrative listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee's id.
    pub employee_id: EmployeeId,
    /// Full display name.
    pub display_name: String,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Human-facing employee code (badge number).
    pub employee_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_employee() {
        assert_eq!(Role::default(), Role::Employee);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"employee\"").unwrap();
        assert_eq!(role, Role::Employee);
    }

    #[test]
    fn test_deserialize_profile_without_department() {
        let yaml = r#"
employee_id: 12
display_name: Ada Reyes
employee_code: EMP-0012
"#;
        let profile: EmployeeProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.employee_id, 12);
        assert!(profile.department.is_none());
    }
}
