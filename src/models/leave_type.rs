//! Leave type enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual vacation leave.
    Vacation,
    /// Sick leave.
    Sick,
    /// Personal leave.
    Personal,
    /// Emergency leave.
    Emergency,
    /// Time away from the office on company business.
    OfficialBusiness,
}

impl LeaveType {
    /// Every leave type, in declaration order.
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Vacation,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Emergency,
        LeaveType::OfficialBusiness,
    ];

    /// The wire name of the leave type.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::LeaveType;
    ///
    /// assert_eq!(LeaveType::OfficialBusiness.as_str(), "official_business");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "vacation",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Emergency => "emergency",
            LeaveType::OfficialBusiness => "official_business",
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        LeaveType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| EngineError::Validation {
                field: "leave_type".to_string(),
                message: format!(
                    "unknown leave type '{}'. Allowed: vacation, sick, personal, emergency, official_business",
                    s
                ),
            })
    }
}
