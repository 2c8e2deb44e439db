//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the leave
//! policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::BlackoutPeriod;

use super::types::{BlackoutsConfig, EmployeesConfig, LeavePolicy, PolicyConfig};

/// Loads and provides access to the leave policy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml     # Leave types, entitlements, dashboard window
/// ├── blackouts.yaml  # Blackout calendar
/// └── employees.yaml  # Optional: directory display profiles
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
/// use leave_engine::models::LeaveType;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// if let Some(days) = loader.policy().default_entitlement(LeaveType::Vacation) {
///     println!("Vacation days per year: {}", days);
/// }
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PolicyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if `policy.yaml` or `blackouts.yaml` is missing or malformed,
    /// if an entitlement is negative, or if any blackout period ends before
    /// it starts. `employees.yaml` is optional.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<LeavePolicy>(&policy_path)?;
        policy
            .validate()
            .map_err(|e| Self::parse_error(&policy_path, e))?;

        let blackouts_path = path.join("blackouts.yaml");
        let blackouts = Self::load_yaml::<BlackoutsConfig>(&blackouts_path)?;
        Self::validate_blackouts(&blackouts_path, &blackouts.blackout_periods)?;

        let employees_path = path.join("employees.yaml");
        let employees = if employees_path.exists() {
            Self::load_yaml::<EmployeesConfig>(&employees_path)?.employees
        } else {
            Vec::new()
        };

        debug!(
            policy = %policy.name,
            blackout_periods = blackouts.blackout_periods.len(),
            employees = employees.len(),
            "Loaded leave policy configuration"
        );

        Ok(Self {
            config: PolicyConfig::new(policy, blackouts.blackout_periods, employees),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_blackouts(path: &Path, periods: &[BlackoutPeriod]) -> EngineResult<()> {
        for period in periods {
            period.period().map_err(|e| Self::parse_error(path, e))?;
        }
        Ok(())
    }

    /// Reports a semantic validation failure against the file it came from.
    fn parse_error(path: &Path, error: EngineError) -> EngineError {
        EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: match error {
                EngineError::Validation { message, .. } => message,
                other => other.to_string(),
            },
        }
    }

    /// Returns the underlying policy configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Returns the leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        self.config.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveType, RestrictionLevel};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    /// Writes a policy directory under the system temp dir.
    fn create_test_config_dir(name: &str, policy_yaml: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leave-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), policy_yaml).unwrap();
        fs::write(dir.join("blackouts.yaml"), "blackout_periods: []\n").unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy().name, "Standard Leave Policy");
        assert_eq!(loader.policy().upcoming_window_days, 30);
    }

    #[test]
    fn test_default_entitlements_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.policy();
        assert_eq!(
            policy.default_entitlement(LeaveType::Vacation),
            Some(Decimal::new(15, 0))
        );
        assert_eq!(
            policy.default_entitlement(LeaveType::Sick),
            Some(Decimal::new(10, 0))
        );
        assert_eq!(
            policy.default_entitlement(LeaveType::Personal),
            Some(Decimal::new(5, 0))
        );
        assert_eq!(
            policy.default_entitlement(LeaveType::Emergency),
            Some(Decimal::new(5, 0))
        );
    }

    #[test]
    fn test_official_business_is_untracked() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(
            loader.policy().default_entitlement(LeaveType::OfficialBusiness),
            None
        );
        assert!(!loader.policy().tracked_types().contains(&LeaveType::OfficialBusiness));
    }

    #[test]
    fn test_negative_entitlement_is_a_parse_error() {
        let dir = create_test_config_dir(
            "negative-entitlement",
            r#"
name: Broken policy
leave_types:
  vacation:
    name: Vacation Leave
    code: VL
    default_entitlement: -3
"#,
        );

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("policy.yaml"));
                assert!(message.contains("vacation"));
                assert!(message.contains("must not be negative"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_entitlement_loads() {
        let dir = create_test_config_dir(
            "zero-entitlement",
            r#"
name: Lean policy
leave_types:
  sick:
    name: Sick Leave
    code: SL
    default_entitlement: 0
"#,
        );

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        let loader = result.unwrap();
        assert_eq!(
            loader.policy().default_entitlement(LeaveType::Sick),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_blackouts_loaded_and_sorted() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let periods = loader.config().blackout_periods();
        assert!(!periods.is_empty());
        assert!(
            periods
                .windows(2)
                .all(|pair| pair[0].start_date <= pair[1].start_date)
        );

        let year_end = periods
            .iter()
            .find(|p| p.name == "Year-End Closing")
            .expect("Year-End Closing configured");
        assert_eq!(year_end.start_date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        assert_eq!(year_end.end_date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
        assert_eq!(year_end.restriction_level, RestrictionLevel::NoLeave);
    }

    #[test]
    fn test_employees_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(
            loader
                .config()
                .employees()
                .iter()
                .any(|e| e.employee_code == "EMP-1001")
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_inverted_blackout_is_a_parse_error() {
        let periods = vec![BlackoutPeriod {
            name: "Backwards".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            reason: "typo".to_string(),
            restriction_level: RestrictionLevel::Restricted,
            is_active: true,
        }];

        match ConfigLoader::validate_blackouts(Path::new("blackouts.yaml"), &periods) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert_eq!(path, "blackouts.yaml");
                assert!(message.contains("Backwards"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
