//! Configuration loading and management for the Leave Policy Engine.
//!
//! This module loads the leave policy (leave types, default entitlements,
//! dashboard window), the blackout calendar, and the optional employee
//! directory from YAML files, and reads service settings from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::ServiceSettings;
pub use types::{
    BlackoutsConfig, DEFAULT_UPCOMING_WINDOW_DAYS, EmployeesConfig, LeavePolicy, LeaveTypePolicy,
    PolicyConfig,
};
