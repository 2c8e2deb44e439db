//! Service settings read from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

const CONFIG_DIR_VAR: &str = "LEAVE_ENGINE_CONFIG_DIR";
const ADDR_VAR: &str = "LEAVE_ENGINE_ADDR";
const LOG_VAR: &str = "LEAVE_ENGINE_LOG";

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Directory holding `policy.yaml` and friends.
    pub config_dir: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl ServiceSettings {
    /// Reads settings from the environment, loading `.env` first if present.
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> EngineResult<Self> {
        let config_dir = lookup(CONFIG_DIR_VAR).unwrap_or_else(|| "./config/default".to_string());
        let addr = lookup(ADDR_VAR).unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| EngineError::ConfigParseError {
                path: ADDR_VAR.to_string(),
                message: format!("'{}': {}", addr, e),
            })?;
        let log_level = lookup(LOG_VAR).unwrap_or_else(|| "info".to_string());

        Ok(Self {
            config_dir: PathBuf::from(config_dir),
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = ServiceSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.config_dir, PathBuf::from("./config/default"));
        assert_eq!(settings.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_overrides_are_applied() {
        let settings = ServiceSettings::from_lookup(lookup_from(&[
            (CONFIG_DIR_VAR, "/etc/leave"),
            (ADDR_VAR, "0.0.0.0:8080"),
            (LOG_VAR, "debug"),
        ]))
        .unwrap();
        assert_eq!(settings.config_dir, PathBuf::from("/etc/leave"));
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let result = ServiceSettings::from_lookup(lookup_from(&[(ADDR_VAR, "not-an-addr")]));
        match result {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert_eq!(path, ADDR_VAR);
                assert!(message.contains("not-an-addr"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
