//! Dashboard configuration.
//!
//! Values come from the environment with the defaults below.

use figures_state_runtime::StoreConfig;
use thiserror::Error;

/// Environment variable naming the store in logs
pub const STORE_NAME_VAR: &str = "FIGURES_STORE_NAME";

/// Environment variable setting the dispatch history size
pub const HISTORY_CAPACITY_VAR: &str = "FIGURES_HISTORY_CAPACITY";

/// Errors from reading configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that does not parse
    #[error("Invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        expected: &'static str,
    },
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Store name used in tracing spans
    ///
    /// Default: `figures-dashboard`
    pub store_name: String,

    /// Number of dispatched actions kept for debugging
    ///
    /// Default: 100
    pub history_capacity: usize,
}

impl DashboardConfig {
    /// Read configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(STORE_NAME_VAR).filter(|name| !name.trim().is_empty()) {
            config.store_name = name;
        }

        if let Some(raw) = lookup(HISTORY_CAPACITY_VAR) {
            config.history_capacity =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        var: HISTORY_CAPACITY_VAR,
                        value: raw.clone(),
                        expected: "a non-negative integer",
                    })?;
        }

        Ok(config)
    }

    /// Set the store name
    #[must_use]
    pub fn with_store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Store configuration derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.store_name.clone(), self.history_capacity)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            store_name: "figures-dashboard".to_string(),
            history_capacity: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(
            DashboardConfig::from_lookup(lookup(&[])),
            Ok(DashboardConfig::default())
        );
    }

    #[test]
    fn test_reads_variables() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (STORE_NAME_VAR, "staging"),
            (HISTORY_CAPACITY_VAR, " 25 "),
        ]))
        .ok();

        assert_eq!(
            config,
            Some(
                DashboardConfig::default()
                    .with_store_name("staging")
                    .with_history_capacity(25)
            )
        );
    }

    #[test]
    fn test_blank_name_keeps_default() {
        let config = DashboardConfig::from_lookup(lookup(&[(STORE_NAME_VAR, "  ")])).ok();
        assert_eq!(config.map(|c| c.store_name), Some("figures-dashboard".to_string()));
    }

    #[test]
    fn test_invalid_capacity() {
        let result = DashboardConfig::from_lookup(lookup(&[(HISTORY_CAPACITY_VAR, "lots")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                var: HISTORY_CAPACITY_VAR,
                value: "lots".to_string(),
                expected: "a non-negative integer",
            })
        );
    }

    #[test]
    fn test_store_config() {
        let store = DashboardConfig::default().with_history_capacity(7).store_config();
        assert_eq!(store.name, "figures-dashboard");
        assert_eq!(store.history_capacity, 7);
    }
}
