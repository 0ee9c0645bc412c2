//! Registry of named policies.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{ConfigError, ConfigResult, Validate};
use crate::policy::PolicyConfig;

/// Thread-safe registry of [`PolicyConfig`]s keyed by upper-cased name.
///
/// `STANDARD` and `CONSERVATIVE` are registered read-only on construction.
///
/// # Example
///
/// ```rust
/// use ballast_config::{ConfigManager, PolicyConfig};
///
/// let manager = ConfigManager::new();
/// let desk = PolicyConfig::new("DESK").with_description("Treasury desk limits");
/// manager.register(desk).unwrap();
///
/// assert_eq!(manager.names(), vec!["CONSERVATIVE", "DESK", "STANDARD"]);
/// ```
#[derive(Debug)]
pub struct ConfigManager {
    policies: RwLock<HashMap<String, PolicyConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Creates a manager holding the built-in policies.
    pub fn new() -> Self {
        let mut policies = HashMap::new();
        for policy in [PolicyConfig::standard(), PolicyConfig::conservative()] {
            policies.insert(key(&policy.name), policy);
        }
        Self {
            policies: RwLock::new(policies),
        }
    }

    /// Registers or replaces a policy.
    ///
    /// Fails if the policy is invalid or would replace a read-only entry.
    pub fn register(&self, policy: PolicyConfig) -> ConfigResult<()> {
        policy.validate_or_error()?;
        let name = key(&policy.name);

        let mut policies = self.policies.write();
        if policies.get(&name).is_some_and(|existing| existing.read_only) {
            return Err(ConfigError::ReadOnly { key: name });
        }
        log::debug!("registered policy {name}");
        policies.insert(name, policy);
        Ok(())
    }

    /// Gets a policy by name, case-insensitively.
    pub fn get(&self, name: &str) -> ConfigResult<PolicyConfig> {
        self.policies
            .read()
            .get(&key(name))
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                key: name.to_string(),
            })
    }

    /// Whether a policy is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.policies.read().contains_key(&key(name))
    }

    /// Removes a writable policy, returning it.
    pub fn remove(&self, name: &str) -> ConfigResult<PolicyConfig> {
        let name = key(name);
        let mut policies = self.policies.write();
        match policies.get(&name).map(|p| p.read_only) {
            None => Err(ConfigError::NotFound { key: name }),
            Some(true) => Err(ConfigError::ReadOnly { key: name }),
            Some(false) => policies
                .remove(&name)
                .ok_or(ConfigError::NotFound { key: name }),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.policies.read().keys().cloned().collect();
        names.sort();
        names
    }
}

fn key(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
