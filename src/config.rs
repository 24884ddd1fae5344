//! Configuration types.

use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Read a required environment variable, failing with a named error.
pub(crate) fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent name for identification.
    pub name: String,
    /// Administrator identifier (e.g. the operator's email address).
    pub admin_id: String,
    /// Personality profile used to flavor generated responses.
    pub personality: PersonalityProfile,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "support-relay".to_string(),
            admin_id: String::new(),
            personality: PersonalityProfile::default(),
        }
    }
}

/// A static key-value description of the agent's persona (name, tone,
/// expertise). Immutable after agent construction.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PersonalityProfile(BTreeMap<String, String>);

impl PersonalityProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate traits in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personality_builder_inserts() {
        let p = PersonalityProfile::new()
            .with("name", "Support Bot")
            .with("tone", "professional and friendly");
        assert_eq!(p.get("name"), Some("Support Bot"));
        assert_eq!(p.get("tone"), Some("professional and friendly"));
        assert_eq!(p.get("expertise"), None);
    }

    #[test]
    fn personality_iterates_in_key_order() {
        let p = PersonalityProfile::new()
            .with("tone", "calm")
            .with("expertise", "billing");
        let keys: Vec<&str> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["expertise", "tone"]);
    }

    #[test]
    fn agent_config_default_has_no_admin() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.name, "support-relay");
        assert!(cfg.admin_id.is_empty());
        assert!(cfg.personality.is_empty());
    }
}
