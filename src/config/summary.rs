//! Redacted view of a [`Config`] for printing and diagnostics

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Config, Key};

/// Status of a single key, keyed by environment variable name in
/// [`ConfigSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum KeyStatus {
    Unset,
    Set {
        /// Omitted for secrets
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        defaulted: bool,
    },
}

/// Serializable snapshot summary that never carries secret values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigSummary {
    keys: BTreeMap<&'static str, KeyStatus>,
}

impl ConfigSummary {
    pub(super) fn new(config: &Config) -> Self {
        let keys = Key::ALL
            .into_iter()
            .map(|key| {
                let status = match config.get(key) {
                    None => KeyStatus::Unset,
                    Some(value) => KeyStatus::Set {
                        value: (!key.is_secret()).then(|| value.to_string()),
                        defaulted: !config.is_set(key),
                    },
                };
                (key.env_var(), status)
            })
            .collect();

        Self { keys }
    }

    pub fn status(&self, key: Key) -> Option<&KeyStatus> {
        self.keys.get(key.env_var())
    }

    /// Number of keys present in the environment, defaults excluded
    pub fn set_count(&self) -> usize {
        self.keys
            .values()
            .filter(|s| matches!(s, KeyStatus::Set { defaulted: false, .. }))
            .count()
    }
}
