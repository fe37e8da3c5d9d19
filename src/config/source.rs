//! Environment variable sources
//!
//! A [`Config`](super::Config) is resolved from anything implementing
//! [`EnvSource`]: the real process environment, an in-memory map, or a
//! layered combination of both.

use std::collections::HashMap;
use std::env;

/// Read access to named string variables
pub trait EnvSource {
    /// Value of `name`, or `None` if it is not set
    fn get(&self, name: &str) -> Option<String>;
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// The process environment
///
/// Values that are not valid Unicode are reported as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// In-memory variables, used for definitions files and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a variable, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over all variables in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MapEnv::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Two sources where `primary` wins and `fallback` fills the gaps
///
/// `Layered::new(ProcessEnv, file)` mirrors ingestion of a definitions file
/// without touching the process environment.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    primary: A,
    fallback: B,
}

impl<A: EnvSource, B: EnvSource> Layered<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: EnvSource, B: EnvSource> EnvSource for Layered<A, B> {
    fn get(&self, name: &str) -> Option<String> {
        self.primary.get(name).or_else(|| self.fallback.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env() {
        let env = MapEnv::new().with("A", "1").with("B", "");
        assert_eq!(env.get("A"), Some("1".to_string()));
        assert_eq!(env.get("B"), Some(String::new()));
        assert_eq!(env.get("C"), None);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_map_env_later_insert_wins() {
        let env: MapEnv = [("A", "1"), ("A", "2")].into_iter().collect();
        assert_eq!(env.get("A"), Some("2".to_string()));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_layered_prefers_primary() {
        let primary = MapEnv::new().with("A", "primary");
        let fallback = MapEnv::new().with("A", "fallback").with("B", "fallback");
        let env = Layered::new(&primary, &fallback);

        assert_eq!(env.get("A"), Some("primary".to_string()));
        assert_eq!(env.get("B"), Some("fallback".to_string()));
        assert_eq!(env.get("C"), None);
    }

    #[test]
    fn test_process_env() {
        let name = format!("KG_CONFIG_TEST_{}", uuid::Uuid::new_v4().simple());
        assert_eq!(ProcessEnv.get(&name), None);

        env::set_var(&name, "  padded value ");
        assert_eq!(ProcessEnv.get(&name), Some("  padded value ".to_string()));
        env::remove_var(&name);
    }
}
