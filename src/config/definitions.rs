//! Local definitions file (`.env`)
//!
//! A definitions file holds `KEY=value` lines for local overrides. It can be
//! ingested into the process environment before the snapshot is resolved
//! (best-effort, never fails), or read strictly into a [`MapEnv`] without any
//! side effects.
//!
//! Parsing is done by `dotenvy`, so comments, `export` prefixes, quoting and
//! `${VAR}` substitution all behave the usual way.

use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::source::MapEnv;
use super::ConfigError;

const DEFAULT_FILE_NAME: &str = ".env";

/// Where to look for a definitions file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefinitionsSource {
    /// Search for `.env` in the current directory and its ancestors
    #[default]
    Discover,
    /// Use exactly this file
    File(PathBuf),
    /// Skip ingestion entirely
    Disabled,
}

impl DefinitionsSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DefinitionsSource::File(path.into())
    }
}

/// Outcome of [`ingest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingestion {
    /// Every line of this file was applied
    Loaded(PathBuf),
    /// Some lines could not be parsed and were skipped; the rest were applied
    Partial { path: PathBuf, skipped: usize },
    /// No definitions file exists
    NotFound,
    /// Ingestion was turned off
    Disabled,
    /// The file exists but could not be opened
    Failed(String),
}

impl Ingestion {
    /// At least part of a file was applied
    pub fn is_loaded(&self) -> bool {
        matches!(self, Ingestion::Loaded(_) | Ingestion::Partial { .. })
    }
}

/// Load a definitions file into the process environment.
///
/// The file is resolved first (a key repeated in the file takes its last
/// value), then only variables absent from the environment are set, so
/// ingesting the same file twice is a no-op. Malformed lines are logged and
/// skipped. Never fails.
pub fn ingest(source: &DefinitionsSource) -> Ingestion {
    let path = match source {
        DefinitionsSource::Disabled => return Ingestion::Disabled,
        DefinitionsSource::File(path) => path.clone(),
        DefinitionsSource::Discover => match discover() {
            Some(path) => path,
            None => {
                tracing::debug!("no definitions file found");
                return Ingestion::NotFound;
            }
        },
    };

    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "no definitions file found");
            return Ingestion::NotFound;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable definitions file");
            return Ingestion::Failed(e.to_string());
        }
    };

    let (vars, skipped) = collect_lenient(iter);
    for (name, value) in vars.iter() {
        if env::var_os(name).is_none() {
            env::set_var(name, value);
        }
    }

    tracing::debug!(path = %path.display(), vars = vars.len(), skipped, "loaded definitions file");
    if skipped == 0 {
        Ingestion::Loaded(path)
    } else {
        Ingestion::Partial { path, skipped }
    }
}

/// Read a definitions file without touching the process environment
pub fn read(path: &Path) -> Result<MapEnv, ConfigError> {
    dotenvy::from_path_iter(path)?
        .map(|item| item.map_err(ConfigError::from))
        .collect()
}

/// Parse definitions from any reader
pub fn parse<R: Read>(reader: R) -> Result<MapEnv, ConfigError> {
    dotenvy::from_read_iter(reader)
        .map(|item| item.map_err(ConfigError::from))
        .collect()
}

/// First `.env` in the current directory or one of its ancestors
fn discover() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(DEFAULT_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Keep every parseable line, later duplicates winning, and count the rest
fn collect_lenient<I>(items: I) -> (MapEnv, usize)
where
    I: IntoIterator<Item = Result<(String, String), dotenvy::Error>>,
{
    let mut vars = MapEnv::new();
    let mut skipped = 0;

    for item in items {
        match item {
            Ok((name, value)) => vars.insert(name, value),
            Err(dotenvy::Error::LineParse(line, index)) => {
                tracing::warn!(%line, index, "skipping malformed definitions line");
                skipped += 1;
            }
            Err(e) => {
                // an I/O error mid-file leaves nothing more to read
                tracing::warn!(error = %e, "stopped reading definitions file");
                skipped += 1;
                break;
            }
        }
    }

    (vars, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvSource;
    use std::env;
    use std::fs;

    fn temp_file(contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("kg-config-{}.env", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn unique_var() -> String {
        format!("KG_CONFIG_TEST_{}", uuid::Uuid::new_v4().simple())
    }

    #[test]
    fn test_parse() {
        let input = "\
# local overrides
OPENAI_API_KEY=sk-abc
export NEO4J_URI=bolt://localhost:7687
GROQ_MODEL=\"llama3-70b\"
";
        let vars = parse(input.as_bytes()).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars.get("OPENAI_API_KEY"), Some("sk-abc".to_string()));
        assert_eq!(vars.get("NEO4J_URI"), Some("bolt://localhost:7687".to_string()));
        assert_eq!(vars.get("GROQ_MODEL"), Some("llama3-70b".to_string()));
    }

    #[test]
    fn test_parse_empty() {
        let vars = parse("".as_bytes()).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse("NOT A VALID LINE".as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Definitions(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let path = env::temp_dir().join(format!("kg-config-missing-{}.env", uuid::Uuid::new_v4()));
        let err = read(&path).unwrap_err();
        match err {
            ConfigError::Definitions(e) => assert!(e.not_found()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_does_not_touch_environment() {
        let var = unique_var();
        let path = temp_file(&format!("{var}=from-file\n"));

        let vars = read(&path).unwrap();
        assert_eq!(vars.get(&var), Some("from-file".to_string()));
        assert!(env::var(&var).is_err());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_ingest_missing_file() {
        let path = env::temp_dir().join(format!("kg-config-missing-{}.env", uuid::Uuid::new_v4()));
        assert_eq!(ingest(&DefinitionsSource::File(path)), Ingestion::NotFound);
    }

    #[test]
    fn test_ingest_disabled() {
        assert_eq!(ingest(&DefinitionsSource::Disabled), Ingestion::Disabled);
    }

    #[test]
    fn test_ingest_sets_variables() {
        let var = unique_var();
        let path = temp_file(&format!("{var}=from-file\n"));

        let outcome = ingest(&DefinitionsSource::file(&path));
        assert_eq!(outcome, Ingestion::Loaded(path.clone()));
        assert_eq!(env::var(&var).unwrap(), "from-file");

        env::remove_var(&var);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_ingest_keeps_existing_variables() {
        let var = unique_var();
        env::set_var(&var, "from-process");
        let path = temp_file(&format!("{var}=from-file\n"));

        assert!(ingest(&DefinitionsSource::file(&path)).is_loaded());
        assert_eq!(env::var(&var).unwrap(), "from-process");

        // second pass changes nothing either
        assert!(ingest(&DefinitionsSource::file(&path)).is_loaded());
        assert_eq!(env::var(&var).unwrap(), "from-process");

        env::remove_var(&var);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_ingest_skips_malformed_lines() {
        let (first, after) = (unique_var(), unique_var());
        let path = temp_file(&format!("{first}=first\nTHIS LINE IS NOT VALID\n{after}=after\n"));

        let outcome = ingest(&DefinitionsSource::file(&path));
        assert_eq!(
            outcome,
            Ingestion::Partial {
                path: path.clone(),
                skipped: 1
            }
        );
        assert!(outcome.is_loaded());
        assert_eq!(env::var(&first).unwrap(), "first");
        assert_eq!(env::var(&after).unwrap(), "after");

        env::remove_var(&first);
        env::remove_var(&after);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_repeated_key_last_value_wins() {
        let var = unique_var();
        let path = temp_file(&format!("{var}=one\n{var}=two\n"));

        assert_eq!(read(&path).unwrap().get(&var), Some("two".to_string()));

        assert!(ingest(&DefinitionsSource::file(&path)).is_loaded());
        assert_eq!(env::var(&var).unwrap(), "two");

        env::remove_var(&var);
        fs::remove_file(path).ok();
    }
}
