//! Application configuration
//!
//! The [`Config`] snapshot is resolved once at startup from the process
//! environment (optionally seeded from a local `.env` file) and then handed
//! to consumers by reference. It has no setters.

pub mod definitions;
pub mod keys;
pub mod source;
mod summary;

use std::fmt;

pub use definitions::{DefinitionsSource, Ingestion};
pub use keys::{Key, DEFAULT_GROQ_MODEL};
pub use source::{EnvSource, Layered, MapEnv, ProcessEnv};
pub use summary::{ConfigSummary, KeyStatus};

/// Configuration snapshot
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    openai_api_key: Option<String>,
    openai_model: Option<String>,
    neo4j_uri: Option<String>,
    neo4j_username: Option<String>,
    neo4j_password: Option<String>,
    google_api_key: Option<String>,
    google_model: Option<String>,
    groq_api_key: Option<String>,
    groq_model: String,
    groq_model_defaulted: bool,
}

impl Config {
    /// Ingest `.env` (if any) into the environment, then read the environment.
    pub fn load() -> Self {
        Self::load_with(&DefinitionsSource::default())
    }

    /// Like [`Config::load`] with an explicit definitions file source
    pub fn load_with(source: &DefinitionsSource) -> Self {
        Self::load_reporting(source).0
    }

    /// Like [`Config::load_with`], also returning what happened to the
    /// definitions file
    pub fn load_reporting(source: &DefinitionsSource) -> (Self, Ingestion) {
        let ingestion = definitions::ingest(source);
        (Self::from_env(), ingestion)
    }

    /// Read the process environment as it is now
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    /// Resolve every key from `source`, applying defaults for unset keys
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Self {
        let get = |key: Key| source.get(key.env_var());

        let (groq_model, groq_model_defaulted) = match get(Key::GroqModel) {
            Some(model) => (model, false),
            None => (DEFAULT_GROQ_MODEL.to_string(), true),
        };

        let config = Self {
            openai_api_key: get(Key::OpenAiApiKey),
            openai_model: get(Key::OpenAiModel),
            neo4j_uri: get(Key::Neo4jUri),
            neo4j_username: get(Key::Neo4jUsername),
            neo4j_password: get(Key::Neo4jPassword),
            google_api_key: get(Key::GoogleApiKey),
            google_model: get(Key::GoogleModel),
            groq_api_key: get(Key::GroqApiKey),
            groq_model,
            groq_model_defaulted,
        };

        tracing::debug!(
            set = Key::ALL.iter().filter(|k| config.is_set(**k)).count(),
            total = Key::ALL.len(),
            "resolved configuration"
        );

        config
    }

    /// Value for `key`, including its default if one applies
    pub fn get(&self, key: Key) -> Option<&str> {
        match key {
            Key::OpenAiApiKey => self.openai_api_key.as_deref(),
            Key::OpenAiModel => self.openai_model.as_deref(),
            Key::Neo4jUri => self.neo4j_uri.as_deref(),
            Key::Neo4jUsername => self.neo4j_username.as_deref(),
            Key::Neo4jPassword => self.neo4j_password.as_deref(),
            Key::GoogleApiKey => self.google_api_key.as_deref(),
            Key::GoogleModel => self.google_model.as_deref(),
            Key::GroqApiKey => self.groq_api_key.as_deref(),
            Key::GroqModel => Some(&self.groq_model),
        }
    }

    /// Whether `key` came from the environment rather than a default
    pub fn is_set(&self, key: Key) -> bool {
        match key {
            Key::GroqModel => !self.groq_model_defaulted,
            _ => self.get(key).is_some(),
        }
    }

    /// Value for `key`, or [`ConfigError::Missing`] for callers that cannot
    /// do without it
    pub fn require(&self, key: Key) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key.env_var()))
    }

    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    pub fn openai_model(&self) -> Option<&str> {
        self.openai_model.as_deref()
    }

    pub fn neo4j_uri(&self) -> Option<&str> {
        self.neo4j_uri.as_deref()
    }

    pub fn neo4j_username(&self) -> Option<&str> {
        self.neo4j_username.as_deref()
    }

    pub fn neo4j_password(&self) -> Option<&str> {
        self.neo4j_password.as_deref()
    }

    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref()
    }

    pub fn google_model(&self) -> Option<&str> {
        self.google_model.as_deref()
    }

    pub fn groq_api_key(&self) -> Option<&str> {
        self.groq_api_key.as_deref()
    }

    /// Always populated; falls back to [`DEFAULT_GROQ_MODEL`]
    pub fn groq_model(&self) -> &str {
        &self.groq_model
    }

    /// API key and model for one LLM provider
    pub fn llm(&self, provider: Provider) -> LlmSettings<'_> {
        let (api_key, model) = match provider {
            Provider::OpenAi => (Key::OpenAiApiKey, Key::OpenAiModel),
            Provider::Google => (Key::GoogleApiKey, Key::GoogleModel),
            Provider::Groq => (Key::GroqApiKey, Key::GroqModel),
        };

        LlmSettings {
            provider,
            api_key: self.get(api_key),
            model: self.get(model),
        }
    }

    /// Neo4j connection parameters, if a URI is configured
    pub fn neo4j(&self) -> Option<Neo4jSettings<'_>> {
        Some(Neo4jSettings {
            uri: self.neo4j_uri.as_deref()?,
            username: self.neo4j_username.as_deref(),
            password: self.neo4j_password.as_deref(),
        })
    }

    /// Redacted, serializable view of the snapshot
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary::new(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Config");
        for key in Key::ALL {
            let value = match self.get(key) {
                Some(_) if key.is_secret() => Some("***"),
                other => other,
            };
            s.field(key.env_var(), &value);
        }
        s.finish()
    }
}

/// LLM providers with keys in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Google,
    Groq,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Google, Provider::Groq];

    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Google => "google",
            Provider::Groq => "groq",
        }
    }
}

/// Settings for a single LLM provider
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LlmSettings<'a> {
    pub provider: Provider,
    pub api_key: Option<&'a str>,
    pub model: Option<&'a str>,
}

impl LlmSettings<'_> {
    /// An API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for LlmSettings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.map(|_| "***"))
            .field("model", &self.model)
            .finish()
    }
}

/// Neo4j connection parameters
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Neo4jSettings<'a> {
    pub uri: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl fmt::Debug for Neo4jSettings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jSettings")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.map(|_| "***"))
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Definitions file error: {0}")]
    Definitions(#[from] dotenvy::Error),

    #[error("Missing required variable: {0}")]
    Missing(&'static str),
}
