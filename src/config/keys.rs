//! Recognized configuration keys

use std::fmt;

/// Model used for Groq when `GROQ_MODEL` is not set
pub const DEFAULT_GROQ_MODEL: &str = "mixtral-8x7b-32768";

/// One of the environment variables read into a [`Config`](super::Config)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    OpenAiApiKey,
    OpenAiModel,
    Neo4jUri,
    Neo4jUsername,
    Neo4jPassword,
    GoogleApiKey,
    GoogleModel,
    GroqApiKey,
    GroqModel,
}

impl Key {
    /// Every recognized key, in the order they are reported
    pub const ALL: [Key; 9] = [
        Key::OpenAiApiKey,
        Key::OpenAiModel,
        Key::Neo4jUri,
        Key::Neo4jUsername,
        Key::Neo4jPassword,
        Key::GoogleApiKey,
        Key::GoogleModel,
        Key::GroqApiKey,
        Key::GroqModel,
    ];

    /// Exact name of the environment variable
    pub const fn env_var(self) -> &'static str {
        match self {
            Key::OpenAiApiKey => "OPENAI_API_KEY",
            Key::OpenAiModel => "OPENAI_MODEL",
            Key::Neo4jUri => "NEO4J_URI",
            Key::Neo4jUsername => "NEO4J_USERNAME",
            Key::Neo4jPassword => "NEO4J_PASSWORD",
            Key::GoogleApiKey => "GOOGLE_API_KEY",
            Key::GoogleModel => "GOOGLE_MODEL",
            Key::GroqApiKey => "GROQ_API_KEY",
            Key::GroqModel => "GROQ_MODEL",
        }
    }

    /// Value used when the variable is unset
    pub const fn default_value(self) -> Option<&'static str> {
        match self {
            Key::GroqModel => Some(DEFAULT_GROQ_MODEL),
            _ => None,
        }
    }

    /// Whether the value must never be printed or logged
    pub const fn is_secret(self) -> bool {
        matches!(
            self,
            Key::OpenAiApiKey | Key::Neo4jPassword | Key::GoogleApiKey | Key::GroqApiKey
        )
    }

    /// Look a key up by its environment variable name
    pub fn from_env_var(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|k| k.env_var() == name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}
