//! kg-config - environment configuration for LLM providers and Neo4j
//!
//! Resolves a fixed set of environment variables, optionally seeded from a
//! local `.env` file, into an immutable [`Config`] snapshot.
//!
//! ```no_run
//! let config = kg_config::Config::load();
//! if let Some(neo4j) = config.neo4j() {
//!     println!("graph at {}", neo4j.uri);
//! }
//! println!("groq model: {}", config.groq_model());
//! ```

pub mod config;

pub use config::{
    Config, ConfigError, ConfigSummary, DefinitionsSource, EnvSource, Ingestion, Key, KeyStatus,
    Layered, LlmSettings, MapEnv, Neo4jSettings, ProcessEnv, Provider, DEFAULT_GROQ_MODEL,
};
