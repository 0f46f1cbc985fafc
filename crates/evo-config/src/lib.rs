//! `evo.toml` configuration and tracing initialisation.
//!
//! ```toml
//! [generics]
//! max_generic_depth = 3
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

#![forbid(unsafe_code)]

mod diagnostics;
mod schema;

use std::path::Path;
use std::sync::Once;

use evo_generic::{GenericsOptions, DEFAULT_MAX_GENERIC_DEPTH};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use schema::{json_schema, json_schema_string};

/// Recursion depths above this are clamped; deeper nesting only multiplies the work done on
/// self-referential bounds.
pub const MAX_SUPPORTED_GENERIC_DEPTH: usize = 64;

pub const EVO_CONFIG_ENV_VAR: &str = "EVO_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct EvoConfig {
    /// Generic type resolution settings.
    #[serde(default)]
    pub generics: GenericsConfig,

    /// Logging settings for all evo crates.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct GenericsConfig {
    /// Nesting level past which type variables and wildcards are left unresolved.
    #[serde(default = "GenericsConfig::default_max_generic_depth")]
    #[schemars(range(max = 64))]
    pub max_generic_depth: usize,
}

impl GenericsConfig {
    fn default_max_generic_depth() -> usize {
        DEFAULT_MAX_GENERIC_DEPTH
    }
}

impl Default for GenericsConfig {
    fn default() -> Self {
        Self {
            max_generic_depth: Self::default_max_generic_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    /// Lowercase a simple level name (accepting `warning`); directive strings pass through.
    pub(crate) fn normalize_level_directives(input: &str) -> String {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        match input.trim() {
            "" => Self::default_level(),
            level if level.eq_ignore_ascii_case("warning") => "warn".to_owned(),
            level if LEVELS.iter().any(|l| level.eq_ignore_ascii_case(l)) => {
                level.to_ascii_lowercase()
            }
            directives => directives.to_owned(),
        }
    }

    /// The configured directives followed by `RUST_LOG`, so the environment wins on conflicts.
    /// An unparsable combination falls back to `info`.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let mut directives = Self::normalize_level_directives(&self.level);
        if let Ok(env) = std::env::var("RUST_LOG") {
            let env = env.trim();
            if !env.is_empty() {
                directives.push(',');
                directives.push_str(env);
            }
        }
        tracing_subscriber::EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(Self::default_level()))
    }

    fn level_is_valid(&self) -> bool {
        tracing_subscriber::EnvFilter::try_new(Self::normalize_level_directives(&self.level)).is_ok()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl EvoConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    /// Load the file named by `EVO_CONFIG_PATH`, or the defaults when it is unset.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(EVO_CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML string and report unknown keys and recoverable values.
    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<EvoConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.warnings.extend(config.validate());

        Ok((config, diagnostics))
    }

    fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.generics.max_generic_depth > MAX_SUPPORTED_GENERIC_DEPTH {
            warnings.push(ConfigWarning::MaxGenericDepthClamped {
                configured: self.generics.max_generic_depth,
                clamped: MAX_SUPPORTED_GENERIC_DEPTH,
            });
        }
        if !self.logging.level_is_valid() {
            warnings.push(ConfigWarning::LoggingLevelInvalid {
                value: self.logging.level.clone(),
            });
        }
        warnings
    }

    /// Options for the generic resolver, with the depth clamped to
    /// [`MAX_SUPPORTED_GENERIC_DEPTH`].
    pub fn generics_options(&self) -> GenericsOptions {
        let configured = self.generics.max_generic_depth;
        if configured > MAX_SUPPORTED_GENERIC_DEPTH {
            tracing::warn!(
                target: "evo.config",
                configured,
                clamped = MAX_SUPPORTED_GENERIC_DEPTH,
                "generics.max_generic_depth is too large; clamping"
            );
        }
        GenericsOptions {
            max_generic_depth: configured.min(MAX_SUPPORTED_GENERIC_DEPTH),
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs the global `tracing` subscriber writing to stderr.
///
/// Safe to call multiple times; only the first call has an effect, and a subscriber installed
/// by someone else is left in place.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let layer: Box<dyn Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(
                target: "evo.config",
                level = %config.level,
                json = config.json,
                "tracing initialised"
            );
        }
    });
}
