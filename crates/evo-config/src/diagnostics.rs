use std::collections::BTreeSet;

use serde::de::DeserializeOwned;

/// Diagnostics produced while loading an `evo.toml`.
///
/// Loading is best effort: a config is returned whenever deserialization succeeds, together with
/// everything that may change runtime behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Keys present in the input that the schema does not know, as dotted paths
    /// (`generics.max_depth`).
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `generics.max_generic_depth` exceeds the supported ceiling and was lowered.
    MaxGenericDepthClamped { configured: usize, clamped: usize },
    /// `logging.level` could not be parsed as a filter; `info` is used instead.
    LoggingLevelInvalid { value: String },
}

/// Deserialize `text`, collecting every key the target type ignored as a sorted dotted path.
pub(crate) fn deserialize_toml_with_unknown_keys<T: DeserializeOwned>(
    text: &str,
) -> Result<(T, Vec<String>), toml::de::Error> {
    let mut unknown = BTreeSet::new();
    let value = serde_ignored::deserialize(toml::de::Deserializer::new(text), |path| {
        // Top-level paths render with a leading `.`.
        unknown.insert(path.to_string().trim_start_matches('.').to_owned());
    })?;
    Ok((value, unknown.into_iter().collect()))
}
