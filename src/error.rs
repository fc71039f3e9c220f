use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading gameplay tuning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning TOML")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
