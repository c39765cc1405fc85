use std::path::PathBuf;

use thiserror::Error;

/// Result type for code generation.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Errors that abort generation of a file.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("method ID collision in service '{service}': '{first}' and '{second}' both hash to {id:#010x}")]
    MethodIdCollision {
        service: String,
        first: String,
        second: String,
        id: u32,
    },

    #[error("service ID collision in package '{package}': '{first}' and '{second}' both hash to {id:#010x}")]
    ServiceIdCollision {
        package: String,
        first: String,
        second: String,
        id: u32,
    },

    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid generator config '{filename}'")]
    Config {
        filename: String,
        #[source]
        source: toml::de::Error,
    },
}
