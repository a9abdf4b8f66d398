//! Error types for spv-header

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for transcoding operations
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Errors that can occur while turning a SPIR-V module into a header
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Failed to read shader module {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write header {}", path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config TOML")]
    ConfigParse(#[from] toml::de::Error),
}
