//! Error types for qsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while reading, parsing, or locating a local entry.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Underlying I/O failure, annotated with the file involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file starts with a header delimiter but the block is not closed.
    #[error("entry format is invalid: {reason}")]
    Malformed { reason: String },

    /// The header block is delimited correctly but is not valid header YAML.
    #[error("failed to parse entry header: {0}")]
    Header(#[from] serde_yaml::Error),

    /// Header serialization failed on the write path.
    #[error("failed to serialize entry header: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },

    /// A local path was requested for an entry that has no creation date yet.
    #[error("entry '{id}' has no creation date; it has not been posted")]
    Undated { id: String },

    /// A local path was requested for an entry without a remote id.
    #[error("entry has no id; it has not been posted")]
    MissingId,
}

/// Errors that can arise while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file did not exist at the expected path.
    #[error("no config file found at {path}")]
    NotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// `--blog` named a key that is not present under `blogs:`.
    #[error("unknown blog '{blog}' in config")]
    UnknownBlog { blog: String },

    /// Neither the blog override nor `default` supplies a required field.
    #[error("config for blog '{blog}' is missing '{field}'")]
    MissingField { blog: String, field: &'static str },
}

/// Convenience constructor for [`EntryError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EntryError {
    EntryError::Io {
        path: path.into(),
        source,
    }
}
