//! Error types for qsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use qsync_core::EntryError;
use qsync_remote::RemoteError;

use crate::validate::ValidationError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A local entry could not be read, parsed, or placed.
    #[error(transparent)]
    Entry(#[from] EntryError),

    /// The remote service failed or sent something unusable.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// User-supplied fields for a new post were rejected.
    #[error("invalid post: {0}")]
    Validation(#[from] ValidationError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entry carries no last-modified time, so freshness cannot be decided.
    #[error("entry '{id}' has no last-modified time")]
    Unstamped { id: String },

    /// Push was asked to upload an entry that was never posted.
    #[error("entry has not been posted yet; create it with `qsync post`")]
    Unposted,
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
