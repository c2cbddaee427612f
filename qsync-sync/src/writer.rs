//! Freshness-gated writes in both directions.
//!
//! ## `store_fresh`: pull direction
//!
//! 1. Read the local file's mtime (a missing file is always stale).
//! 2. Skip unless the entry's `last_modified` is strictly later.
//! 3. Write header + body to `<path>.qsync.tmp`.
//! 4. Rename to the final path (atomic on POSIX).
//! 5. Set the file's mtime to `last_modified`.
//!
//! After step 5 the mtime mirrors the remote `updated_at`, so the next pull
//! can compare without re-reading the file. A crash between 4 and 5 leaves a
//! file the next pull sees as stale and rewrites.
//!
//! ## `upload_fresh`: push direction
//!
//! Fetch the remote counterpart; upload only when the local entry is strictly
//! newer, then store the server's response so the local mtime picks up the
//! server-assigned `updated_at`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset};
use filetime::FileTime;

use qsync_core::{
    entry::{local_modified, local_path},
    header, Entry,
};
use qsync_remote::{entry_to_item, item_to_entry, RemoteApi};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of an individual local write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (entry newer than the file, or no file yet).
    Written { path: PathBuf },
    /// File was skipped: its mtime is not older than the entry.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }
}

/// Outcome of a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// The update was sent; `write` is the local resync with the response.
    Uploaded { write: WriteResult },
    /// Remote is as new as or newer than the local copy; nothing was sent.
    Skipped {
        local: DateTime<FixedOffset>,
        remote: DateTime<FixedOffset>,
    },
}

// ---------------------------------------------------------------------------
// Pull direction
// ---------------------------------------------------------------------------

/// Write `entry` to `path` only if it is strictly newer than the file there.
pub fn store_fresh(entry: &Entry, path: &Path, dry_run: bool) -> Result<WriteResult, SyncError> {
    let last_modified = entry.last_modified.ok_or_else(|| SyncError::Unstamped {
        id: entry.id().to_string(),
    })?;

    let local = local_modified(path)?;
    if let Some(local) = local {
        if last_modified <= local {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }
    tracing::info!(
        remote = %last_modified,
        local = %local.map_or_else(|| "none".to_string(), |ts| ts.to_string()),
        "fresh"
    );

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    let content = header::full_content(entry)?;
    let tmp = PathBuf::from(format!("{}.qsync.tmp", path.display()));
    store_with_tmp(path, &content, last_modified, &tmp)?;
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

fn store_with_tmp(
    path: &Path,
    content: &str,
    last_modified: DateTime<FixedOffset>,
    tmp: &Path,
) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    let stamp = FileTime::from_system_time(SystemTime::from(last_modified));
    filetime::set_file_times(path, stamp, stamp).map_err(|e| io_err(path, e))?;

    tracing::info!("stored: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Push direction
// ---------------------------------------------------------------------------

/// Upload `entry` if it is strictly newer than its remote counterpart, then
/// resync the local file under `root` with the server's response.
pub fn upload_fresh(
    api: &dyn RemoteApi,
    root: &Path,
    entry: &Entry,
) -> Result<UploadResult, SyncError> {
    if entry.is_new() {
        return Err(SyncError::Unposted);
    }
    let local = entry.last_modified.ok_or_else(|| SyncError::Unstamped {
        id: entry.id().to_string(),
    })?;

    let id = entry.id().as_str();
    let remote = item_to_entry(api.get_item(id)?)?;
    if let Some(remote_modified) = remote.last_modified {
        if local <= remote_modified {
            tracing::info!(id, local = %local, remote = %remote_modified, "remote is not older; skipping upload");
            return Ok(UploadResult::Skipped {
                local,
                remote: remote_modified,
            });
        }
    }

    tracing::info!(id, "uploading");
    let response = item_to_entry(api.update_item(id, &entry_to_item(entry))?)?;
    let path = local_path(root, &response)?;
    let write = store_fresh(&response, &path, false)?;
    Ok(UploadResult::Uploaded { write })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
