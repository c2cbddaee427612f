//! Local layout of mirrored entries.
//!
//! # Storage layout
//!
//! ```text
//! <local_root>/
//!   YYYY/MM/DD/          (creation date, in the offset the service reported)
//!     <id>.md
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{io_err, EntryError};
use crate::header;
use crate::types::Entry;

/// File extension of every local entry.
pub const EXTENSION: &str = "md";

/// `<root>/YYYY/MM/DD/<id>.md`: pure, no I/O.
///
/// Fails for entries that have not been posted yet (no date or no id); such an
/// entry has no place in the tree.
pub fn local_path(root: &Path, entry: &Entry) -> Result<PathBuf, EntryError> {
    if entry.header.id.is_empty() {
        return Err(EntryError::MissingId);
    }
    let date = entry.header.date.ok_or_else(|| EntryError::Undated {
        id: entry.header.id.0.clone(),
    })?;
    Ok(root
        .join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
        .join(date.format("%d").to_string())
        .join(format!("{}.{EXTENSION}", entry.header.id)))
}

/// Parse entry text. `last_modified` is left empty; see [`read_entry`].
pub fn parse_entry(text: &str) -> Result<Entry, EntryError> {
    let (header, content) = header::parse(text)?;
    Ok(Entry {
        header,
        content,
        last_modified: None,
    })
}

/// Read a local entry file. Its modification time becomes `last_modified`.
pub fn read_entry(path: &Path) -> Result<Entry, EntryError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let mut entry = parse_entry(&text)?;
    entry.last_modified = Some(modified_at(path)?);
    Ok(entry)
}

/// File modification time, or `None` when the file does not exist.
pub fn local_modified(path: &Path) -> Result<Option<DateTime<FixedOffset>>, EntryError> {
    match modified_at(path) {
        Ok(ts) => Ok(Some(ts)),
        Err(EntryError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn modified_at(path: &Path) -> Result<DateTime<FixedOffset>, EntryError> {
    let modified: SystemTime = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| io_err(path, e))?;
    Ok(DateTime::<Utc>::from(modified).into())
}
