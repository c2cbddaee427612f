//! Domain types for locally mirrored entries.
//!
//! Timestamps keep the offset the remote service reported
//! (`DateTime<FixedOffset>`) so the date-based directory layout uses the same
//! calendar day the service shows. An absent timestamp is `None`, never an
//! epoch sentinel.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Remote identifier of an entry. Empty until the service assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A tag attached to an entry, with the optional list of versions it applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: vec![],
        }
    }

    pub fn with_versions(name: impl Into<String>, versions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            versions,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.versions.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.name, self.versions.join(","))
        }
    }
}

/// Metadata block stored at the top of every local entry file.
///
/// Field order here is the serialized order of the header block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Tags", default, with = "crate::header::tag_repr")]
    pub tags: Vec<Tag>,
    /// Creation time as reported by the remote service.
    #[serde(rename = "Date", default)]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(rename = "URL", default)]
    pub url: String,
    #[serde(rename = "ID", default)]
    pub id: EntryId,
    #[serde(rename = "Private", default)]
    pub private: bool,
}

/// An article as mirrored locally: header, body, and the mutation clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub header: Header,
    pub content: String,
    /// Last mutation time. Distinct from `header.date` (creation time); this is
    /// the value compared when deciding whether a write should happen.
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl Entry {
    /// A not-yet-posted entry with only the user-supplied fields set.
    pub fn draft(title: impl Into<String>, tags: Vec<Tag>, content: impl Into<String>) -> Self {
        Self {
            header: Header {
                title: title.into(),
                tags,
                private: true,
                ..Header::default()
            },
            content: content.into(),
            last_modified: None,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.header.id
    }

    /// `true` while the remote service has not assigned an id.
    pub fn is_new(&self) -> bool {
        self.header.id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
