//! Wire model of a remote item and its conversion to and from [`Entry`].
//!
//! Timestamps stay as raw strings on [`Item`] so that a single bad value only
//! fails the conversion of that item, not the decode of a whole page.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use qsync_core::{Entry, EntryId, Header, Tag};

use crate::error::RemoteError;

/// An item as the service sends and receives it. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub tags: Vec<ItemTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Tag as it appears on the wire. `versions` may be `null` or missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTag {
    pub name: String,
    #[serde(default)]
    pub versions: Option<Vec<String>>,
}

impl From<ItemTag> for Tag {
    fn from(tag: ItemTag) -> Self {
        Tag::with_versions(tag.name, tag.versions.unwrap_or_default())
    }
}

impl From<&Tag> for ItemTag {
    fn from(tag: &Tag) -> Self {
        ItemTag {
            name: tag.name.clone(),
            versions: Some(tag.versions.clone()),
        }
    }
}

/// Convert a fetched item into a local entry.
///
/// `created_at` becomes the header date and `updated_at` the entry's
/// `last_modified`.
pub fn item_to_entry(item: Item) -> Result<Entry, RemoteError> {
    let date = parse_timestamp(&item.id, "created_at", item.created_at.as_deref())?;
    let last_modified = parse_timestamp(&item.id, "updated_at", item.updated_at.as_deref())?;
    Ok(Entry {
        header: Header {
            title: item.title,
            tags: item.tags.into_iter().map(Tag::from).collect(),
            date,
            url: item.url,
            id: EntryId::from(item.id),
            private: item.private,
        },
        content: item.body,
        last_modified,
    })
}

/// Convert a local entry into the payload for an update.
pub fn entry_to_item(entry: &Entry) -> Item {
    Item {
        body: entry.content.clone(),
        id: entry.header.id.0.clone(),
        title: entry.header.title.clone(),
        private: entry.header.private,
        tags: entry.header.tags.iter().map(ItemTag::from).collect(),
        created_at: entry.header.date.map(format_timestamp),
        updated_at: entry.last_modified.map(format_timestamp),
        url: entry.header.url.clone(),
    }
}

/// Convert a draft into the payload for a create. Server-assigned fields (id,
/// url, timestamps) are left out.
pub fn entry_to_new_item(entry: &Entry) -> Item {
    Item {
        body: entry.content.clone(),
        title: entry.header.title.clone(),
        private: entry.header.private,
        tags: entry.header.tags.iter().map(ItemTag::from).collect(),
        ..Item::default()
    }
}

fn parse_timestamp(
    id: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, RemoteError> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw).map_err(|source| RemoteError::Timestamp {
                id: id.to_string(),
                field,
                value: raw.to_string(),
                source,
            })
        })
        .transpose()
}

fn format_timestamp(ts: DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
