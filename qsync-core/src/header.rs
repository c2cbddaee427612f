//! Header block codec.
//!
//! A local entry file looks like:
//!
//! ```text
//! ---
//! Title: Hello
//! Tags:
//! - rust
//! Date: 2023-01-01T00:00:00+09:00
//! URL: https://qiita.com/alice/items/c686397e4a0f4f11683d
//! ID: c686397e4a0f4f11683d
//! Private: false
//! ---
//!
//! body text
//! ```
//!
//! A file that does not start with `---` is a draft that has never been
//! posted: the whole text is its body and the header is empty.

use crate::error::EntryError;
use crate::types::{Entry, Header};

/// Delimiter line opening and closing the header block.
pub const DELIMITER: &str = "---\n";

/// Render the canonical header block, including the blank line that separates
/// it from the body.
pub fn serialize(header: &Header) -> Result<String, EntryError> {
    let yaml = serde_yaml::to_string(header).map_err(|source| EntryError::Serialize { source })?;
    Ok(format!("{DELIMITER}{yaml}{DELIMITER}\n"))
}

/// Split file text into its header and body.
pub fn parse(text: &str) -> Result<(Header, String), EntryError> {
    let text = text.replace("\r\n", "\n");
    if !text.starts_with(DELIMITER) {
        return Ok((Header::default(), text));
    }

    let parts = split_on_delimiter(&text, 3);
    let [first, yaml, body] = parts.as_slice() else {
        return Err(EntryError::Malformed {
            reason: "header block is not closed by a '---' line".to_string(),
        });
    };
    if !first.is_empty() {
        return Err(EntryError::Malformed {
            reason: "text before the opening '---' line".to_string(),
        });
    }

    let header = if yaml.trim().is_empty() {
        Header::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    Ok((header, (*body).to_string()))
}

/// Header block followed by the body, always ending with a newline so repeated
/// round-trips produce identical bytes.
pub fn full_content(entry: &Entry) -> Result<String, EntryError> {
    let mut content = serialize(&entry.header)?;
    content.push_str(&entry.content);
    if !content.ends_with('\n') {
        content.push('\n');
    }
    Ok(content)
}

/// Split on line-anchored `---` delimiters, swallowing the newlines that follow
/// each one. At most `limit` parts are returned; the last holds the remainder.
fn split_on_delimiter(text: &str, limit: usize) -> Vec<&str> {
    let mut parts = Vec::with_capacity(limit);
    let mut rest = text;
    while parts.len() + 1 < limit {
        let Some(at) = rest
            .match_indices(DELIMITER)
            .map(|(i, _)| i)
            .find(|&i| i == 0 || rest.as_bytes()[i - 1] == b'\n')
        else {
            break;
        };
        parts.push(&rest[..at]);
        rest = rest[at + DELIMITER.len() - 1..].trim_start_matches('\n');
    }
    parts.push(rest);
    parts
}

/// Serde boundary for the header's tag list.
///
/// A tag without versions is written as its bare name, a versioned tag as a
/// `{name, versions}` mapping. Both forms are accepted on read.
pub(crate) mod tag_repr {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::types::Tag;

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum TagRepr {
        Name(String),
        Full(Tag),
    }

    pub fn serialize<S: Serializer>(tags: &[Tag], serializer: S) -> Result<S::Ok, S::Error> {
        tags.iter()
            .map(|tag| {
                if tag.versions.is_empty() {
                    TagRepr::Name(tag.name.clone())
                } else {
                    TagRepr::Full(tag.clone())
                }
            })
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Tag>, D::Error> {
        let reprs = Option::<Vec<TagRepr>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(reprs
            .into_iter()
            .map(|repr| match repr {
                TagRepr::Name(name) => Tag::new(name),
                TagRepr::Full(tag) => tag,
            })
            .collect())
    }
}
