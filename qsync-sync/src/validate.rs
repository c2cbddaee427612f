//! Checks on user-supplied fields for a new post, run before any request.

use thiserror::Error;

use qsync_core::Tag;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_TAGS: usize = 5;

/// Fields the user supplies when creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title is {len} characters long; the limit is {max}")]
    TitleTooLong { len: usize, max: usize },

    #[error("at least one tag is required")]
    NoTags,

    #[error("{count} tags given; the limit is {max}")]
    TooManyTags { count: usize, max: usize },

    #[error("malformed tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: &'static str },
}

/// Validate a draft.
pub fn draft(draft: &Draft) -> Result<(), ValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong {
            len,
            max: MAX_TITLE_CHARS,
        });
    }

    if draft.tags.is_empty() {
        return Err(ValidationError::NoTags);
    }
    if draft.tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyTags {
            count: draft.tags.len(),
            max: MAX_TAGS,
        });
    }
    for tag in &draft.tags {
        check_tag(tag)?;
    }
    Ok(())
}

/// Parse `name` or `name:version,version` as typed on the command line.
pub fn parse_tag(arg: &str) -> Result<Tag, ValidationError> {
    let arg = arg.trim();
    let tag = match arg.split_once(':') {
        None => Tag::new(arg),
        Some((name, versions)) => Tag::with_versions(
            name.trim(),
            versions.split(',').map(|v| v.trim().to_string()).collect(),
        ),
    };
    check_tag(&tag)?;
    Ok(tag)
}

fn check_tag(tag: &Tag) -> Result<(), ValidationError> {
    let malformed = |reason| ValidationError::MalformedTag {
        tag: tag.to_string(),
        reason,
    };
    if tag.name.is_empty() {
        return Err(malformed("name is empty"));
    }
    if tag.name.chars().any(char::is_whitespace) {
        return Err(malformed("name contains whitespace"));
    }
    if tag.versions.iter().any(|v| v.is_empty()) {
        return Err(malformed("empty version"));
    }
    Ok(())
}
