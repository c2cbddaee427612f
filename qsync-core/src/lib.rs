//! qsync core library: entry model, header codec, local layout, config.
//!
//! - [`types`]: [`Entry`], [`Header`], [`Tag`], [`EntryId`]
//! - [`header`]: header block serialize / parse
//! - [`entry`]: local path resolution and file reading
//! - [`config`]: YAML config with per-blog overrides
//! - [`error`]: [`EntryError`], [`ConfigError`]

pub mod config;
pub mod entry;
pub mod error;
pub mod header;
pub mod types;

pub use config::{Config, Settings};
pub use error::{ConfigError, EntryError};
pub use types::{Entry, EntryId, Header, Tag};
