//! # qsync-sync
//!
//! Freshness-gated mirroring between the remote service and the local tree.
//!
//! Call [`pull_all`] to bring every remote item down, [`push_one`] to upload a
//! single edited file, or [`post_new`] to create a new private post.

pub mod broker;
pub mod error;
pub mod validate;
pub mod writer;

pub use broker::{post_new, pull_all, push_one, PullOptions, PullOutcome, PullReport};
pub use error::SyncError;
pub use validate::{Draft, ValidationError};
pub use writer::{store_fresh, upload_fresh, UploadResult, WriteResult};
