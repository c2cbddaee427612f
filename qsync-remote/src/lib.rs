//! # qsync-remote
//!
//! Remote side of the mirror: the item wire model, its conversion to and from
//! local entries, and the HTTP client behind the [`RemoteApi`] seam.

pub mod client;
pub mod error;
pub mod item;

pub use client::{QiitaClient, RemoteApi};
pub use error::RemoteError;
pub use item::{entry_to_item, entry_to_new_item, item_to_entry, Item, ItemTag};
