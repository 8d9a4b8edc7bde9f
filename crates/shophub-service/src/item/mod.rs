//! Item listing, creation, editing and deletion.

pub mod service;

pub use service::{CreateItemRequest, ItemService};
