//! Shop item entities.

pub mod model;

pub use model::{Item, ItemChanges, ItemFilter, ItemOrder, NewItem};
