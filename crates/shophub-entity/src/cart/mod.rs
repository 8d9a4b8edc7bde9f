//! Cart entities.

pub mod model;

pub use model::CartItem;
