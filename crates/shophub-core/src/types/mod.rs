//! Core type definitions used across the ShopHub workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::PageRequest;
