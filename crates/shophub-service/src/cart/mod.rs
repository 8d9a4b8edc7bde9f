//! Per-user shopping cart.

pub mod service;

pub use service::CartService;
