//! Current user, user listing and permission management.

pub mod service;

pub use service::UserService;
