//! User domain entities.

pub mod model;
pub mod permission;

pub use model::{NewUser, User, normalize_email};
pub use permission::{Permission, PermissionSet};
