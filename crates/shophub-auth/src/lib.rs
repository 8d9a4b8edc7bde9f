//! # shophub-auth
//!
//! Authentication primitives for ShopHub.
//!
//! ## Modules
//!
//! - `jwt`: signed session tokens carried in the `token` cookie
//! - `password`: bcrypt (default) and Argon2id password hashing
//! - `reset`: single-use password reset tokens
//! - `guard`: the any-of permission check used by every gated operation

pub mod guard;
pub mod jwt;
pub mod password;
pub mod reset;

pub use guard::PermissionGuard;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use reset::ResetToken;
