//! # shophub-service
//!
//! Business logic service layer for ShopHub. Every gated operation follows
//! the same shape: require a session, check permissions or ownership, then
//! delegate a single write to a repository.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod cart;
pub mod context;
pub mod item;
pub mod mail;
pub mod user;

pub use auth::{
    AuthService, AuthSession, ResetPasswordRequest, SignupRequest, SuccessMessage,
};
pub use cart::CartService;
pub use context::RequestContext;
pub use item::{CreateItemRequest, ItemService};
pub use mail::{Mailer, OutgoingMail};
pub use user::UserService;

#[cfg(test)]
pub(crate) mod testing;
