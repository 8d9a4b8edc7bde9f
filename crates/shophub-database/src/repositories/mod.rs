//! PostgreSQL repository implementations.

pub mod cart_item;
pub mod item;
pub mod user;

pub use cart_item::PgCartItemRepository;
pub use item::PgItemRepository;
pub use user::PgUserRepository;
