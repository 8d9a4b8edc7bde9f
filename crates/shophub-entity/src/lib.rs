//! # shophub-entity
//!
//! Domain entity models for ShopHub. Every struct in this crate represents
//! a database table row or a domain value object. Row types derive
//! `sqlx::FromRow` so the PostgreSQL repositories can map them directly.

pub mod cart;
pub mod item;
pub mod user;
