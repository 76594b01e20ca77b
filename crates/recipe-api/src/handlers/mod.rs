//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;
