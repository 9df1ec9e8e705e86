//! Request handlers.

pub mod assignments;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod licenses;
pub mod memos;
pub mod purchase_orders;
