//! Persisted domain models.
//!
//! Row types returned by the query modules; API-facing request DTOs live in
//! `licensehub_api`.

pub mod auth;
pub mod catalog;
pub mod licensing;
