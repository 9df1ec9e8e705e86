//! Service layer — flows orchestrating core components for the handlers.

pub mod auth;
