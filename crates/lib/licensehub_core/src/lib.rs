//! # licensehub_core
//!
//! Core domain logic for LicenseHub: directory-backed authentication,
//! token issuance, identity reconciliation, and license inventory queries.

pub mod auth;
pub mod catalog;
pub mod directory;
pub mod licensing;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
