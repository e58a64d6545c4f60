//! # Worklane Shared Library
//!
//! This crate contains the domain core of Worklane, a role-based
//! project/task tracker: data models, the authorization policy engine,
//! the persistence seam, and the entity/query services. The HTTP layer
//! in `worklane-api` is a thin boundary over these modules.
//!
//! ## Module Organization
//!
//! - `models`: Users, projects, tasks and their patch types
//! - `auth`: Password hashing, JWT tokens, and the policy engine
//! - `store`: Persistence trait with Postgres and in-memory backends
//! - `service`: Entity managers and the aggregation/query service
//! - `db`: Connection pool and migration runner
//! - `error`: Core error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

/// Current version of the Worklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
