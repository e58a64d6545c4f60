//! # Worklane API Server Library
//!
//! HTTP boundary for the Worklane project/task tracker. All domain
//! semantics live in `worklane-shared`; this crate owns routing,
//! request validation, authentication middleware, and the mapping from
//! core errors to HTTP statuses.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, auth middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
