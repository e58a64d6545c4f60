/// Data models for Worklane
///
/// This module contains the three persisted entities and their patch
/// types. Models are plain data; persistence lives behind the
/// [`crate::store::Store`] trait and authorization decisions live in
/// [`crate::auth::policy`].
///
/// # Models
///
/// - `user`: User accounts, roles, and the per-request identity pair
/// - `project`: Projects with a single owning admin and a member set
/// - `task`: Tasks belonging to a project, optionally assigned

pub mod project;
pub mod task;
pub mod user;
