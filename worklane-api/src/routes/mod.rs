/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `users`: Profile and user listing
/// - `projects`: Project CRUD and membership
/// - `tasks`: Task CRUD and listings
/// - `dashboard`: Role-scoped counters

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
