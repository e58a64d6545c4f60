/// Entity managers and the aggregation/query service
///
/// Every mutating operation follows the same shape: load current state,
/// consult the policy engine, validate input, write through the store,
/// return the entity. The query service never mutates — except for the
/// lazy orphan-task reconciliation pass it triggers on admin listings.
///
/// # Modules
///
/// - `projects`: Project lifecycle and membership mutation
/// - `tasks`: Task lifecycle and assignment mutation
/// - `query`: Role-scoped lists and dashboard counts

pub mod projects;
pub mod query;
pub mod tasks;
