/// Authorization policy engine
///
/// A single pure decision function consulted before every mutation and
/// entity-scoped read. Role is the coarse gate (admin vs. member);
/// ownership and assignment are the fine gate. Decisions are always
/// re-derived from the entity state passed in — there are no cached
/// grants.
///
/// # Decision model
///
/// [`decide`] answers "may `identity` perform `action`?" and returns a
/// machine-distinguishable [`Deny`] reason on refusal so the boundary
/// layer can map each reason to the right externally visible status.
///
/// Two asymmetries are deliberate and load-bearing:
///
/// - Project deletion requires only the admin role, while project
///   update and task update require the creator to match.
/// - Members may update only the `status` field of tasks assigned to
///   them, and the check is all-or-nothing: a patch that also touches
///   another field is denied wholesale.
///
/// List operations are scoped rather than allowed/denied; the scope
/// constructors at the bottom produce the per-role filters the query
/// service hands to the store.

use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::{Task, TaskPatch};
use crate::models::user::UserIdentity;

/// Policy denial reason
///
/// The display strings are the externally visible messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Deny {
    /// The action is reserved for administrators
    #[error("Admin only")]
    AdminOnly,

    /// The identity is the wrong user for this entity
    #[error("Not authorized")]
    NotAuthorized,

    /// The identity may not see this entity at all
    #[error("Access denied")]
    AccessDenied,
}

/// An action on a target entity, carrying the state the decision needs
#[derive(Debug)]
pub enum Action<'a> {
    /// Read one project (detail view)
    ReadProject(&'a Project),

    /// Create a project
    CreateProject,

    /// Update title/description/status of a project
    UpdateProject(&'a Project),

    /// Delete a project (cascades to its tasks)
    DeleteProject,

    /// Add or remove a project member
    ManageMembers,

    /// Create a task in a project
    CreateTask,

    /// Update a task; the patch participates in the decision
    UpdateTask {
        /// Parent project resolved by the caller
        project: &'a Project,
        /// Current task state
        task: &'a Task,
        /// Fields the caller wants to change
        patch: &'a TaskPatch,
    },

    /// Delete a task
    DeleteTask,
}

/// Decides whether `identity` may perform `action`
///
/// Pure function: no I/O, no side effects. First matching rule wins.
pub fn decide(identity: &UserIdentity, action: &Action<'_>) -> Result<(), Deny> {
    match action {
        Action::ReadProject(project) => {
            let visible = if identity.is_admin() {
                project.is_creator(identity.id)
            } else {
                project.has_member(identity.id)
            };
            if visible {
                Ok(())
            } else {
                Err(Deny::AccessDenied)
            }
        }

        Action::CreateProject | Action::DeleteProject | Action::ManageMembers | Action::CreateTask | Action::DeleteTask => {
            if identity.is_admin() {
                Ok(())
            } else {
                Err(Deny::AdminOnly)
            }
        }

        Action::UpdateProject(project) => {
            if project.is_creator(identity.id) {
                Ok(())
            } else {
                Err(Deny::NotAuthorized)
            }
        }

        Action::UpdateTask { project, task, patch } => {
            if identity.is_admin() {
                if project.is_creator(identity.id) {
                    Ok(())
                } else {
                    Err(Deny::NotAuthorized)
                }
            } else if task.is_assigned_to(identity.id) && patch.status_only() {
                Ok(())
            } else {
                Err(Deny::NotAuthorized)
            }
        }
    }
}

/// Role-scoped project filter
///
/// Admins see the projects they created; members see the projects they
/// belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    /// Projects whose `created_by` equals the given user
    CreatedBy(Uuid),

    /// Projects whose member set contains the given user
    MemberOf(Uuid),
}

/// Role-scoped task filter
///
/// Admins see every task system-wide; members see only tasks assigned
/// to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// All tasks, regardless of project or assignee
    All,

    /// Tasks whose assignee equals the given user
    AssignedTo(Uuid),
}

/// Builds the project list filter for an identity
pub fn project_scope(identity: &UserIdentity) -> ProjectScope {
    if identity.is_admin() {
        ProjectScope::CreatedBy(identity.id)
    } else {
        ProjectScope::MemberOf(identity.id)
    }
}

/// Builds the task list filter for an identity
pub fn task_scope(identity: &UserIdentity) -> TaskScope {
    if identity.is_admin() {
        TaskScope::All
    } else {
        TaskScope::AssignedTo(identity.id)
    }
}
