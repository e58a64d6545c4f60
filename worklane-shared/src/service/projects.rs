/// Project entity and membership manager
///
/// Owns the project lifecycle and all member-set mutation. Membership
/// changes rewrite the whole member set in one store write, so they
/// inherit the store's single-document atomicity.
///
/// Deletion cascades to the project's tasks and is sequenced
/// children-first; an interrupted run leaves orphaned tasks which the
/// query service reaps on the next admin listing.

use tracing::debug;
use uuid::Uuid;

use crate::auth::policy::{decide, Action};
use crate::error::{CoreError, CoreResult};
use crate::models::project::{Project, ProjectPatch, ProjectStatus};
use crate::models::user::{Role, UserIdentity};
use crate::store::Store;

/// Fields a project update may change
///
/// Membership is managed through [`ProjectService::add_member`] and
/// [`ProjectService::remove_member`], never through this patch.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// New title (must stay non-empty)
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New lifecycle status
    pub status: Option<ProjectStatus>,
}

/// Manager for project lifecycle and membership
pub struct ProjectService<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> ProjectService<'a, S> {
    /// Creates a manager over the given store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Creates a project owned by the calling administrator
    ///
    /// # Errors
    ///
    /// - `Denied(AdminOnly)` if the identity is not an administrator
    /// - `Validation` if the title is empty
    pub async fn create(
        &self,
        identity: &UserIdentity,
        title: String,
        description: String,
    ) -> CoreResult<Project> {
        decide(identity, &Action::CreateProject)?;

        if title.trim().is_empty() {
            return Err(CoreError::validation("Title is required"));
        }

        let project = Project::new(title, description, identity.id);
        self.store.insert_project(&project).await?;

        debug!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Updates title, description and/or status
    ///
    /// Only provided fields are applied.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project is absent
    /// - `Denied(NotAuthorized)` unless the identity is the creator
    /// - `Validation` if a provided title is empty
    pub async fn update(
        &self,
        identity: &UserIdentity,
        id: Uuid,
        update: ProjectUpdate,
    ) -> CoreResult<Project> {
        let project = self
            .store
            .find_project(id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        decide(identity, &Action::UpdateProject(&project))?;

        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(CoreError::validation("Title is required"));
            }
        }

        let patch = ProjectPatch {
            title: update.title,
            description: update.description,
            status: update.status,
            members: None,
        };

        self.store
            .update_project(id, patch)
            .await?
            .ok_or(CoreError::NotFound("project"))
    }

    /// Deletes a project and all of its tasks
    ///
    /// Any administrator may delete, creator or not. Tasks are removed
    /// before the project so an interruption can only leave orphaned
    /// tasks, never a project without the right to its children.
    ///
    /// # Errors
    ///
    /// - `Denied(AdminOnly)` if the identity is not an administrator
    /// - `NotFound` if the project is absent
    pub async fn delete(&self, identity: &UserIdentity, id: Uuid) -> CoreResult<Project> {
        decide(identity, &Action::DeleteProject)?;

        self.store
            .find_project(id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        let removed = self.store.delete_project_tasks(id).await?;
        if removed > 0 {
            debug!(project_id = %id, removed, "cascade-deleted project tasks");
        }

        self.store
            .delete_project(id)
            .await?
            .ok_or(CoreError::NotFound("project"))
    }

    /// Adds a member-role user to the project
    ///
    /// # Errors
    ///
    /// - `Denied(AdminOnly)` if the identity is not an administrator
    /// - `NotFound` if the project is absent
    /// - `Validation` if the user is unknown or not member-role
    /// - `Conflict` if the user is already a member
    pub async fn add_member(
        &self,
        identity: &UserIdentity,
        project_id: Uuid,
        member_id: Uuid,
    ) -> CoreResult<Project> {
        decide(identity, &Action::ManageMembers)?;

        let project = self
            .store
            .find_project(project_id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        let member = self
            .store
            .find_user(member_id)
            .await?
            .filter(|u| u.role == Role::Member)
            .ok_or_else(|| CoreError::validation("Only member-role users can join a project"))?;

        if project.has_member(member.id) {
            return Err(CoreError::Conflict("Member already in project".to_string()));
        }

        let mut members = project.members;
        members.push(member.id);

        self.store
            .update_project(
                project_id,
                ProjectPatch {
                    members: Some(members),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(CoreError::NotFound("project"))
    }

    /// Removes a user from the member set
    ///
    /// Idempotent: removing an id that is not in the set succeeds and
    /// leaves the set unchanged. Stale task assignments pointing at the
    /// removed member are deliberately left in place.
    ///
    /// # Errors
    ///
    /// - `Denied(AdminOnly)` if the identity is not an administrator
    /// - `NotFound` if the project is absent
    pub async fn remove_member(
        &self,
        identity: &UserIdentity,
        project_id: Uuid,
        member_id: Uuid,
    ) -> CoreResult<Project> {
        decide(identity, &Action::ManageMembers)?;

        let project = self
            .store
            .find_project(project_id)
            .await?
            .ok_or(CoreError::NotFound("project"))?;

        let members: Vec<Uuid> = project
            .members
            .into_iter()
            .filter(|id| *id != member_id)
            .collect();

        self.store
            .update_project(
                project_id,
                ProjectPatch {
                    members: Some(members),
                    ..Default::default()
                },
            )
            .await?
            .ok_or(CoreError::NotFound("project"))
    }
}
