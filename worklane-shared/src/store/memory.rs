/// In-memory store for tests and demos
///
/// Entities live in insertion-ordered vectors behind `RwLock`s, which
/// matches the "store-natural order" the query service relies on. This
/// backend mirrors the semantics of the Postgres store closely enough
/// that the whole service layer can be exercised against it without a
/// database.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::policy::{ProjectScope, TaskScope};
use crate::models::project::{Project, ProjectPatch};
use crate::models::task::{Task, TaskPatch};
use crate::models::user::{User, UserPatch};

use super::{Store, StoreError};

/// In-memory [`Store`] implementation
#[derive(Debug, Default)]
pub struct MemStore {
    users: RwLock<Vec<User>>,
    projects: RwLock<Vec<Project>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn project_in_scope(project: &Project, scope: &ProjectScope) -> bool {
    match scope {
        ProjectScope::CreatedBy(id) => project.created_by == *id,
        ProjectScope::MemberOf(id) => project.has_member(*id),
    }
}

fn task_in_scope(task: &Task, scope: &TaskScope) -> bool {
    match scope {
        TaskScope::All => true,
        TaskScope::AssignedTo(id) => task.is_assigned_to(*id),
    }
}

#[async_trait]
impl Store for MemStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::Duplicate("email"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().unwrap().clone())
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(avatar_url) = patch.avatar_url {
            user.avatar_url = avatar_url;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn insert_project(&self, project: &Project) -> Result<(), StoreError> {
        self.projects.write().unwrap().push(project.clone());
        Ok(())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self
            .projects
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_projects(
        &self,
        scope: &ProjectScope,
        title_search: Option<&str>,
    ) -> Result<Vec<Project>, StoreError> {
        let needle = title_search.map(str::to_lowercase);
        Ok(self
            .projects
            .read()
            .unwrap()
            .iter()
            .filter(|p| project_in_scope(p, scope))
            .filter(|p| match &needle {
                Some(needle) => p.title.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().unwrap();
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            project.title = title;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(members) = patch.members {
            project.members = members;
        }
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().unwrap();
        let Some(pos) = projects.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        Ok(Some(projects.remove(pos)))
    }

    async fn count_projects(&self, scope: &ProjectScope) -> Result<u64, StoreError> {
        Ok(self
            .projects
            .read()
            .unwrap()
            .iter()
            .filter(|p| project_in_scope(p, scope))
            .count() as u64)
    }

    async fn insert_task(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks.write().unwrap().push(task.clone());
        Ok(())
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn list_tasks(
        &self,
        scope: &TaskScope,
        limit: Option<i64>,
    ) -> Result<Vec<Task>, StoreError> {
        // Reverse insertion order first so equal timestamps still come
        // out most-recent-first after the stable sort.
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|t| task_in_scope(t, scope))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            tasks.truncate(limit.max(0) as usize);
        }
        Ok(tasks)
    }

    async fn tasks_for_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(assigned_to) = patch.assigned_to {
            task.assigned_to = assigned_to;
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().unwrap();
        let Some(pos) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        Ok(Some(tasks.remove(pos)))
    }

    async fn delete_project_tasks(&self, project_id: Uuid) -> Result<u64, StoreError> {
        let mut tasks = self.tasks.write().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.project_id != project_id);
        Ok((before - tasks.len()) as u64)
    }

    async fn count_tasks(&self, scope: &TaskScope) -> Result<u64, StoreError> {
        Ok(self
            .tasks
            .read()
            .unwrap()
            .iter()
            .filter(|t| task_in_scope(t, scope))
            .count() as u64)
    }

    async fn purge_orphan_tasks(&self) -> Result<u64, StoreError> {
        let projects = self.projects.read().unwrap();
        let mut tasks = self.tasks.write().unwrap();
        let before = tasks.len();
        tasks.retain(|t| projects.iter().any(|p| p.id == t.project_id));
        Ok((before - tasks.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemStore::new();
        let a = User::new("A", "same@example.com", Role::Admin, "h");
        let b = User::new("B", "SAME@example.com", Role::Member, "h");

        store.insert_user(&a).await.unwrap();
        assert!(matches!(
            store.insert_user(&b).await,
            Err(StoreError::Duplicate("email"))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_rows_return_none() {
        let store = MemStore::new();
        let id = Uuid::new_v4();
        assert!(store.update_user(id, UserPatch::default()).await.unwrap().is_none());
        assert!(store.update_project(id, ProjectPatch::default()).await.unwrap().is_none());
        assert!(store.update_task(id, TaskPatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_orphan_tasks() {
        let store = MemStore::new();
        let admin = Uuid::new_v4();
        let project = Project::new("kept", "", admin);
        store.insert_project(&project).await.unwrap();
        store.insert_task(&Task::new("kept", project.id, None)).await.unwrap();
        store.insert_task(&Task::new("orphan", Uuid::new_v4(), None)).await.unwrap();

        assert_eq!(store.purge_orphan_tasks().await.unwrap(), 1);
        assert_eq!(store.count_tasks(&TaskScope::All).await.unwrap(), 1);
    }
}
