/// PostgreSQL store implementation
///
/// Production [`Store`] backend on sqlx. Project members are a `UUID[]`
/// column so membership changes are one-row writes, which is the
/// atomicity unit the rest of the system assumes.
///
/// # Example
///
/// ```no_run
/// use worklane_shared::db::pool::{create_pool, DatabaseConfig};
/// use worklane_shared::store::postgres::PgStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy::{ProjectScope, TaskScope};
use crate::models::project::{Project, ProjectPatch};
use crate::models::task::{Task, TaskPatch};
use crate::models::user::{User, UserPatch};

use super::{Store, StoreError};

const USER_COLUMNS: &str = "id, name, email, role, password_hash, avatar_url, created_at, updated_at";
const PROJECT_COLUMNS: &str = "id, title, description, status, created_by, members, created_at, updated_at";
const TASK_COLUMNS: &str = "id, title, project_id, assigned_to, status, created_at, updated_at";

/// PostgreSQL-backed [`Store`]
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks and migrations
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role, password_hash, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError> {
        // Build the update dynamically from the provided fields.
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if patch.password_hash.is_some() {
            bind_count += 1;
            query.push_str(&format!(", password_hash = ${}", bind_count));
        }
        if patch.avatar_url.is_some() {
            bind_count += 1;
            query.push_str(&format!(", avatar_url = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {USER_COLUMNS}"));

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(name) = patch.name {
            q = q.bind(name);
        }
        if let Some(password_hash) = patch.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(avatar_url) = patch.avatar_url {
            q = q.bind(avatar_url);
        }

        let user = q.fetch_optional(&self.pool).await?;

        Ok(user)
    }

    async fn insert_project(&self, project: &Project) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, title, description, status, created_by, members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.status)
        .bind(project.created_by)
        .bind(&project.members)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_projects(
        &self,
        scope: &ProjectScope,
        title_search: Option<&str>,
    ) -> Result<Vec<Project>, StoreError> {
        let scope_clause = match scope {
            ProjectScope::CreatedBy(_) => "created_by = $1",
            ProjectScope::MemberOf(_) => "$1 = ANY(members)",
        };
        let user_id = match scope {
            ProjectScope::CreatedBy(id) | ProjectScope::MemberOf(id) => *id,
        };

        let projects = sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE {scope_clause}
              AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
            ORDER BY created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(title_search)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if patch.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if patch.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if patch.members.is_some() {
            bind_count += 1;
            query.push_str(&format!(", members = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {PROJECT_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);

        if let Some(title) = patch.title {
            q = q.bind(title);
        }
        if let Some(description) = patch.description {
            q = q.bind(description);
        }
        if let Some(status) = patch.status {
            q = q.bind(status);
        }
        if let Some(members) = patch.members {
            q = q.bind(members);
        }

        let project = q.fetch_optional(&self.pool).await?;

        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "DELETE FROM projects WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn count_projects(&self, scope: &ProjectScope) -> Result<u64, StoreError> {
        let (clause, user_id) = match scope {
            ProjectScope::CreatedBy(id) => ("created_by = $1", *id),
            ProjectScope::MemberOf(id) => ("$1 = ANY(members)", *id),
        };

        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM projects WHERE {clause}"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u64)
    }

    async fn insert_task(&self, task: &Task) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, project_id, assigned_to, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(task.project_id)
        .bind(task.assigned_to)
        .bind(task.status)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_tasks(
        &self,
        scope: &TaskScope,
        limit: Option<i64>,
    ) -> Result<Vec<Task>, StoreError> {
        let tasks = match scope {
            TaskScope::All => {
                sqlx::query_as::<_, Task>(&format!(
                    r#"
                    SELECT {TASK_COLUMNS}
                    FROM tasks
                    ORDER BY created_at DESC
                    LIMIT $1
                    "#
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            TaskScope::AssignedTo(user_id) => {
                sqlx::query_as::<_, Task>(&format!(
                    r#"
                    SELECT {TASK_COLUMNS}
                    FROM tasks
                    WHERE assigned_to = $1
                    ORDER BY created_at DESC
                    LIMIT $2
                    "#
                ))
                .bind(user_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(tasks)
    }

    async fn tasks_for_project(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if patch.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if patch.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if patch.assigned_to.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assigned_to = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = patch.title {
            q = q.bind(title);
        }
        if let Some(status) = patch.status {
            q = q.bind(status);
        }
        if let Some(assigned_to) = patch.assigned_to {
            q = q.bind(assigned_to);
        }

        let task = q.fetch_optional(&self.pool).await?;

        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_project_tasks(&self, project_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_tasks(&self, scope: &TaskScope) -> Result<u64, StoreError> {
        let count: i64 = match scope {
            TaskScope::All => {
                sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
                    .fetch_one(&self.pool)
                    .await?
            }
            TaskScope::AssignedTo(user_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE assigned_to = $1")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count as u64)
    }

    async fn purge_orphan_tasks(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "DELETE FROM tasks WHERE project_id NOT IN (SELECT id FROM projects)",
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
