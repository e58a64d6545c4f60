/// Integration tests for the project manager
///
/// Runs the full service stack against the in-memory store.

use uuid::Uuid;
use worklane_shared::auth::policy::Deny;
use worklane_shared::error::CoreError;
use worklane_shared::models::project::ProjectStatus;
use worklane_shared::models::user::{Role, User, UserIdentity};
use worklane_shared::service::projects::{ProjectService, ProjectUpdate};
use worklane_shared::service::query::QueryService;
use worklane_shared::service::tasks::TaskService;
use worklane_shared::store::memory::MemStore;
use worklane_shared::store::Store;

async fn seed_user(store: &MemStore, name: &str, role: Role) -> UserIdentity {
    let user = User::new(name, format!("{name}@example.com"), role, "hash");
    store.insert_user(&user).await.unwrap();
    user.identity()
}

#[tokio::test]
async fn create_then_read_round_trips_with_defaults() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;

    let projects = ProjectService::new(&store);
    let created = projects
        .create(&admin, "Website Relaunch".to_string(), String::new())
        .await
        .unwrap();

    assert_eq!(created.title, "Website Relaunch");
    assert_eq!(created.description, "");
    assert_eq!(created.status, ProjectStatus::Active);
    assert_eq!(created.created_by, admin.id);
    assert!(created.members.is_empty());

    let read_back = store.find_project(created.id).await.unwrap().unwrap();
    assert_eq!(read_back.id, created.id);
    assert_eq!(read_back.title, created.title);
    assert_eq!(read_back.status, created.status);
}

#[tokio::test]
async fn create_is_admin_only() {
    let store = MemStore::new();
    let member = seed_user(&store, "mia", Role::Member).await;

    let result = ProjectService::new(&store)
        .create(&member, "p".to_string(), String::new())
        .await;

    assert!(matches!(result, Err(CoreError::Denied(Deny::AdminOnly))));
}

#[tokio::test]
async fn create_rejects_empty_title() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;

    let result = ProjectService::new(&store)
        .create(&admin, "   ".to_string(), String::new())
        .await;

    assert!(matches!(result, Err(CoreError::Validation(_))));
}

#[tokio::test]
async fn update_applies_only_provided_fields() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let projects = ProjectService::new(&store);

    let created = projects
        .create(&admin, "Initial".to_string(), "desc".to_string())
        .await
        .unwrap();

    let updated = projects
        .update(
            &admin,
            created.id,
            ProjectUpdate {
                status: Some(ProjectStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Initial");
    assert_eq!(updated.description, "desc");
    assert_eq!(updated.status, ProjectStatus::Completed);
}

#[tokio::test]
async fn update_by_non_creator_is_rejected() {
    let store = MemStore::new();
    let creator = seed_user(&store, "ada", Role::Admin).await;
    let other_admin = seed_user(&store, "bob", Role::Admin).await;
    let insider = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);

    let project = projects
        .create(&creator, "p".to_string(), String::new())
        .await
        .unwrap();
    projects
        .add_member(&creator, project.id, insider.id)
        .await
        .unwrap();

    // Another admin is rejected, and so is a member of the project.
    for who in [other_admin, insider] {
        let result = projects
            .update(
                &who,
                project.id,
                ProjectUpdate {
                    title: Some("hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(CoreError::Denied(Deny::NotAuthorized))));
    }
}

#[tokio::test]
async fn update_missing_project_is_not_found() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;

    let result = ProjectService::new(&store)
        .update(&admin, Uuid::new_v4(), ProjectUpdate::default())
        .await;

    assert!(matches!(result, Err(CoreError::NotFound("project"))));
}

#[tokio::test]
async fn delete_cascades_to_tasks() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let projects = ProjectService::new(&store);
    let tasks = TaskService::new(&store);
    let queries = QueryService::new(&store);

    let doomed = projects
        .create(&admin, "doomed".to_string(), String::new())
        .await
        .unwrap();
    let kept = projects
        .create(&admin, "kept".to_string(), String::new())
        .await
        .unwrap();

    tasks
        .create(&admin, doomed.id, "a".to_string(), None)
        .await
        .unwrap();
    tasks
        .create(&admin, doomed.id, "b".to_string(), None)
        .await
        .unwrap();
    let survivor = tasks
        .create(&admin, kept.id, "c".to_string(), None)
        .await
        .unwrap();

    projects.delete(&admin, doomed.id).await.unwrap();

    let listed = queries.list_tasks(&admin).await.unwrap();
    assert!(listed.iter().all(|t| t.project_id != doomed.id));
    assert!(listed.iter().any(|t| t.id == survivor.id));
    assert!(store.tasks_for_project(doomed.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_is_allowed_for_any_admin() {
    // Deletion checks the role only; the creator check is deliberately
    // absent, unlike update.
    let store = MemStore::new();
    let creator = seed_user(&store, "ada", Role::Admin).await;
    let other_admin = seed_user(&store, "bob", Role::Admin).await;
    let projects = ProjectService::new(&store);

    let project = projects
        .create(&creator, "p".to_string(), String::new())
        .await
        .unwrap();

    let deleted = projects.delete(&other_admin, project.id).await.unwrap();
    assert_eq!(deleted.id, project.id);
}

#[tokio::test]
async fn delete_is_admin_only() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);

    let project = projects
        .create(&admin, "p".to_string(), String::new())
        .await
        .unwrap();

    let result = projects.delete(&member, project.id).await;
    assert!(matches!(result, Err(CoreError::Denied(Deny::AdminOnly))));
}

#[tokio::test]
async fn add_member_rejects_duplicates() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);

    let project = projects
        .create(&admin, "p".to_string(), String::new())
        .await
        .unwrap();

    projects.add_member(&admin, project.id, member.id).await.unwrap();
    let result = projects.add_member(&admin, project.id, member.id).await;

    assert!(matches!(result, Err(CoreError::Conflict(_))));
}

#[tokio::test]
async fn add_member_rejects_non_member_roles() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let other_admin = seed_user(&store, "bob", Role::Admin).await;
    let projects = ProjectService::new(&store);

    let project = projects
        .create(&admin, "p".to_string(), String::new())
        .await
        .unwrap();

    // Admins cannot join a member set, and neither can unknown ids.
    let result = projects.add_member(&admin, project.id, other_admin.id).await;
    assert!(matches!(result, Err(CoreError::Validation(_))));

    let result = projects.add_member(&admin, project.id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(CoreError::Validation(_))));
}

#[tokio::test]
async fn remove_member_is_idempotent() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);

    let project = projects
        .create(&admin, "p".to_string(), String::new())
        .await
        .unwrap();
    projects.add_member(&admin, project.id, member.id).await.unwrap();

    let first = projects
        .remove_member(&admin, project.id, member.id)
        .await
        .unwrap();
    let second = projects
        .remove_member(&admin, project.id, member.id)
        .await
        .unwrap();

    assert!(first.members.is_empty());
    assert_eq!(first.members, second.members);
}

#[tokio::test]
async fn removing_a_member_keeps_stale_assignments() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);
    let tasks = TaskService::new(&store);

    let project = projects
        .create(&admin, "p".to_string(), String::new())
        .await
        .unwrap();
    projects.add_member(&admin, project.id, member.id).await.unwrap();
    let task = tasks
        .create(&admin, project.id, "t".to_string(), Some(member.id))
        .await
        .unwrap();

    projects.remove_member(&admin, project.id, member.id).await.unwrap();

    let task = store.find_task(task.id).await.unwrap().unwrap();
    assert_eq!(task.assigned_to, Some(member.id));
}
