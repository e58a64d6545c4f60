/// Integration tests for the aggregation/query service
///
/// Runs against the in-memory store; covers role scoping, search, the
/// recent-tasks cap, dashboard counters, and orphan reconciliation.

use uuid::Uuid;
use worklane_shared::auth::policy::Deny;
use worklane_shared::error::CoreError;
use worklane_shared::models::task::Task;
use worklane_shared::models::user::{Role, User, UserIdentity};
use worklane_shared::service::projects::ProjectService;
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
async fn project_listing_is_role_scoped() {
    let store = MemStore::new();
    let admin_a = seed_user(&store, "ada", Role::Admin).await;
    let admin_b = seed_user(&store, "bob", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);
    let queries = QueryService::new(&store);

    let first = projects
        .create(&admin_a, "Website Relaunch".to_string(), String::new())
        .await
        .unwrap();
    projects
        .create(&admin_a, "Backend Cleanup".to_string(), String::new())
        .await
        .unwrap();
    projects
        .create(&admin_b, "Mobile App".to_string(), String::new())
        .await
        .unwrap();
    projects.add_member(&admin_a, first.id, member.id).await.unwrap();

    let a_sees = queries.list_projects(&admin_a, None).await.unwrap();
    assert_eq!(a_sees.len(), 2);
    assert!(a_sees.iter().all(|p| p.created_by == admin_a.id));

    let b_sees = queries.list_projects(&admin_b, None).await.unwrap();
    assert_eq!(b_sees.len(), 1);

    let m_sees = queries.list_projects(&member, None).await.unwrap();
    assert_eq!(m_sees.len(), 1);
    assert_eq!(m_sees[0].id, first.id);
}

#[tokio::test]
async fn project_search_matches_substrings_case_insensitively() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let projects = ProjectService::new(&store);
    let queries = QueryService::new(&store);

    projects
        .create(&admin, "Website Relaunch".to_string(), String::new())
        .await
        .unwrap();
    projects
        .create(&admin, "Backend Cleanup".to_string(), String::new())
        .await
        .unwrap();

    let hits = queries.list_projects(&admin, Some("WEB")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Website Relaunch");

    let none = queries.list_projects(&admin, Some("payroll")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn project_detail_enforces_visibility() {
    let store = MemStore::new();
    let creator = seed_user(&store, "ada", Role::Admin).await;
    let other_admin = seed_user(&store, "bob", Role::Admin).await;
    let insider = seed_user(&store, "mia", Role::Member).await;
    let outsider = seed_user(&store, "zoe", Role::Member).await;
    let projects = ProjectService::new(&store);
    let tasks = TaskService::new(&store);
    let queries = QueryService::new(&store);

    let project = projects
        .create(&creator, "p".to_string(), String::new())
        .await
        .unwrap();
    projects.add_member(&creator, project.id, insider.id).await.unwrap();
    tasks
        .create(&creator, project.id, "t".to_string(), None)
        .await
        .unwrap();

    let detail = queries.get_project(&insider, project.id).await.unwrap();
    assert_eq!(detail.project.id, project.id);
    assert_eq!(detail.tasks.len(), 1);

    // An outside member and a non-creator admin are both shut out.
    for who in [outsider, other_admin] {
        let result = queries.get_project(&who, project.id).await;
        assert!(matches!(result, Err(CoreError::Denied(Deny::AccessDenied))));
    }

    let result = queries.get_project(&creator, Uuid::new_v4()).await;
    assert!(matches!(result, Err(CoreError::NotFound("project"))));
}

#[tokio::test]
async fn task_listing_caps_at_ten_most_recent() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);
    let tasks = TaskService::new(&store);
    let queries = QueryService::new(&store);

    let project = projects
        .create(&admin, "p".to_string(), String::new())
        .await
        .unwrap();

    for i in 0..12 {
        let assignee = (i < 3).then_some(member.id);
        tasks
            .create(&admin, project.id, format!("task-{i}"), assignee)
            .await
            .unwrap();
    }

    let admin_sees = queries.list_tasks(&admin).await.unwrap();
    assert_eq!(admin_sees.len(), 10);
    assert_eq!(admin_sees[0].title, "task-11");
    assert_eq!(admin_sees[9].title, "task-2");

    let member_sees = queries.list_tasks(&member).await.unwrap();
    assert_eq!(member_sees.len(), 3);
    assert!(member_sees.iter().all(|t| t.assigned_to == Some(member.id)));
}

#[tokio::test]
async fn dashboard_counts_admin_tasks_system_wide() {
    let store = MemStore::new();
    let admin_a = seed_user(&store, "ada", Role::Admin).await;
    let admin_b = seed_user(&store, "bob", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let projects = ProjectService::new(&store);
    let tasks = TaskService::new(&store);
    let queries = QueryService::new(&store);

    let p1 = projects
        .create(&admin_a, "p1".to_string(), String::new())
        .await
        .unwrap();
    let p2 = projects
        .create(&admin_a, "p2".to_string(), String::new())
        .await
        .unwrap();
    let p3 = projects
        .create(&admin_b, "p3".to_string(), String::new())
        .await
        .unwrap();
    projects.add_member(&admin_a, p1.id, member.id).await.unwrap();

    // Five tasks across every project; two assigned to the member.
    tasks.create(&admin_a, p1.id, "t1".to_string(), Some(member.id)).await.unwrap();
    tasks.create(&admin_a, p1.id, "t2".to_string(), Some(member.id)).await.unwrap();
    tasks.create(&admin_a, p2.id, "t3".to_string(), None).await.unwrap();
    tasks.create(&admin_b, p3.id, "t4".to_string(), None).await.unwrap();
    tasks.create(&admin_b, p3.id, "t5".to_string(), None).await.unwrap();

    // Admins count their own projects but every task in the system,
    // including tasks of projects they never created.
    let counts = queries.dashboard_counts(&admin_a).await.unwrap();
    assert_eq!(counts.projects_count, 2);
    assert_eq!(counts.tasks_count, 5);

    let counts = queries.dashboard_counts(&admin_b).await.unwrap();
    assert_eq!(counts.projects_count, 1);
    assert_eq!(counts.tasks_count, 5);

    let counts = queries.dashboard_counts(&member).await.unwrap();
    assert_eq!(counts.projects_count, 1);
    assert_eq!(counts.tasks_count, 2);
}

#[tokio::test]
async fn admin_listing_reaps_orphaned_tasks() {
    let store = MemStore::new();
    let admin = seed_user(&store, "ada", Role::Admin).await;
    let member = seed_user(&store, "mia", Role::Member).await;
    let queries = QueryService::new(&store);

    // Simulate a cascade delete that crashed between the two halves:
    // the project is gone, its task is not.
    let orphan = Task::new("leftover", Uuid::new_v4(), None);
    store.insert_task(&orphan).await.unwrap();

    // Member listings leave the orphan alone.
    queries.list_projects(&member, None).await.unwrap();
    assert!(store.find_task(orphan.id).await.unwrap().is_some());

    // The next admin listing reaps it.
    queries.list_projects(&admin, None).await.unwrap();
    assert!(store.find_task(orphan.id).await.unwrap().is_none());
}
