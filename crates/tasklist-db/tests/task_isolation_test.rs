//! Integration tests for cross-user isolation.
//!
//! This test suite validates that a task created by one user is
//! invisible to every other user through get, list, update, and
//! delete — the ownership predicate is part of each statement, so a
//! wrong-user access looks exactly like a missing row.

use tasklist_db::test_fixtures::TestDatabase;
use tasklist_db::{CreateTaskRequest, TaskFilter, TaskRepository, UpdateTaskRequest};

const USER_A: &str = "user-A-123";
const USER_B: &str = "user-B-456";

fn create_req(title: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn test_get_hides_foreign_tasks() {
    let test_db = TestDatabase::new().await.expect("Failed to create fixture");
    let db = &test_db.db;

    let task = db
        .tasks
        .create(USER_A, create_req("A's secret"))
        .await
        .expect("Failed to create task");

    let foreign = db
        .tasks
        .get(task.id, USER_B)
        .await
        .expect("Failed to query as user B");
    assert!(
        foreign.is_none(),
        "User B must not see user A's task, even with the right id"
    );

    let own = db
        .tasks
        .get(task.id, USER_A)
        .await
        .expect("Failed to query as user A");
    assert!(own.is_some());
}

#[tokio::test]
async fn test_update_cannot_touch_foreign_tasks() {
    let test_db = TestDatabase::new().await.expect("Failed to create fixture");
    let db = &test_db.db;

    let task = db
        .tasks
        .create(USER_A, create_req("A's plan"))
        .await
        .expect("Failed to create task");

    let result = db
        .tasks
        .update(
            task.id,
            USER_B,
            UpdateTaskRequest {
                title: Some("B was here".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to run update as user B");
    assert!(
        result.is_none(),
        "A foreign update must look like a missing row"
    );

    let untouched = db
        .tasks
        .get(task.id, USER_A)
        .await
        .expect("Failed to get task")
        .expect("Task not found");
    assert_eq!(untouched.title, "A's plan");
}

#[tokio::test]
async fn test_delete_cannot_remove_foreign_tasks() {
    let test_db = TestDatabase::new().await.expect("Failed to create fixture");
    let db = &test_db.db;

    let task = db
        .tasks
        .create(USER_A, create_req("A's keeper"))
        .await
        .expect("Failed to create task");

    let removed = db
        .tasks
        .delete(task.id, USER_B)
        .await
        .expect("Failed to run delete as user B");
    assert!(!removed);

    let still_there = db
        .tasks
        .get(task.id, USER_A)
        .await
        .expect("Failed to get task");
    assert!(still_there.is_some());
}

#[tokio::test]
async fn test_list_returns_only_own_tasks() {
    let test_db = TestDatabase::new().await.expect("Failed to create fixture");
    let db = &test_db.db;

    db.tasks
        .create(USER_A, create_req("A one"))
        .await
        .expect("Failed to create task");
    db.tasks
        .create(USER_A, create_req("A two"))
        .await
        .expect("Failed to create task");
    db.tasks
        .create(USER_B, create_req("B one"))
        .await
        .expect("Failed to create task");

    let a_tasks = db
        .tasks
        .list(USER_A, TaskFilter::default())
        .await
        .expect("Failed to list as user A");
    assert_eq!(a_tasks.len(), 2);
    assert!(a_tasks.iter().all(|t| t.user_id == USER_A));

    let b_tasks = db
        .tasks
        .list(USER_B, TaskFilter::default())
        .await
        .expect("Failed to list as user B");
    assert_eq!(b_tasks.len(), 1);
    assert_eq!(b_tasks[0].title, "B one");
}
