//! Role-scoped dashboard statistics

mod common;

use http::StatusCode;
use serde_json::Value;

async fn dashboard(app: &axum::Router, token: &str) -> Value {
    let response = common::send(app, common::get("/api/dashboard", Some(token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    common::body_json(response).await
}

#[tokio::test]
async fn admin_and_linked_employee_see_matching_counts() {
    let (state, _tmp) = common::test_state().await;
    let app = common::app(&state);

    let admin = common::admin_token(&app).await;
    let alice = common::create_employee(&app, &admin, "Alice Johnson").await;
    common::create_task(&app, &admin, "Finished work", &alice, Some("completed")).await;
    common::create_task(&app, &admin, "Queued work", &alice, None).await;
    common::create_task(&app, &admin, "Ongoing work", &alice, Some("in-progress")).await;

    // Admin view: counts plus the admin-only members
    let stats = dashboard(&app, &admin).await;
    assert_eq!(stats["totalTasks"], 3);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["inProgress"], 1);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["completionRate"], 33);

    let per_employee = stats["tasksPerEmployee"].as_array().unwrap();
    assert_eq!(per_employee.len(), 1);
    assert_eq!(per_employee[0]["employeeName"], "Alice Johnson");
    assert_eq!(per_employee[0]["taskCount"], 3);
    assert_eq!(per_employee[0]["completed"], 1);
    assert_eq!(per_employee[0]["completionRate"], 33);

    assert_eq!(stats["totalEmployees"], 1);
    let activity = stats["recentActivity"].as_array().unwrap();
    let created: i64 = activity.iter().map(|a| a["tasksCreated"].as_i64().unwrap()).sum();
    let completed: i64 = activity
        .iter()
        .map(|a| a["tasksCompleted"].as_i64().unwrap())
        .sum();
    assert_eq!(created, 3);
    assert_eq!(completed, 1);

    // Alice's view: identical counts, no admin-only members
    let token = common::linked_employee_token(&app, &state, "alice@test.dev", &alice).await;
    let stats = dashboard(&app, &token).await;
    assert_eq!(stats["totalTasks"], 3);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["inProgress"], 1);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["completionRate"], 33);
    assert!(stats.get("tasksPerEmployee").is_none());
    assert!(stats.get("recentActivity").is_none());
    assert!(stats.get("totalEmployees").is_none());
}

#[tokio::test]
async fn empty_board_has_zero_completion_rate() {
    let (state, _tmp) = common::test_state().await;
    let app = common::app(&state);

    let admin = common::admin_token(&app).await;
    let stats = dashboard(&app, &admin).await;

    assert_eq!(stats["totalTasks"], 0);
    assert_eq!(stats["completed"], 0);
    assert_eq!(stats["inProgress"], 0);
    assert_eq!(stats["pending"], 0);
    // no division-by-zero fault
    assert_eq!(stats["completionRate"], 0);
    assert_eq!(stats["totalEmployees"], 0);
}

#[tokio::test]
async fn employee_counts_are_scoped_to_their_tasks() {
    let (state, _tmp) = common::test_state().await;
    let app = common::app(&state);

    let admin = common::admin_token(&app).await;
    let alice = common::create_employee(&app, &admin, "Alice Johnson").await;
    let bob = common::create_employee(&app, &admin, "Bob Smith").await;
    common::create_task(&app, &admin, "Alice done", &alice, Some("completed")).await;
    common::create_task(&app, &admin, "Alice pending", &alice, None).await;
    common::create_task(&app, &admin, "Bob pending", &bob, None).await;

    let token = common::linked_employee_token(&app, &state, "alice@test.dev", &alice).await;
    let stats = dashboard(&app, &token).await;
    assert_eq!(stats["totalTasks"], 2);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["completionRate"], 50);

    // the admin still sees the whole board
    let stats = dashboard(&app, &admin).await;
    assert_eq!(stats["totalTasks"], 3);
    assert_eq!(stats["totalEmployees"], 2);
    assert_eq!(stats["tasksPerEmployee"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unlinked_employee_dashboard_is_empty_not_widened() {
    let (state, _tmp) = common::test_state().await;
    let app = common::app(&state);

    let admin = common::admin_token(&app).await;
    let alice = common::create_employee(&app, &admin, "Alice Johnson").await;
    common::create_task(&app, &admin, "Some work", &alice, None).await;

    let body = common::register(&app, "Loner", "loner@test.dev", "password123", None).await;
    let token = body["token"].as_str().unwrap();

    let stats = dashboard(&app, token).await;
    assert_eq!(stats["totalTasks"], 0);
    assert_eq!(stats["completionRate"], 0);
    assert!(stats.get("tasksPerEmployee").is_none());
    assert!(stats.get("recentActivity").is_none());
    assert!(stats.get("totalEmployees").is_none());
}
