use actix_web::web::Data;
use actix_web::{App, test};
use chrono::{Days, Utc};
use serde_json::{Value, json};

use leavehub::config::Config;
use leavehub::directory::InMemoryDirectory;
use leavehub::model::leave_request::LeaveRequest;
use leavehub::store::MemoryStore;
use leavehub::workflow::Workflow;
use leavehub::{LeaveService, routes};

const EMPLOYEE: u64 = 1;
const OTHER_EMPLOYEE: u64 = 2;
const MANAGER: u64 = 3;

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        directory_file: None,
        rate_read_per_min: 10_000,
        rate_write_per_min: 10_000,
        api_prefix: "/api".into(),
    }
}

/// Creation is validated against the real current date, so all test ranges
/// sit in the future.
fn day(offset: u64) -> String {
    (Utc::now().date_naive() + Days::new(offset)).to_string()
}

// The initialized test service has an unnameable type, so app construction
// and the repeated request plumbing live in macros.
macro_rules! spawn_app {
    () => {{
        let service: Data<LeaveService> = Data::new(Workflow::new(
            MemoryStore::new(),
            InMemoryDirectory::default_roster(),
        ));
        let config = test_config();
        test::init_service(
            App::new()
                .app_data(service)
                .configure(|cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

// rate limiter keys on peer IP, which TestRequest does not set by default
macro_rules! send {
    ($app:expr, $req:expr) => {
        test::call_service(
            $app,
            $req.peer_addr("127.0.0.1:9999".parse().unwrap())
                .to_request(),
        )
        .await
    };
}

macro_rules! create_request {
    ($app:expr, $emp:expr, $start:expr, $end:expr) => {
        send!(
            $app,
            test::TestRequest::post()
                .uri("/api/LeaveRequests")
                .set_json(json!({
                    "employee_id": $emp,
                    "start_date": $start,
                    "end_date": $end,
                    "reason": "pto"
                }))
        )
    };
}

macro_rules! set_status {
    ($app:expr, $id:expr, $actor:expr, $status:expr) => {
        send!(
            $app,
            test::TestRequest::put()
                .uri(&format!("/api/LeaveRequests/{}/status", $id))
                .set_json(json!({ "actor_id": $actor, "status": $status }))
        )
    };
}

macro_rules! cancel_request {
    ($app:expr, $id:expr, $emp:expr) => {
        send!(
            $app,
            test::TestRequest::post()
                .uri(&format!("/api/LeaveRequests/{}/cancel", $id))
                .set_json(json!({ "employee_id": $emp }))
        )
    };
}

#[actix_web::test]
async fn create_and_fetch_pending_request() {
    let app = spawn_app!();

    let resp = create_request!(&app, EMPLOYEE, day(10), day(12));
    assert_eq!(resp.status(), 201);
    let created: LeaveRequest = test::read_body_json(resp).await;
    assert_eq!(created.employee_id, EMPLOYEE);
    assert_eq!(created.status.to_string(), "Pending");

    let resp = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/LeaveRequests/{}", created.id))
    );
    assert_eq!(resp.status(), 200);
    let fetched: LeaveRequest = test::read_body_json(resp).await;
    assert_eq!(fetched.id, created.id);
}

#[actix_web::test]
async fn creation_rule_violations_map_to_http_errors() {
    let app = spawn_app!();

    // reversed range
    let resp = create_request!(&app, EMPLOYEE, day(12), day(10));
    assert_eq!(resp.status(), 400);

    // start before today
    let yesterday = (Utc::now().date_naive() - Days::new(1)).to_string();
    let resp = create_request!(&app, EMPLOYEE, yesterday, day(5));
    assert_eq!(resp.status(), 400);

    // unknown employee
    let resp = create_request!(&app, 999, day(10), day(12));
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn long_request_auto_rejects_and_manager_overrides() {
    let app = spawn_app!();

    // 20 inclusive days
    let resp = create_request!(&app, EMPLOYEE, day(10), day(29));
    assert_eq!(resp.status(), 201);
    let created: LeaveRequest = test::read_body_json(resp).await;
    assert_eq!(created.status.to_string(), "Rejected");

    let resp = set_status!(&app, created.id, MANAGER, "Approved");
    assert_eq!(resp.status(), 200);
    let updated: LeaveRequest = test::read_body_json(resp).await;
    assert_eq!(updated.status.to_string(), "Approved");
}

#[actix_web::test]
async fn overlapping_approved_leave_conflicts() {
    let app = spawn_app!();

    let resp = create_request!(&app, EMPLOYEE, day(10), day(14));
    let first: LeaveRequest = test::read_body_json(resp).await;
    let resp = set_status!(&app, first.id, MANAGER, "Approved");
    assert_eq!(resp.status(), 200);

    let resp = create_request!(&app, EMPLOYEE, day(13), day(19));
    assert_eq!(resp.status(), 409);

    // a different employee is unaffected
    let resp = create_request!(&app, OTHER_EMPLOYEE, day(13), day(19));
    assert_eq!(resp.status(), 201);
}

#[actix_web::test]
async fn set_status_requires_manager_and_valid_value() {
    let app = spawn_app!();

    let resp = create_request!(&app, EMPLOYEE, day(10), day(12));
    let created: LeaveRequest = test::read_body_json(resp).await;

    let resp = set_status!(&app, created.id, EMPLOYEE, "Approved");
    assert_eq!(resp.status(), 403);

    let resp = set_status!(&app, created.id, MANAGER, "Maybe");
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("Maybe"));

    let resp = set_status!(&app, 424242, MANAGER, "Rejected");
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn cancel_is_owner_only_and_pending_only() {
    let app = spawn_app!();

    let resp = create_request!(&app, EMPLOYEE, day(10), day(12));
    let created: LeaveRequest = test::read_body_json(resp).await;

    // non-owner gets the same error as a missing request
    let resp = cancel_request!(&app, created.id, OTHER_EMPLOYEE);
    assert_eq!(resp.status(), 403);
    let resp = cancel_request!(&app, 424242, OTHER_EMPLOYEE);
    assert_eq!(resp.status(), 403);

    // once approved, the owner can no longer cancel
    let resp = set_status!(&app, created.id, MANAGER, "Approved");
    assert_eq!(resp.status(), 200);
    let resp = cancel_request!(&app, created.id, EMPLOYEE);
    assert_eq!(resp.status(), 409);

    // a fresh pending request cancels fine
    let resp = create_request!(&app, EMPLOYEE, day(20), day(21));
    let pending: LeaveRequest = test::read_body_json(resp).await;
    let resp = cancel_request!(&app, pending.id, EMPLOYEE);
    assert_eq!(resp.status(), 200);

    let resp = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/LeaveRequests/{}", pending.id))
    );
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn manager_delete_ignores_status() {
    let app = spawn_app!();

    let resp = create_request!(&app, EMPLOYEE, day(10), day(12));
    let created: LeaveRequest = test::read_body_json(resp).await;
    let resp = set_status!(&app, created.id, MANAGER, "Approved");
    assert_eq!(resp.status(), 200);

    let resp = send!(
        &app,
        test::TestRequest::delete().uri(&format!(
            "/api/LeaveRequests/{}?manager_id={}",
            created.id, EMPLOYEE
        ))
    );
    assert_eq!(resp.status(), 403);

    let resp = send!(
        &app,
        test::TestRequest::delete().uri(&format!(
            "/api/LeaveRequests/{}?manager_id={}",
            created.id, MANAGER
        ))
    );
    assert_eq!(resp.status(), 200);

    let resp = send!(
        &app,
        test::TestRequest::delete().uri(&format!(
            "/api/LeaveRequests/{}?manager_id={}",
            created.id, MANAGER
        ))
    );
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn listing_scopes_by_caller_and_fails_closed() {
    let app = spawn_app!();

    let resp = create_request!(&app, EMPLOYEE, day(10), day(11));
    assert_eq!(resp.status(), 201);
    let resp = create_request!(&app, OTHER_EMPLOYEE, day(30), day(31));
    assert_eq!(resp.status(), 201);
    let resp = create_request!(&app, EMPLOYEE, day(20), day(21));
    assert_eq!(resp.status(), 201);

    let resp = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/LeaveRequests?caller_id={MANAGER}"))
    );
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 3);
    let data = body["data"].as_array().unwrap();
    // newest start date first
    assert_eq!(data[0]["employee_id"], OTHER_EMPLOYEE);

    let resp = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/LeaveRequests?caller_id={EMPLOYEE}"))
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 2);

    // no caller identity: denied, never the manager view
    let resp = send!(&app, test::TestRequest::get().uri("/api/LeaveRequests"));
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn employee_roster_and_email_lookup() {
    let app = spawn_app!();

    let resp = send!(&app, test::TestRequest::get().uri("/api/employees"));
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let resp = send!(
        &app,
        test::TestRequest::get().uri("/api/employees?email=mary.manager@company.com")
    );
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["role"], "Manager");

    let resp = send!(
        &app,
        test::TestRequest::get().uri("/api/employees?email=ghost@company.com")
    );
    assert_eq!(resp.status(), 404);
}
