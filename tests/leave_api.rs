use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{App, test};
use serde_json::{Value, json};

use lms_api::config::Config;
use lms_api::routes;
use lms_api::service::LeaveService;
use lms_api::store::MemoryStore;

macro_rules! app {
    () => {{
        let config = Config::default();
        let service = Data::new(LeaveService::new(Arc::new(MemoryStore::new())));
        test::init_service(
            App::new()
                .app_data(service.clone())
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await
    }};
}

async fn create_employee(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    name: &str,
    department: &str,
) -> u64 {
    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(json!({
            "full_name": name,
            "department": department,
            "joining_date": "2022-01-01"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_u64().unwrap()
}

async fn create_leave(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    payload: Value,
) -> actix_web::dev::ServiceResponse {
    let req = test::TestRequest::post()
        .uri("/api/v1/leave")
        .set_json(payload)
        .to_request();
    test::call_service(app, req).await
}

#[actix_web::test]
async fn create_and_fetch_leave_request() {
    let app = app!();
    let employee_id = create_employee(&app, "Jane Roe", "Engineering").await;

    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2026-03-01",
            "end_date": "2026-03-05",
            "reason": "spring trip"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["employee_name"], "Jane Roe");
    let id = created["id"].as_u64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/leave/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["start_date"], "2026-03-01");
    assert_eq!(fetched["leave_type"], "annual");
}

#[actix_web::test]
async fn unknown_leave_request_is_404() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/99")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Leave request 99 not found");
}

#[actix_web::test]
async fn create_for_unknown_employee_is_404() {
    let app = app!();
    let resp = create_leave(
        &app,
        json!({
            "employee_id": 42,
            "leave_type": "annual",
            "start_date": "2026-03-01",
            "end_date": "2026-03-05"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn overlapping_request_is_rejected() {
    let app = app!();
    let employee_id = create_employee(&app, "Jane Roe", "Engineering").await;

    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2026-05-01",
            "end_date": "2026-05-05"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Inclusive endpoints collide.
    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "other",
            "start_date": "2026-05-05",
            "end_date": "2026-05-08"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Leave dates overlap an existing request for this employee"
    );
}

#[actix_web::test]
async fn sick_leave_without_reason_is_rejected() {
    let app = app!();
    let employee_id = create_employee(&app, "Jane Roe", "Engineering").await;

    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "sick",
            "start_date": "2026-02-01",
            "end_date": "2026-02-02"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Sick leave requires a reason");
}

#[actix_web::test]
async fn annual_quota_is_enforced_per_year() {
    let app = app!();
    let employee_id = create_employee(&app, "Jane Roe", "Engineering").await;

    // 18 days in January.
    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2026-01-01",
            "end_date": "2026-01-18"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // 3 more would make 21.
    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2026-06-01",
            "end_date": "2026-06-03"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Next year starts a fresh quota.
    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2027-06-01",
            "end_date": "2027-06-03"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn approve_happy_path_and_double_approve() {
    let app = app!();
    let employee_id = create_employee(&app, "Jane Roe", "Engineering").await;
    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2026-03-01",
            "end_date": "2026-03-05"
        }),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{id}/approve"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(resp).await;
    assert_eq!(approved["status"], "approved");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{id}/approve"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Only pending leave requests can be approved");
}

#[actix_web::test]
async fn update_and_delete_round_out_the_lifecycle() {
    let app = app!();
    let employee_id = create_employee(&app, "Jane Roe", "Engineering").await;
    let resp = create_leave(
        &app,
        json!({
            "employee_id": employee_id,
            "leave_type": "annual",
            "start_date": "2026-03-01",
            "end_date": "2026-03-05"
        }),
    )
    .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_u64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/leave/{id}"))
        .set_json(json!({
            "employee_id": employee_id,
            "leave_type": "other",
            "start_date": "2026-04-01",
            "end_date": "2026-04-02",
            "reason": "moving day"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["leave_type"], "other");
    assert_eq!(updated["status"], "pending");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/leave/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/leave/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn filter_paginates_and_reports_total() {
    let app = app!();
    let a = create_employee(&app, "Jane Roe", "Engineering").await;
    let b = create_employee(&app, "John Doe", "Sales").await;

    for (employee_id, start, end) in [
        (a, "2026-01-10", "2026-01-12"),
        (a, "2026-03-01", "2026-03-05"),
        (b, "2026-02-01", "2026-02-03"),
    ] {
        let resp = create_leave(
            &app,
            json!({
                "employee_id": employee_id,
                "leave_type": "annual",
                "start_date": start,
                "end_date": end,
                "reason": "trip"
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/leave/filter?per_page=2&sort_by=startdate&sort_order=desc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["start_date"], "2026-03-01");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/leave/filter?employee_id={a}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 2);

    // Page zero is rejected rather than clamped.
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/filter?page=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Unknown status values are an error, unknown sort values fall back.
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/filter?status=bogus")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/leave/filter?sort_by=bogus&sort_order=sideways")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn report_groups_by_employee() {
    let app = app!();
    let a = create_employee(&app, "Jane Roe", "Engineering").await;
    let b = create_employee(&app, "John Doe", "Sales").await;

    for payload in [
        json!({
            "employee_id": a,
            "leave_type": "annual",
            "start_date": "2026-03-01",
            "end_date": "2026-03-05"
        }),
        json!({
            "employee_id": a,
            "leave_type": "sick",
            "start_date": "2026-07-01",
            "end_date": "2026-07-02",
            "reason": "flu"
        }),
        json!({
            "employee_id": b,
            "leave_type": "annual",
            "start_date": "2026-04-01",
            "end_date": "2026-04-03"
        }),
    ] {
        let resp = create_leave(&app, payload).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/leave/report?year=2026")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows: Value = test::read_body_json(resp).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["employee_id"].as_u64(), Some(a));
    assert_eq!(rows[0]["total_leaves"], 2);
    assert_eq!(rows[0]["annual_leaves"], 1);
    assert_eq!(rows[0]["sick_leaves"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/leave/report?year=2026&department=Sales")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let rows: Value = test::read_body_json(resp).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["full_name"], "John Doe");

    // A year with no requests yields no rows.
    let req = test::TestRequest::get()
        .uri("/api/v1/leave/report?year=2020")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let rows: Value = test::read_body_json(resp).await;
    assert!(rows.as_array().unwrap().is_empty());
}
