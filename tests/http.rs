//! Drives the router in process; no sockets are opened.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use timetable_solver::SolverConfig;
use timetable_solver::server::router;
use tower::ServiceExt;

fn app() -> Router {
    router(SolverConfig::default())
}

fn constraints() -> Value {
    json!({
        "teachers": [{ "id": "t1", "name": "Dr. Smith", "subjects": ["Math", "Physics"] }],
        "subjects": [{ "id": "s1", "name": "Math", "hoursPerWeek": 3 }],
        "rooms": [{ "id": "r1", "name": "Room 101", "capacity": 40 }],
        "classes": [{ "id": "c1", "name": "Class A", "size": 35 }],
        "daysPerWeek": 5,
        "slotsPerDay": 6
    })
}

async fn post_raw(body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/timetable/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn assert_invalid_input(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "invalid_input");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid constraints"));
}

async fn post_generate(body: Value) -> (StatusCode, Value) {
    post_raw(&body.to_string()).await
}

#[tokio::test]
async fn generates_a_timetable() {
    let (status, body) = post_generate(constraints()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let timetable = body["timetable"].as_array().unwrap();
    assert_eq!(timetable.len(), 3);
    assert_eq!(
        timetable[0],
        json!({
            "classId": "c1",
            "subject": "Math",
            "teacher": "Dr. Smith",
            "room": "Room 101",
            "day": 0,
            "slot": 0
        })
    );
    assert_eq!(body["stats"]["totalAssignments"], 3);
    assert_eq!(body["stats"]["teacherLoads"]["Dr. Smith"], 3);
    assert!(body["generationTime"].is_number());
    assert!(body["search"]["candidatesEvaluated"].as_u64().unwrap() >= 3);
}

#[tokio::test]
async fn honours_unavailability_pairs() {
    let mut input = constraints();
    input["teachers"][0]["unavailable"] = json!([[0, 0], [0, 1]]);
    let (status, body) = post_generate(input).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timetable"][0]["slot"], 2);
}

#[tokio::test]
async fn missing_collection_is_bad_request() {
    let mut input = constraints();
    input.as_object_mut().unwrap().remove("rooms");
    let (status, body) = post_generate(input).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "invalid_input");
    assert_eq!(body["error"], "Invalid constraints: At least one room is required");
}

#[tokio::test]
async fn negative_days_per_week_is_bad_request() {
    let mut input = constraints();
    input["daysPerWeek"] = json!(-1);
    let (status, body) = post_generate(input).await;
    assert_invalid_input(status, &body);
}

#[tokio::test]
async fn fractional_days_per_week_is_bad_request() {
    let mut input = constraints();
    input["daysPerWeek"] = json!(2.5);
    let (status, body) = post_generate(input).await;
    assert_invalid_input(status, &body);
}

#[tokio::test]
async fn teacher_without_name_is_bad_request() {
    let mut input = constraints();
    input["teachers"][0].as_object_mut().unwrap().remove("name");
    let (status, body) = post_generate(input).await;
    assert_invalid_input(status, &body);
}

#[tokio::test]
async fn teacher_without_subjects_is_bad_request() {
    let mut input = constraints();
    input["teachers"][0].as_object_mut().unwrap().remove("subjects");
    let (status, body) = post_generate(input).await;
    assert_invalid_input(status, &body);
}

#[tokio::test]
async fn broken_json_is_bad_request() {
    let (status, body) = post_raw("{not json").await;
    assert_invalid_input(status, &body);
}

#[tokio::test]
async fn out_of_range_grid_is_bad_request() {
    let mut input = constraints();
    input["slotsPerDay"] = json!(13);
    let (status, body) = post_generate(input).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
}

#[tokio::test]
async fn infeasible_is_unprocessable() {
    let mut input = constraints();
    input["rooms"][0]["capacity"] = json!(10);
    let (status, body) = post_generate(input).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "infeasible");
}

#[tokio::test]
async fn exhausted_budget_is_service_unavailable() {
    let app = router(SolverConfig {
        max_nodes: Some(1),
        time_limit: None,
    });
    let request = Request::builder()
        .method("POST")
        .uri("/v1/timetable/generate")
        .header("content-type", "application/json")
        .body(Body::from(constraints().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
