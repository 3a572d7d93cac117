//! Integration tests for the course catalog endpoints.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn catalog_starts_with_the_seeded_builtins() {
    let (app, _) = common::create_test_app("http://127.0.0.1:9").await;

    let (status, body) = common::request_json(&app, "GET", "/api/v1/courses", None).await;
    assert_eq!(status, StatusCode::OK);

    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0]["id"], "spn1130");
    assert_eq!(courses[0]["name"], "SPN1130: Beginning Spanish I");
}

#[tokio::test]
async fn adding_a_course_derives_its_id_from_the_code() {
    let (app, _) = common::create_test_app("http://127.0.0.1:9").await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/v1/courses",
        Some(json!({"code": "CS 101", "name": "Intro to Computer Science"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "cs101");
    assert_eq!(body["name"], "CS 101: Intro to Computer Science");

    let (_, courses) = common::request_json(&app, "GET", "/api/v1/courses", None).await;
    assert_eq!(courses.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn blank_code_or_name_is_rejected() {
    let (app, _) = common::create_test_app("http://127.0.0.1:9").await;

    let (status, _) = common::request_json(
        &app,
        "POST",
        "/api/v1/courses",
        Some(json!({"code": "   ", "name": "Something"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = common::request_json(
        &app,
        "POST",
        "/api/v1/courses",
        Some(json!({"code": "", "name": "Something"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, courses) = common::request_json(&app, "GET", "/api/v1/courses", None).await;
    assert_eq!(courses.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn duplicate_course_ids_overwrite_the_existing_entry() {
    let (app, _) = common::create_test_app("http://127.0.0.1:9").await;

    common::request_json(
        &app,
        "POST",
        "/api/v1/courses",
        Some(json!({"code": "HIS200", "name": "Old Title"})),
    )
    .await;
    common::request_json(
        &app,
        "POST",
        "/api/v1/courses",
        Some(json!({"code": "his 200", "name": "New Title"})),
    )
    .await;

    let (_, courses) = common::request_json(&app, "GET", "/api/v1/courses", None).await;
    let courses = courses.as_array().unwrap();
    assert_eq!(courses.len(), 4);

    let matching: Vec<_> = courses
        .iter()
        .filter(|course| course["id"] == "his200")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["name"], "his 200: New Title");
}
