use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use nourishplate_shared::test_utils::http_test_utils::{create_request, response_to_json};

use super::{candidates_body, create_test_app, generate_path};

#[tokio::test]
async fn test_plan_events_come_from_the_model() {
    let text = json!([
        {"date": "2026-09-01", "meal": "Oatmeal with berries", "mealType": "breakfast",
         "description": "Warm oats with blueberries", "calories": 320},
        {"date": "2026-09-01", "meal": "Turkey wrap", "mealType": "lunch",
         "description": "Whole wheat wrap", "calories": 410},
        {"date": "2026-09-01", "meal": "Apple with peanut butter", "mealType": "snack",
         "description": "Crisp apple slices"},
        {"date": "2026-09-01", "meal": "Baked salmon", "mealType": "dinner",
         "description": "Salmon with rice", "calories": 520}
    ])
    .to_string();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", generate_path().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidates_body(&format!("```json\n{}\n```", text)))
        .create_async()
        .await;

    let app = create_test_app(&server.url());

    let response = app
        .oneshot(create_request(
            "POST",
            "/diet-plan",
            Some(json!({"fileUrl": "https://files.example/plan.pdf", "fileName": "plan.pdf"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;
    assert_eq!(body["success"], true);

    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["mealType"], "breakfast");
    assert_eq!(events[0]["calories"], 320);
    assert!(events[2].get("calories").is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_plan_generation_failure_falls_back_to_sample() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", generate_path().as_str())
        .with_status(503)
        .with_body("model overloaded")
        .create_async()
        .await;

    let app = create_test_app(&server.url());

    let response = app
        .oneshot(create_request(
            "POST",
            "/diet-plan",
            Some(json!({"fileUrl": "https://files.example/plan.pdf", "fileName": "plan.pdf"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_to_json(response).await;

    let events = body["events"].as_array().unwrap();
    assert!(!events.is_empty());

    let meal_types: HashSet<_> = events
        .iter()
        .map(|e| e["mealType"].as_str().unwrap())
        .collect();
    assert_eq!(meal_types.len(), 4);
}

#[tokio::test]
async fn test_plan_requires_file_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", generate_path().as_str())
        .expect(0)
        .create_async()
        .await;

    let app = create_test_app(&server.url());

    for body in [
        json!({"fileUrl": "", "fileName": "plan.pdf"}),
        json!({"fileUrl": "https://files.example/plan.pdf", "fileName": ""}),
    ] {
        let response = app
            .clone()
            .oneshot(create_request("POST", "/diet-plan", Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_to_json(response).await;
        assert_eq!(body["success"], false);
    }

    mock.assert_async().await;
}
