use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const ADA: &str =
    r#"{"first_name":"Ada","last_name":"Lovelace","dob":"1815-12-10","amount_due":"5.1"}"#;

// --- list ---

#[tokio::test]
async fn list_students_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/students")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Array(vec![]));
    assert_eq!(body["count"], 0);
}

// --- create ---

#[tokio::test]
async fn create_student_returns_201_envelope() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/students", ADA))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["student_id"], 1);
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["dob"], "1815-12-10");
    assert_eq!(body["data"]["amount_due"], 5.1);
}

#[tokio::test]
async fn create_student_trims_names_and_defaults_amount() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/students",
            r#"{"first_name":"  Ada ","last_name":" Lovelace  ","dob":"1815-12-10"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["last_name"], "Lovelace");
    assert_eq!(body["data"]["amount_due"], 0.0);
}

#[tokio::test]
async fn create_student_accepts_numeric_amount() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/students",
            r#"{"first_name":"Ada","last_name":"Lovelace","dob":"1815-12-10","amount_due":7}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["amount_due"], 7.0);
}

#[tokio::test]
async fn create_student_missing_name_returns_400_envelope() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/students",
            r#"{"last_name":"Lovelace","dob":"1815-12-10"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "first_name: First name is required");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn create_student_negative_amount_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/students",
            r#"{"first_name":"Ada","last_name":"Lovelace","dob":"1815-12-10","amount_due":"-2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "amount_due: Cannot be negative");
}

// --- get ---

#[tokio::test]
async fn get_student_not_found_envelope() {
    let app = app();
    let resp = app.oneshot(get_request("/students/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn create_then_get_roundtrip() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/students", ADA))
        .await
        .unwrap();
    let created = body_json(resp).await;
    let id = created["data"]["student_id"].as_u64().unwrap();

    let resp = app
        .oneshot(get_request(&format!("/students/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"], created["data"]);
}

// --- update ---

#[tokio::test]
async fn update_student_applies_and_trims_fields() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/students", ADA))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/students/1",
            r#"{"first_name":" Augusta ","last_name":"King","dob":"1815-12-10","amount_due":"0"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["first_name"], "Augusta");
    assert_eq!(body["data"]["last_name"], "King");
    assert_eq!(body["data"]["amount_due"], 0.0);
}

#[tokio::test]
async fn update_missing_student_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request("PUT", "/students/42", ADA))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn update_rejects_blank_name() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/students", ADA))
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request("PUT", "/students/1", r#"{"first_name":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "first_name: First name is required");
}

// --- delete ---

#[tokio::test]
async fn delete_student_then_gone() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/students", ADA))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/students/1")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Deleted successfully");
    assert!(body.get("data").is_none());

    let resp = app.oneshot(get_request("/students/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_student_returns_404() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/students/5")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
}

// --- ids ---

#[tokio::test]
async fn ids_are_sequential() {
    let app = app();
    for expected in 1..=3u64 {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/students", ADA))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["data"]["student_id"], expected);
    }
}
