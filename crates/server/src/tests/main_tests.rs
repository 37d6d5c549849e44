use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

fn test_app() -> Router {
    let api = ApiContext::with_users(vec![
        User::new(UserId(1), "A", "a@x.com"),
        User::new(UserId(2), "B", "b@x.com"),
    ]);
    build_router(Arc::new(AppState { api }))
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn json_request(method: &str, uri: &str, value: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn list_returns_users_in_insertion_order() {
    let request = Request::get("/users").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<User> = read_json(response).await;
    let ids: Vec<i64> = users.iter().map(|u| u.id.0).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn create_assigns_next_id_and_returns_created() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            serde_json::json!({ "name": "C", "email": "c@x.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: User = read_json(response).await;
    assert_eq!(created, User::new(UserId(3), "C", "c@x.com"));

    let request = Request::get("/users/3").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn put_replaces_record_under_path_id() {
    let response = test_app()
        .oneshot(json_request(
            "PUT",
            "/users/2",
            serde_json::json!({ "name": "B2", "email": "b2@x.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = read_json(response).await;
    assert_eq!(updated, User::new(UserId(2), "B2", "b2@x.com"));
}

#[tokio::test]
async fn delete_returns_empty_object() {
    let app = test_app();
    let request = Request::delete("/users/1")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(response).await;
    assert_eq!(body, serde_json::json!({}));

    let request = Request::get("/users").body(Body::empty()).expect("request");
    let users: Vec<User> = read_json(app.oneshot(request).await.expect("response")).await;
    assert_eq!(users, vec![User::new(UserId(2), "B", "b@x.com")]);
}

#[tokio::test]
async fn unknown_id_is_not_found_with_error_body() {
    let app = test_app();
    for request in [
        Request::get("/users/99").body(Body::empty()).expect("request"),
        Request::delete("/users/99")
            .body(Body::empty())
            .expect("request"),
        json_request(
            "PUT",
            "/users/99",
            serde_json::json!({ "name": "X", "email": "x@x.com" }),
        ),
    ] {
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let err: ApiError = read_json(response).await;
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("99"));
    }
}

#[tokio::test]
async fn invalid_payload_is_bad_request() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/users",
            serde_json::json!({ "name": "", "email": "c@x.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = read_json(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
}
