use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use slrg_core::db::open_db_in_memory;
use slrg_core::PageLimits;
use slrg_server::{build_router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    build_router(AppState::new(open_db_in_memory().unwrap(), PageLimits::default()).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post(app: &Router, uri: &str, body: Value) -> Value {
    let response = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    json_body(response).await
}

#[tokio::test]
async fn unknown_member_yields_404() {
    let app = app();
    for suffix in ["assessments", "educations", "appearances", "furtheredu"] {
        let response = send(&app, Method::GET, &format!("/api/members/42/{suffix}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{suffix}");
    }
}

#[tokio::test]
async fn member_without_records_yields_empty_array() {
    let app = app();
    let member = post(
        &app,
        "/api/members",
        json!({"firstName": "Alice", "lastName": "Keller"}),
    )
    .await;
    let id = member["id"].as_i64().unwrap();

    let response = send(&app, Method::GET, &format!("/api/members/{id}/educations"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn lists_every_owned_record_of_the_member() {
    let app = app();
    let alice = post(
        &app,
        "/api/members",
        json!({"firstName": "Alice", "lastName": "Keller"}),
    )
    .await["id"]
        .as_i64()
        .unwrap();
    let bruno = post(
        &app,
        "/api/members",
        json!({"firstName": "Bruno", "lastName": "Meier"}),
    )
    .await["id"]
        .as_i64()
        .unwrap();

    post(&app, "/api/assessments", json!({"memberId": alice, "score": 72})).await;
    post(&app, "/api/assessments", json!({"memberId": bruno, "score": 64})).await;
    post(&app, "/api/assessments", json!({"memberId": alice, "score": 91})).await;
    post(
        &app,
        "/api/appearances",
        json!({"memberId": alice, "event": "Lake Zurich crossing", "hours": 6}),
    )
    .await;

    let response = send(&app, Method::GET, &format!("/api/members/{alice}/assessments"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let scores: Vec<i64> = json_body(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![72, 91]);

    let response = send(&app, Method::GET, &format!("/api/members/{alice}/appearances"), None).await;
    let body = json_body(response).await;
    assert_eq!(body[0]["event"], "Lake Zurich crossing");
    assert_eq!(body[0]["memberId"], alice);
}

#[tokio::test]
async fn deleting_member_removes_owned_records() {
    let app = app();
    let alice = post(
        &app,
        "/api/members",
        json!({"firstName": "Alice", "lastName": "Keller"}),
    )
    .await["id"]
        .as_i64()
        .unwrap();
    post(
        &app,
        "/api/further-educations",
        json!({"memberId": alice, "course": "CPR refresher"}),
    )
    .await;

    let response = send(&app, Method::DELETE, &format!("/api/members/{alice}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::GET, &format!("/api/members/{alice}/furtheredu"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = send(&app, Method::GET, "/api/further-educations/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owned_record_for_unknown_member_is_an_internal_error() {
    let app = app();
    let response = send(
        &app,
        Method::POST,
        "/api/educations",
        Some(json!({"memberId": 404, "title": "Brevet Plus Pool"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["message"], "error.internal");
}

#[tokio::test]
async fn member_lifecycle_end_to_end() {
    let app = app();
    let alice = post(
        &app,
        "/api/members",
        json!({"firstName": "Alice", "lastName": "Keller"}),
    )
    .await;
    assert_eq!(alice["id"], 1);

    let assessment = post(&app, "/api/assessments", json!({"memberId": 1, "score": 90})).await;
    assert_eq!(assessment["id"], 1);

    let response = send(&app, Method::GET, "/api/members/1/assessments", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["memberId"], 1);
    assert_eq!(body[0]["score"], 90);

    let response = send(&app, Method::DELETE, "/api/members/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(&app, Method::GET, "/api/members/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
