use std::sync::Arc;

use axum::body::to_bytes;
use axum::Router;
use serde_json::{json, Value};

use todo_api::application::todo_service::TodoService;
use todo_api::domain::repository::TodoRepository;
use todo_api::http::routing::{self, AppState};
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;

async fn app() -> Router {
    let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    let service = TodoService::new(Arc::new(repo));
    routing::app(AppState::new(service))
}

#[tokio::test]
async fn create_list_get_toggle_delete_roundtrip() {
    let app = app().await;

    // create
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "Test" }))).await;
    assert_eq!(res.status(), 201);
    let body = json_body(res).await;
    assert_eq!(body["title"], "Test");
    assert_eq!(body["completed"], false);
    let id = body["id"].as_i64().unwrap();

    // list
    let res = request(&app, "GET", "/api/todos", None).await;
    assert_eq!(res.status(), 200);
    let body = json_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // get
    let res = request(&app, "GET", &format!("/api/todos/{id}"), None).await;
    assert_eq!(res.status(), 200);

    // toggle
    let res = request(&app, "PATCH", &format!("/api/todos/{id}"), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json_body(res).await["completed"], true);

    // delete
    let res = request(&app, "DELETE", &format!("/api/todos/{id}"), None).await;
    assert_eq!(res.status(), 204);

    // gone
    let res = request(&app, "GET", &format!("/api/todos/{id}"), None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn create_trims_title() {
    let app = app().await;
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "  Buy milk  " }))).await;
    assert_eq!(res.status(), 201);
    let body = json_body(res).await;
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["completed"], false);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn create_without_title_is_bad_request() {
    let app = app().await;
    let res = request(&app, "POST", "/api/todos", Some(json!({}))).await;
    assert_eq!(res.status(), 400);
    assert!(json_body(res).await["error"].is_string());
}

#[tokio::test]
async fn create_with_blank_title_is_bad_request() {
    let app = app().await;
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "   " }))).await;
    assert_eq!(res.status(), 400);

    // nothing persisted
    let res = request(&app, "GET", "/api/todos", None).await;
    assert_eq!(json_body(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = app().await;
    for (method, path) in [
        ("GET", "/api/todos/999"),
        ("PATCH", "/api/todos/999"),
        ("DELETE", "/api/todos/999"),
    ] {
        let res = request(&app, method, path, None).await;
        assert_eq!(res.status(), 404, "{method} {path}");
        assert!(json_body(res).await["error"].is_string());
    }
}

#[tokio::test]
async fn toggle_twice_restores_completed() {
    let app = app().await;
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "Flip" }))).await;
    let id = json_body(res).await["id"].as_i64().unwrap();

    let res = request(&app, "PATCH", &format!("/api/todos/{id}"), None).await;
    assert_eq!(json_body(res).await["completed"], true);
    let res = request(&app, "PATCH", &format!("/api/todos/{id}"), None).await;
    assert_eq!(json_body(res).await["completed"], false);
}

#[tokio::test]
async fn list_returns_creation_order() {
    let app = app().await;
    for title in ["First", "Second"] {
        let res = request(&app, "POST", "/api/todos", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201);
    }
    let res = request(&app, "GET", "/api/todos", None).await;
    let body = json_body(res).await;
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let app = app().await;
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "Once" }))).await;
    let id = json_body(res).await["id"].as_i64().unwrap();

    let res = request(&app, "DELETE", &format!("/api/todos/{id}"), None).await;
    assert_eq!(res.status(), 204);
    let res = request(&app, "DELETE", &format!("/api/todos/{id}"), None).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn graphql_endpoint_shares_the_service() {
    let app = app().await;
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "Shared" }))).await;
    assert_eq!(res.status(), 201);

    let query = json!({ "query": "{ todos { title completed } }" });
    let res = request(&app, "POST", "/graphql", Some(query)).await;
    assert_eq!(res.status(), 200);
    let body = json_body(res).await;
    assert_eq!(body["data"]["todos"][0]["title"], "Shared");

    // field errors ride the errors array, still HTTP 200
    let query = json!({ "query": r#"{ todo(id: "999") { title } }"# });
    let res = request(&app, "POST", "/graphql", Some(query)).await;
    assert_eq!(res.status(), 200);
    let body = json_body(res).await;
    assert!(body["errors"][0]["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let res = request(&app, "GET", "/health", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(json_body(res).await["status"], "ok");
}

#[tokio::test]
async fn openapi_doc_is_served() {
    let app = app().await;
    let res = request(&app, "GET", "/openapi.yaml", None).await;
    assert_eq!(res.status(), 200);
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    assert!(std::str::from_utf8(&bytes).unwrap().starts_with("openapi:"));
}

async fn request(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(path);
    let req = match body {
        Some(json) => req
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn json_body(res: hyper::Response<axum::body::Body>) -> Value {
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
