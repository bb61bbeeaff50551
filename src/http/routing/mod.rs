pub mod todos;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::application::todo_service::TodoService;
use crate::graphql::{self, TodoSchema};

#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
    pub schema: TodoSchema,
}

impl AppState {
    pub fn new(service: TodoService) -> Self {
        let schema = graphql::build_schema(service.clone());
        Self { service, schema }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/graphql", post(graphql_handler))
        .route("/openapi.yaml", get(openapi))
        .merge(todos::router())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn openapi() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/yaml")],
        include_str!("../../../openapi.yaml"),
    )
}
