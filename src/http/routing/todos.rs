use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::AppState;
use crate::domain::todo::{Todo, TodoId};
use crate::http::types::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/:id",
            get(get_todo).patch(toggle_todo).delete(delete_todo),
        )
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list_todos().await?))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.service.get_todo(TodoId(id)).await?))
}

#[derive(Debug, Deserialize)]
struct CreateTodoBody {
    // Option so that a body without the field maps to 400, not a 422 rejection
    title: Option<String>,
}

async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoBody>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let title = body
        .title
        .ok_or_else(|| ApiError::validation("request body must include a 'title' field"))?;
    let todo = state.service.create_todo(&title).await?;
    tracing::debug!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.service.toggle_completed(TodoId(id)).await?))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_todo(TodoId(id)).await?;
    tracing::debug!(%id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
