use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use tasklist_store::{Todo, TodoRepo};

use crate::error::ApiError;

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: TodoRepo,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub text: String,
}

/// Update body. Both fields default when absent, matching the lenient
/// parsing of the original API: missing text becomes "", missing
/// completed becomes false.
#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.repo.list()?))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let text = input.text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("Todo text cannot be empty".into()));
    }
    Ok(Json(state.repo.create(text)?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    // Unlike create, an empty trimmed text is accepted here. Inherited
    // asymmetry; see DESIGN.md before unifying the two paths.
    Ok(Json(state.repo.update(id, input.text.trim(), input.completed)?))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.repo.delete(id)?))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
