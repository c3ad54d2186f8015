//! HTTP handlers for the todo collection.
//!
//! # Design
//! Handlers take their inputs as raw extractor results (`Result<Json<Value>, _>`,
//! `Result<Path<String>, _>`, ...) and run them through small validation
//! functions that either produce typed values or an [`ApiError`]. Nothing
//! reaches the store until it has been validated. Every failure is answered
//! with a JSON body of the form `{"error": "<message>"}`.

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Category, Todo, TodoPatch};
use crate::store::SharedStore;

/// Mount point of [`routes`] within the application router.
pub const TODOS_PATH: &str = "/api/v1/todos";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid category")]
    InvalidCategory,

    #[error("Text is required")]
    InvalidText,

    #[error("Completed must be a boolean")]
    InvalidCompleted,

    #[error("Invalid ID")]
    InvalidId,

    #[error("Todo not found")]
    NotFound,

    /// The body was not JSON, or was sent without a JSON content type.
    #[error("{0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status(), error = %self, "request rejected");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidId
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        ApiError::InvalidCategory
    }
}

/// Response of the bulk delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: usize,
}

type QueryPairs = Vec<(String, String)>;

/// Accepts exactly the strings `"personal"` and `"professional"`.
pub fn validate_category(value: Option<&Value>) -> Result<Category, ApiError> {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or(ApiError::InvalidCategory)
}

/// Any string, including the empty one.
pub fn validate_text(value: Option<&Value>) -> Result<String, ApiError> {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ApiError::InvalidText)
}

/// The optional `category` query parameter. Repeating the key, or sending it
/// in array form (`category[]=...`), is an error.
pub fn category_param(pairs: &[(String, String)]) -> Result<Option<Category>, ApiError> {
    if pairs.iter().any(|(key, _)| key == "category[]") {
        return Err(ApiError::InvalidCategory);
    }

    let mut values = pairs
        .iter()
        .filter(|(key, _)| key == "category")
        .map(|(_, value)| value.as_str());

    match (values.next(), values.next()) {
        (None, _) => Ok(None),
        (Some(value), None) => value
            .parse()
            .map(Some)
            .map_err(|_| ApiError::InvalidCategory),
        (Some(_), Some(_)) => Err(ApiError::InvalidCategory),
    }
}

pub fn validate_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    let Path(id) = path?;
    if id.trim().is_empty() {
        return Err(ApiError::InvalidId);
    }
    Ok(id)
}

/// Raw update body as JSON. An empty body, or one not sent as JSON, carries no
/// fields; a JSON body that does not parse is rejected.
pub fn update_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, ApiError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().starts_with("application/json"));
    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// Builds a patch from an update body. Absent and `null` fields are skipped,
/// unknown fields (including `id`) are ignored. A non-object body is an
/// empty patch.
pub fn parse_patch(body: &Value) -> Result<TodoPatch, ApiError> {
    let present = |key: &str| body.get(key).filter(|v| !v.is_null());

    let text = present("text")
        .map(|v| validate_text(Some(v)))
        .transpose()?;
    let completed = present("completed")
        .map(|v| v.as_bool().ok_or(ApiError::InvalidCompleted))
        .transpose()?;
    let category = present("category")
        .map(|v| validate_category(Some(v)))
        .transpose()?;

    Ok(TodoPatch {
        text,
        completed,
        category,
    })
}

pub fn routes() -> Router<SharedStore> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        // Registered ahead of `/{id}` so "completed" is never taken for an id.
        // Other methods on the literal segment address a todo with that id.
        .route(
            "/completed",
            delete(delete_completed).put(update_completed_literal),
        )
        .route("/{id}", put(update_todo).delete(delete_todo))
        .route("/{id}/toggle", patch(toggle_todo))
}

async fn list_todos(
    State(store): State<SharedStore>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(pairs) = query?;
    let category = category_param(&pairs)?;
    let todos = store.read().await.list(category);
    Ok(Json(todos))
}

async fn create_todo(
    State(store): State<SharedStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(body) = body?;
    let text = validate_text(body.get("text"))?;
    let category = validate_category(body.get("category"))?;

    let todo = store.write().await.add(Todo::new(text, category));
    tracing::info!(id = %todo.id, category = %todo.category, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let id = validate_id(path)?;
    apply_update(&store, id, &headers, &body).await
}

async fn update_completed_literal(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    apply_update(&store, "completed".to_string(), &headers, &body).await
}

async fn apply_update(
    store: &SharedStore,
    id: String,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<Todo>, ApiError> {
    let patch = parse_patch(&update_body(headers, body)?)?;

    let todo = store
        .write()
        .await
        .update(&id, patch)
        .ok_or(ApiError::NotFound)?;
    tracing::info!(%id, "todo updated");
    Ok(Json(todo))
}

async fn toggle_todo(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = validate_id(path)?;
    let todo = store.write().await.toggle(&id).ok_or(ApiError::NotFound)?;
    tracing::info!(%id, completed = todo.completed, "todo toggled");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id(path)?;
    if !store.write().await.remove(&id) {
        return Err(ApiError::NotFound);
    }
    tracing::info!(%id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_completed(
    State(store): State<SharedStore>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Query(pairs) = query?;
    let category = category_param(&pairs)?.ok_or(ApiError::InvalidCategory)?;

    let deleted = store.write().await.remove_completed(category);
    tracing::info!(%category, deleted, "completed todos cleared");
    Ok(Json(Deleted { deleted }))
}
