//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the collection URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Category, CreateTodo, Deleted, ErrorBody, Todo, UpdateTodo};

/// Path of the todo collection below the server root.
pub const TODOS_PATH: &str = "/api/v1/todos";

/// Everything but RFC 3986 unreserved characters is escaped in an id segment.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    todos_url: String,
}

impl TodoClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            todos_url: format!("{}{TODOS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn build_list_todos(&self, category: Option<Category>) -> HttpRequest {
        let path = match category {
            Some(category) => format!("{}?category={category}", self.todos_url),
            None => self.todos_url.clone(),
        };
        HttpRequest::new(HttpMethod::Get, path)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.todos_url.clone()).with_json(body))
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::new(HttpMethod::Put, self.todo_url(id)).with_json(body))
    }

    pub fn build_toggle_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Patch, format!("{}/toggle", self.todo_url(id)))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.todo_url(id))
    }

    pub fn build_delete_completed(&self, category: Category) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Delete,
            format!("{}/completed?category={category}", self.todos_url),
        )
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        from_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    /// Number of todos the server removed.
    pub fn parse_delete_completed(&self, response: HttpResponse) -> Result<usize, ApiError> {
        check_status(&response, 200)?;
        from_json::<Deleted>(&response.body).map(|d| d.deleted)
    }

    fn todo_url(&self, id: &str) -> String {
        format!("{}/{}", self.todos_url, utf8_percent_encode(id, ID_SEGMENT))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(ErrorBody { error }) => Err(ApiError::Rejected {
            status: response.status,
            message: error,
        }),
        Err(_) => Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}
