use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// DTO for a todo item returned from the API
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoItem {
    #[schema(example = 3)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub name: String,
    #[schema(example = false)]
    pub is_complete: bool,
}

impl From<domain::todo_item::TodoItem> for TodoItem {
    fn from(value: domain::todo_item::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            name: value.name,
            is_complete: value.is_complete,
        }
    }
}

/// PostgreSQL text columns cannot hold NUL characters
fn no_nul_characters(name: &str) -> Result<(), ValidationError> {
    if name.contains('\0') {
        return Err(ValidationError::new("no_nul_characters"));
    }

    Ok(())
}

/// DTO for creating a new todo item via the API
#[derive(Deserialize, Display, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[display("\"{name}\" (complete: {is_complete})")]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodoItem {
    /// Accepted for compatibility with clients that echo items back, but ignored.
    /// New items always get their ID from the store.
    #[schema(example = json!(null))]
    pub id: Option<i64>,
    #[validate(length(max = 200), custom = "no_nul_characters")]
    #[schema(example = "Buy milk")]
    pub name: String,
    #[schema(example = false)]
    pub is_complete: bool,
}

impl From<NewTodoItem> for domain::todo_item::NewTodoItem {
    fn from(value: NewTodoItem) -> Self {
        domain::todo_item::NewTodoItem {
            name: value.name,
            is_complete: value.is_complete,
        }
    }
}

/// DTO for replacing the content of a todo item via the API
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateTodoItem {
    /// Must be the same as the ID in the request path
    #[schema(example = 3)]
    pub id: i64,
    #[validate(length(max = 200), custom = "no_nul_characters")]
    #[schema(example = "Buy milk")]
    pub name: String,
    #[schema(example = true)]
    pub is_complete: bool,
}

impl From<UpdateTodoItem> for domain::todo_item::UpdateTodoItem {
    fn from(value: UpdateTodoItem) -> Self {
        domain::todo_item::UpdateTodoItem {
            id: value.id,
            name: value.name,
            is_complete: value.is_complete,
        }
    }
}
