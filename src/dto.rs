use utoipa::OpenApi;

pub mod todo_item;

pub use todo_item::{NewTodoItem, TodoItem, UpdateTodoItem};

/// Collects the OpenAPI schemas for every DTO so they can be merged into the API documentation
#[derive(OpenApi)]
#[openapi(components(
    schemas(
        todo_item::TodoItem,
        todo_item::NewTodoItem,
        todo_item::UpdateTodoItem,
        crate::routing_utils::BasicErrorResponse,
        crate::routing_utils::ExtraInfo,
        crate::routing_utils::ValidationErrorSchema,
    ),
    responses(crate::routing_utils::BasicErrorResponse),
))]
pub struct OpenApiSchemas;
