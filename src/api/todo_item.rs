use crate::domain::todo_item::driven_ports::{TodoItemReader, TodoItemWriter};
use crate::domain::todo_item::driving_ports::TodoItemPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    GenericErrorResponse, Json, TodoItemErrorResponse, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::response::ErrorResponse;
use axum::routing::get;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(list_items, get_item, create_item, update_item, delete_item))]
/// Defines the OpenAPI documentation for the todo item API
pub struct TodoItemApi;
/// Constant used to group todo item endpoints in OpenAPI documentation
pub const TODO_ITEM_API_GROUP: &str = "Todo Items";

/// Builds the router for every todo item route, to be nested under [super::TODO_ITEMS_PATH]
pub fn todo_item_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let item_service = domain::todo_item::TodoItemService {};
                let item_reader = persistence::db_todo_item_driven_ports::DbTodoItemReader;

                list_items(&mut ext_cxn, &item_service, &item_reader).await
            })
            .post(
                |State(app_state): AppState, Json(new_item): Json<dto::NewTodoItem>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let item_service = domain::todo_item::TodoItemService {};
                    let item_writer = persistence::db_todo_item_driven_ports::DbTodoItemWriter;

                    create_item(new_item, &mut ext_cxn, &item_service, &item_writer).await
                },
            ),
        )
        .route(
            "/:item_id",
            get(
                |State(app_state): AppState, Path(item_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let item_service = domain::todo_item::TodoItemService {};
                    let item_reader = persistence::db_todo_item_driven_ports::DbTodoItemReader;

                    get_item(item_id, &mut ext_cxn, &item_service, &item_reader).await
                },
            )
            .put(
                |State(app_state): AppState,
                 Path(item_id): Path<i64>,
                 Json(update): Json<dto::UpdateTodoItem>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let item_service = domain::todo_item::TodoItemService {};
                    let item_reader = persistence::db_todo_item_driven_ports::DbTodoItemReader;
                    let item_writer = persistence::db_todo_item_driven_ports::DbTodoItemWriter;

                    update_item(
                        item_id,
                        update,
                        &mut ext_cxn,
                        &item_service,
                        &item_reader,
                        &item_writer,
                    )
                    .await
                },
            )
            .delete(
                |State(app_state): AppState, Path(item_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let item_service = domain::todo_item::TodoItemService {};
                    let item_reader = persistence::db_todo_item_driven_ports::DbTodoItemReader;
                    let item_writer = persistence::db_todo_item_driven_ports::DbTodoItemWriter;

                    delete_item(
                        item_id,
                        &mut ext_cxn,
                        &item_service,
                        &item_reader,
                        &item_writer,
                    )
                    .await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/api/TodoItems",
    tag = TODO_ITEM_API_GROUP,
    responses(
        (status = 200, description = "Every item on the to-do list", body = [dto::TodoItem]),
        (status = 500, description = "The todo item store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Retrieves every todo item
async fn list_items(
    ext_cxn: &mut impl ExternalConnectivity,
    item_service: &impl TodoItemPort,
    item_read: &impl TodoItemReader,
) -> Result<Json<Vec<dto::TodoItem>>, ErrorResponse> {
    info!("Listing todo items");
    let items = item_service
        .list_items(&mut *ext_cxn, item_read)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(items.into_iter().map(dto::TodoItem::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/TodoItems/{item_id}",
    tag = TODO_ITEM_API_GROUP,
    params(("item_id" = i64, Path, description = "ID of the todo item to fetch")),
    responses(
        (status = 200, description = "The requested todo item", body = dto::TodoItem),
        (status = 404, description = "No todo item has the given ID"),
        (status = 500, description = "The todo item store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Retrieves a single todo item
async fn get_item(
    item_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    item_service: &impl TodoItemPort,
    item_read: &impl TodoItemReader,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Fetching todo item {item_id}");
    let item = item_service
        .get_item(item_id, &mut *ext_cxn, item_read)
        .await
        .map_err(TodoItemErrorResponse)?;

    Ok(Json(dto::TodoItem::from(item)))
}

#[utoipa::path(
    post,
    path = "/api/TodoItems",
    tag = TODO_ITEM_API_GROUP,
    request_body = dto::NewTodoItem,
    responses(
        (
            status = 201,
            description = "The todo item was created",
            body = dto::TodoItem,
            headers(("Location" = String, description = "Path where the new item can be fetched")),
        ),
        (status = 400, description = "The request body was malformed or invalid", body = crate::routing_utils::BasicErrorResponse),
        (status = 500, description = "The todo item store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Adds a new item to the to-do list
async fn create_item(
    new_item: dto::NewTodoItem,
    ext_cxn: &mut impl ExternalConnectivity,
    item_service: &impl TodoItemPort,
    item_write: &impl TodoItemWriter,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<dto::TodoItem>), ErrorResponse> {
    info!("Creating todo item {new_item}");
    new_item
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let domain_item = domain::todo_item::NewTodoItem::from(new_item);
    let created_item = item_service
        .create_item(&domain_item, &mut *ext_cxn, item_write)
        .await
        .map_err(GenericErrorResponse)?;
    let location = format!("{}/{}", super::TODO_ITEMS_PATH, created_item.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto::TodoItem::from(created_item)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/TodoItems/{item_id}",
    tag = TODO_ITEM_API_GROUP,
    params(("item_id" = i64, Path, description = "ID of the todo item to update")),
    request_body = dto::UpdateTodoItem,
    responses(
        (status = 204, description = "The todo item was updated"),
        (status = 400, description = "The body was invalid, or its ID does not match the path"),
        (status = 404, description = "No todo item has the given ID"),
        (status = 500, description = "The todo item store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Replaces the name and completion status of a todo item
async fn update_item(
    item_id: i64,
    update: dto::UpdateTodoItem,
    ext_cxn: &mut impl ExternalConnectivity,
    item_service: &impl TodoItemPort,
    item_read: &impl TodoItemReader,
    item_write: &impl TodoItemWriter,
) -> Result<StatusCode, ErrorResponse> {
    info!("Updating todo item {item_id}");
    update.validate().map_err(ValidationErrorResponse::from)?;

    let domain_update = domain::todo_item::UpdateTodoItem::from(update);
    item_service
        .update_item(item_id, &domain_update, &mut *ext_cxn, item_read, item_write)
        .await
        .map_err(TodoItemErrorResponse)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/TodoItems/{item_id}",
    tag = TODO_ITEM_API_GROUP,
    params(("item_id" = i64, Path, description = "ID of the todo item to delete")),
    responses(
        (status = 204, description = "The todo item was deleted"),
        (status = 404, description = "No todo item has the given ID"),
        (status = 500, description = "The todo item store could not be reached", body = crate::routing_utils::BasicErrorResponse),
    ),
)]
/// Removes a todo item
async fn delete_item(
    item_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    item_service: &impl TodoItemPort,
    item_read: &impl TodoItemReader,
    item_write: &impl TodoItemWriter,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting todo item {item_id}");
    item_service
        .delete_item(item_id, &mut *ext_cxn, item_read, item_write)
        .await
        .map_err(TodoItemErrorResponse)?;

    Ok(StatusCode::NO_CONTENT)
}
