use crate::domain;
use crate::domain::todo_item::driven_ports::SaveError;
use crate::domain::todo_item::{NewTodoItem, TodoItem};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{FromRow, query, query_as, query_scalar};

pub struct DbTodoItemReader;

#[derive(FromRow)]
struct TodoItemRow {
    id: i64,
    name: String,
    is_complete: bool,
    secret: Option<String>,
}

impl From<TodoItemRow> for domain::todo_item::TodoItem {
    fn from(value: TodoItemRow) -> Self {
        TodoItem {
            id: value.id,
            name: value.name,
            is_complete: value.is_complete,
            secret: value.secret,
        }
    }
}

impl domain::todo_item::driven_ports::TodoItemReader for DbTodoItemReader {
    async fn all_items(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let items: Vec<TodoItem> = query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.name, ti.is_complete, ti.secret FROM todo_item ti ORDER BY ti.id",
        )
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch all todo items")?
        .into_iter()
        .map(TodoItem::from)
        .collect();

        Ok(items)
    }

    async fn item_by_id(
        &self,
        item_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let item = query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.name, ti.is_complete, ti.secret FROM todo_item ti WHERE ti.id = $1",
        )
        .bind(item_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo item by ID")?
        .map(TodoItem::from);

        Ok(item)
    }

    async fn item_exists(&self, item_id: i64, ext_cxn: &mut impl ExternalConnectivity) -> Result<bool, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let exists: bool = query_scalar("SELECT EXISTS(SELECT 1 FROM todo_item ti WHERE ti.id = $1)")
            .bind(item_id)
            .fetch_one(cxn.borrow_connection())
            .await
            .context("trying to detect a todo item by ID")?;

        Ok(exists)
    }
}

pub struct DbTodoItemWriter;

impl domain::todo_item::driven_ports::TodoItemWriter for DbTodoItemWriter {
    async fn create_item(
        &self,
        new_item: &NewTodoItem,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<TodoItem, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let created = query_as::<_, TodoItemRow>(
            "INSERT INTO todo_item(name, is_complete) VALUES ($1, $2) RETURNING id, name, is_complete, secret",
        )
        .bind(&new_item.name)
        .bind(new_item.is_complete)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo item into the database")?;

        Ok(TodoItem::from(created))
    }

    async fn save_item(
        &self,
        previous: &TodoItem,
        updated: &TodoItem,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), SaveError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // Only matches if nobody else changed the row since it was read
        let update_result = query(
            "UPDATE todo_item SET name = $1, is_complete = $2 \
             WHERE id = $3 AND name = $4 AND is_complete = $5",
        )
        .bind(&updated.name)
        .bind(updated.is_complete)
        .bind(previous.id)
        .bind(&previous.name)
        .bind(previous.is_complete)
        .execute(cxn.borrow_connection())
        .await
        .context("trying to update a todo item in the database")?;

        if update_result.rows_affected() == 0 {
            return Err(SaveError::Conflict);
        }

        Ok(())
    }

    async fn remove_item(
        &self,
        item_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), SaveError> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let delete_result = query("DELETE FROM todo_item WHERE id = $1")
            .bind(item_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo item from the database")?;

        if delete_result.rows_affected() == 0 {
            return Err(SaveError::Conflict);
        }

        Ok(())
    }
}
