use crate::domain::todo_item::driven_ports::{SaveError, TodoItemReader, TodoItemWriter};
use crate::domain::todo_item::driving_ports::TodoItemError;
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, anyhow};
use tracing::warn;

/// A single entry on the to-do list as it is stored
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TodoItem {
    pub id: i64,
    pub name: String,
    pub is_complete: bool,
    /// Stored alongside the item but never exposed through the API
    pub secret: Option<String>,
}

#[cfg_attr(test, derive(Clone, Debug))]
pub struct NewTodoItem {
    pub name: String,
    pub is_complete: bool,
}

#[cfg_attr(test, derive(Clone, Debug))]
pub struct UpdateTodoItem {
    /// Must match the ID of the item being updated
    pub id: i64,
    pub name: String,
    pub is_complete: bool,
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    pub trait TodoItemReader {
        async fn all_items(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn item_by_id(
            &self,
            item_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;
        async fn item_exists(
            &self,
            item_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<bool, anyhow::Error>;
    }

    /// Failure to write an item back to the store
    #[derive(Debug, Error)]
    pub enum SaveError {
        /// The row no longer holds the values it had when it was read, or is gone entirely
        #[error("the todo item was modified or removed since it was read")]
        Conflict,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }

    pub trait TodoItemWriter {
        /// Persists a new item, returning it with its store-assigned ID
        async fn create_item(
            &self,
            new_item: &NewTodoItem,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<TodoItem, anyhow::Error>;

        /// Overwrites the stored item with [updated], provided the stored row still
        /// matches [previous]. Otherwise fails with [SaveError::Conflict].
        async fn save_item(
            &self,
            previous: &TodoItem,
            updated: &TodoItem,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), SaveError>;

        /// Removes the item, failing with [SaveError::Conflict] if there was nothing to remove
        async fn remove_item(
            &self,
            item_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), SaveError>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoItemError {
        #[error("todo item {0} does not exist")]
        NotFound(i64),
        #[error("the item ID in the path ({path_id}) does not match the one in the body ({body_id})")]
        IdMismatch { path_id: i64, body_id: i64 },
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoItemPort {
        async fn list_items(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::TodoItemReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn get_item(
            &self,
            item_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::TodoItemReader,
        ) -> Result<TodoItem, TodoItemError>;
        async fn create_item(
            &self,
            new_item: &NewTodoItem,
            ext_cxn: &mut impl ExternalConnectivity,
            item_write: &impl driven_ports::TodoItemWriter,
        ) -> Result<TodoItem, anyhow::Error>;
        async fn update_item(
            &self,
            item_id: i64,
            update: &UpdateTodoItem,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::TodoItemReader,
            item_write: &impl driven_ports::TodoItemWriter,
        ) -> Result<(), TodoItemError>;
        async fn delete_item(
            &self,
            item_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            item_read: &impl driven_ports::TodoItemReader,
            item_write: &impl driven_ports::TodoItemWriter,
        ) -> Result<(), TodoItemError>;
    }
}

pub struct TodoItemService {}

impl driving_ports::TodoItemPort for TodoItemService {
    async fn list_items(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl TodoItemReader,
    ) -> Result<Vec<TodoItem>, anyhow::Error> {
        item_read
            .all_items(&mut *ext_cxn)
            .await
            .context("listing todo items")
    }

    async fn get_item(
        &self,
        item_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl TodoItemReader,
    ) -> Result<TodoItem, TodoItemError> {
        item_read
            .item_by_id(item_id, &mut *ext_cxn)
            .await
            .context("fetching a todo item")?
            .ok_or(TodoItemError::NotFound(item_id))
    }

    async fn create_item(
        &self,
        new_item: &NewTodoItem,
        ext_cxn: &mut impl ExternalConnectivity,
        item_write: &impl TodoItemWriter,
    ) -> Result<TodoItem, anyhow::Error> {
        item_write
            .create_item(new_item, &mut *ext_cxn)
            .await
            .context("creating a todo item")
    }

    #[tracing::instrument(skip(self, update, ext_cxn, item_read, item_write))]
    async fn update_item(
        &self,
        item_id: i64,
        update: &UpdateTodoItem,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl TodoItemReader,
        item_write: &impl TodoItemWriter,
    ) -> Result<(), TodoItemError> {
        if update.id != item_id {
            return Err(TodoItemError::IdMismatch {
                path_id: item_id,
                body_id: update.id,
            });
        }

        let Some(existing_item) = item_read
            .item_by_id(item_id, &mut *ext_cxn)
            .await
            .context("looking up a todo item to update")?
        else {
            return Err(TodoItemError::NotFound(item_id));
        };

        let updated_item = TodoItem {
            name: update.name.clone(),
            is_complete: update.is_complete,
            ..existing_item.clone()
        };

        match item_write
            .save_item(&existing_item, &updated_item, &mut *ext_cxn)
            .await
        {
            Ok(()) => Ok(()),
            Err(SaveError::Conflict) => {
                let still_exists = item_read
                    .item_exists(item_id, &mut *ext_cxn)
                    .await
                    .context("checking whether a conflicting todo item still exists")?;
                if still_exists {
                    Err(anyhow!("todo item {item_id} was modified by another request during the update").into())
                } else {
                    warn!("Todo item {item_id} was deleted while it was being updated");
                    Err(TodoItemError::NotFound(item_id))
                }
            }
            Err(SaveError::PortError(err)) => Err(err.context("saving an updated todo item").into()),
        }
    }

    #[tracing::instrument(skip(self, ext_cxn, item_read, item_write))]
    async fn delete_item(
        &self,
        item_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        item_read: &impl TodoItemReader,
        item_write: &impl TodoItemWriter,
    ) -> Result<(), TodoItemError> {
        let item_exists = item_read
            .item_exists(item_id, &mut *ext_cxn)
            .await
            .context("looking up a todo item to delete")?;
        if !item_exists {
            return Err(TodoItemError::NotFound(item_id));
        }

        item_write
            .remove_item(item_id, &mut *ext_cxn)
            .await
            .map_err(|save_err| anyhow::Error::from(save_err).context("deleting a todo item"))?;

        Ok(())
    }
}
