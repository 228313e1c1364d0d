pub mod swagger_main;
pub mod todo_item;

#[cfg(test)]
mod test_util;

/// Path the todo item routes are mounted under
pub const TODO_ITEMS_PATH: &str = "/api/TodoItems";
