pub mod todo_item;

#[cfg(test)]
mod test_util;
