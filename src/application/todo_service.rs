use std::sync::Arc;

use thiserror::Error;

use crate::domain::repository::TodoRepository;
use crate::domain::todo::{NewTodo, Todo, TodoId};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Use cases for todos. Validation and not-found semantics live here; the
/// repository only reports absence.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_todo(&self, id: TodoId) -> Result<Todo, TodoError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    pub async fn create_todo(&self, title: &str) -> Result<Todo, TodoError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TodoError::Validation("title must not be blank".into()));
        }
        Ok(self.repo.create(NewTodo::new(title)).await?)
    }

    pub async fn toggle_completed(&self, id: TodoId) -> Result<Todo, TodoError> {
        let mut todo = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(id))?;
        todo.completed = !todo.completed;
        // The row may be deleted between the read and the write; that surfaces
        // as not-found, not as a storage fault.
        self.repo
            .update(&todo)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(TodoError::NotFound(id))
        }
    }
}
