use async_trait::async_trait;

use super::todo::{NewTodo, Todo, TodoId};

/// Persistence port for todos. Absence is reported through `Option`/`bool`
/// rather than errors; the service layer decides what "not found" means.
/// Any implementation of these five operations is a valid substitute.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    /// All todos, ordered by creation time ascending.
    async fn get_all(&self) -> anyhow::Result<Vec<Todo>>;
    async fn get_by_id(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    /// Persists the draft, assigning id and both timestamps.
    async fn create(&self, todo: NewTodo) -> anyhow::Result<Todo>;
    /// Persists title and completed, refreshing `updated_at`. `None` when the
    /// id no longer exists.
    async fn update(&self, todo: &Todo) -> anyhow::Result<Option<Todo>>;
    /// True if a row was removed.
    async fn delete(&self, id: TodoId) -> anyhow::Result<bool>;
}
