use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{NewTodo, Todo, TodoId},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // A pooled :memory: database is per-connection; keep it on one.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query(
            "SELECT id, title, completed, created_at, updated_at FROM todos
             ORDER BY created_at, id",
        )
        .fetch_all(&*self.pool)
        .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn get_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(
            "SELECT id, title, completed, created_at, updated_at FROM todos WHERE id = ?1",
        )
        .bind(id.0)
        .fetch_optional(&*self.pool)
        .await?;
        row.map(row_to_todo).transpose()
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO todos (title, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(Todo {
            id: TodoId(result.last_insert_rowid()),
            title: todo.title,
            completed: todo.completed,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, todo: &Todo) -> Result<Option<Todo>> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE todos SET title = ?2, completed = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(todo.id.0)
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(now.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Todo { updated_at: now, ..todo.clone() }))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(Todo {
        id: TodoId(row.get("id")),
        title: row.get("title"),
        completed: row.get("completed"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid timestamp in todos table: {s:?}"))?
        .with_timezone(&Utc))
}
