use async_graphql::{Context, EmptySubscription, Error, Object, Result, Schema, SimpleObject, ID};

use crate::application::todo_service::{TodoError, TodoService};
use crate::domain::todo::TodoId;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: TodoService) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

#[derive(SimpleObject)]
#[graphql(name = "Todo")]
pub struct TodoObject {
    pub id: ID,
    pub title: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<crate::domain::todo::Todo> for TodoObject {
    fn from(todo: crate::domain::todo::Todo) -> Self {
        Self {
            id: ID(todo.id.0.to_string()),
            title: todo.title,
            completed: todo.completed,
            created_at: todo.created_at.to_rfc3339(),
            updated_at: todo.updated_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct DeleteResult {
    pub success: bool,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<TodoObject>> {
        let todos = service(ctx).list_todos().await.map_err(resolver_error)?;
        Ok(todos.into_iter().map(Into::into).collect())
    }

    async fn todo(&self, ctx: &Context<'_>, id: ID) -> Result<TodoObject> {
        let id = parse_id(&id)?;
        let todo = service(ctx).get_todo(id).await.map_err(resolver_error)?;
        Ok(todo.into())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_todo(&self, ctx: &Context<'_>, title: String) -> Result<TodoObject> {
        let todo = service(ctx)
            .create_todo(&title)
            .await
            .map_err(resolver_error)?;
        Ok(todo.into())
    }

    async fn toggle_todo(&self, ctx: &Context<'_>, id: ID) -> Result<TodoObject> {
        let id = parse_id(&id)?;
        let todo = service(ctx)
            .toggle_completed(id)
            .await
            .map_err(resolver_error)?;
        Ok(todo.into())
    }

    async fn delete_todo(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteResult> {
        let id = parse_id(&id)?;
        service(ctx).delete_todo(id).await.map_err(resolver_error)?;
        Ok(DeleteResult { success: true })
    }
}

fn service<'a>(ctx: &Context<'a>) -> &'a TodoService {
    ctx.data_unchecked::<TodoService>()
}

fn parse_id(id: &ID) -> Result<TodoId> {
    id.0.parse::<i64>()
        .map(TodoId)
        .map_err(|_| Error::new(format!("invalid todo id: {:?}", id.0)))
}

fn resolver_error(err: TodoError) -> Error {
    match err {
        TodoError::Storage(source) => {
            tracing::error!(error = %source, "storage failure");
            Error::new("internal server error")
        }
        other => Error::new(other.to_string()),
    }
}
