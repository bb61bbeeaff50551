mod schema;

pub use schema::{build_schema, DeleteResult, MutationRoot, QueryRoot, TodoObject, TodoSchema};
