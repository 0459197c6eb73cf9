//! The GraphQL API over the directory, served at `/graphql`.

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{EmptySubscription, Request, Response, Schema};
use axum::response::Html;
use axum::{Extension, Json};
use sqlx::PgPool;

use crate::graphql::mutation::MutationRoot;
use crate::graphql::query::QueryRoot;

pub mod mutation;
pub mod query;

pub const SUCCESS_MESSAGE: &str = "success";

pub type DirectorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(pool: PgPool) -> DirectorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .finish()
}

pub async fn execute(
    Extension(schema): Extension<DirectorySchema>,
    Json(request): Json<Request>,
) -> Json<Response> {
    Json(schema.execute(request).await)
}

pub async fn playground() -> Html<String> {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
