//! Shared helpers for the integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// A pool that never connects until a query runs, for routes that
/// don't touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://fyyur@localhost/fyyur_test")
        .expect("valid connection string")
}

/// A migrated pool against `DATABASE_URL`, for the `#[ignore]`d store tests.
pub async fn database_pool() -> PgPool {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for store tests");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");
    fyyur::db::migrate(&pool)
        .await
        .expect("failed to migrate the test database");

    pool
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("valid request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
