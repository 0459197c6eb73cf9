//! The HTML pages of the directory, plus the GraphQL endpoint.
//!
//! | Path                   | Methods              |
//! |------------------------|----------------------|
//! | `/`                    | GET                  |
//! | `/venues`              | GET                  |
//! | `/venues/search`       | POST                 |
//! | `/venues/create`       | GET, POST            |
//! | `/venues/:id`          | GET, DELETE          |
//! | `/venues/:id/edit`     | GET, POST            |
//! | `/venues/:id/delete`   | POST                 |
//! | `/artists...`          | same as `/venues...` |
//! | `/shows`               | GET                  |
//! | `/shows/create`        | GET, POST            |
//! | `/graphql`             | GET, POST            |

use axum::handler::Handler;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Router};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::DirectoryResult;
use crate::graphql::{self, build_schema};
use crate::models::artist::Artist;
use crate::models::venue::Venue;
use crate::templates::{render_ok, ErrorPage, Flash, HomePage};

pub mod artists;
pub mod records;
pub mod shows;
pub mod venues;

pub fn router(pool: PgPool) -> Router {
    let schema = build_schema(pool.clone());

    Router::new()
        .route("/", get(home))
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", get(venues::create_form).post(venues::create))
        .route("/venues/:id", get(venues::detail).delete(records::delete::<Venue>))
        .route("/venues/:id/edit", get(venues::edit_form).post(venues::edit))
        .route("/venues/:id/delete", post(records::delete_from_form::<Venue>))
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", get(artists::create_form).post(artists::create))
        .route("/artists/:id", get(artists::detail).delete(records::delete::<Artist>))
        .route("/artists/:id/edit", get(artists::edit_form).post(artists::edit))
        .route("/artists/:id/delete", post(records::delete_from_form::<Artist>))
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create))
        .route(
            "/graphql",
            get(graphql::playground)
                .post(graphql::execute)
                .layer(CorsLayer::permissive()),
        )
        .fallback(not_found.into_service())
        .layer(Extension(schema))
        .layer(Extension(pool))
        .layer(TraceLayer::new_for_http())
}

pub async fn home() -> DirectoryResult<Response> {
    render_ok(HomePage { flash: None })
}

/// The landing page, showing the outcome of a form submission.
pub fn home_with(flash: Flash) -> DirectoryResult<Response> {
    render_ok(HomePage { flash: Some(flash) })
}

pub async fn not_found() -> Response {
    let page = ErrorPage {
        flash: None,
        status: StatusCode::NOT_FOUND.as_u16(),
        title: "Not Found",
        message: "There is nothing at this address.".to_owned(),
    };

    match crate::templates::render(StatusCode::NOT_FOUND, page) {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}
