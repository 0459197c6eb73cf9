//! Error handling for the directory.
//!
//! Every model method and request handler returns a [`DirectoryResult`].
//! When a variant needs to be told apart from the others by a caller, add a
//! new variant instead of forcing it into [`DirectoryError::Database`].

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::templates::ErrorPage;

/// Postgres SQLSTATE for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// The error enum for all error handling across the directory.
///
/// See each variant for its corresponding status code.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// \[404\] The referenced venue, artist or show does not exist.
    #[error("{0}")]
    NotFound(String),
    /// \[400\] A submitted form or mutation input failed validation.
    ///
    /// Holds one message per failed check, in field order.
    #[error("invalid submission: {}", .0.join("; "))]
    Invalid(Vec<String>),
    /// \[409\] The write would break a relationship between records,
    /// e.g. deleting a venue that still hosts shows, or double-booking
    /// an artist at the same venue and time.
    #[error("{0}")]
    Conflict(String),
    /// \[500\] An error occured while interacting with the database.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
    /// \[500\] A page template failed to render.
    #[error("failed to render page: {0}")]
    Template(#[from] askama::Error),
    /// \[500\] A timestamp could not be formatted for display.
    #[error("failed to format time: {0}")]
    Format(#[from] time::error::Format),
}

/// The return type for all model methods and endpoints.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    pub fn not_found(kind: &str, id: i64) -> Self {
        DirectoryError::NotFound(format!("{} with id {} not found", kind, id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
            DirectoryError::Invalid(_) => StatusCode::BAD_REQUEST,
            DirectoryError::Conflict(_) => StatusCode::CONFLICT,
            DirectoryError::Database(_)
            | DirectoryError::Template(_)
            | DirectoryError::Format(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The headline shown on the error page.
    pub fn title(&self) -> &'static str {
        match self {
            DirectoryError::NotFound(_) => "Not Found",
            DirectoryError::Invalid(_) => "Bad Request",
            DirectoryError::Conflict(_) => "Conflict",
            DirectoryError::Database(_)
            | DirectoryError::Template(_)
            | DirectoryError::Format(_) => "Server Error",
        }
    }

    /// The message shown to the visitor. Internal failures are not echoed back.
    pub fn public_message(&self) -> String {
        match self {
            DirectoryError::NotFound(_)
            | DirectoryError::Invalid(_)
            | DirectoryError::Conflict(_) => self.to_string(),
            _ => "Something went wrong on our end. Please try again later.".to_owned(),
        }
    }
}

impl From<sqlx::Error> for DirectoryError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            match db_error.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return DirectoryError::Conflict(
                        "That artist is already booked at that venue at that time".to_owned(),
                    );
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return DirectoryError::Conflict(
                        "The record is still referenced by existing shows".to_owned(),
                    );
                }
                _ => {}
            }
        }

        DirectoryError::Database(error)
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let page = ErrorPage {
            flash: None,
            status: status.as_u16(),
            title: self.title(),
            message: self.public_message(),
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(error) => {
                tracing::error!(%error, "failed to render error page");
                (status, self.title()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_variants() {
        assert_eq!(
            DirectoryError::not_found("Venue", 3).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DirectoryError::Invalid(vec!["Name is required".to_owned()]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DirectoryError::Conflict("busy".to_owned()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            DirectoryError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_names_the_record() {
        let error = DirectoryError::not_found("Artist", 42);
        assert_eq!(error.to_string(), "Artist with id 42 not found");
        assert_eq!(error.public_message(), "Artist with id 42 not found");
    }

    #[test]
    fn server_errors_hide_details() {
        let error = DirectoryError::Database(sqlx::Error::PoolTimedOut);
        assert!(!error.public_message().contains("pool"));
    }

    #[test]
    fn invalid_joins_messages() {
        let error = DirectoryError::Invalid(vec![
            "Name is required".to_owned(),
            "Pick at least one genre".to_owned(),
        ]);
        assert_eq!(
            error.to_string(),
            "invalid submission: Name is required; Pick at least one genre"
        );
    }

    #[test]
    fn non_database_sqlx_errors_stay_database_errors() {
        let error = DirectoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, DirectoryError::Database(_)));
    }
}
