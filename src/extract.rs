//! Request extractors shared by the page handlers.

use axum::extract::{FromRequest, Path, RequestParts};

use crate::error::DirectoryError;

/// The numeric id in a `/venues/:id` or `/artists/:id` path.
///
/// A segment that isn't an id can't name a record, so it is rejected as
/// [`DirectoryError::NotFound`] and renders the usual 404 page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait::async_trait]
impl<B: Send> FromRequest<B> for RecordId {
    type Rejection = DirectoryError;

    async fn from_request(request: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request(request).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => {
                tracing::debug!(%rejection, "unreadable record id");
                Err(DirectoryError::NotFound(
                    "There is nothing at this address.".to_owned(),
                ))
            }
        }
    }
}
