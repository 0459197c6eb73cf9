//! Handlers and write helpers shared by the venue and artist pages.

use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use sqlx::PgPool;

use crate::error::DirectoryResult;
use crate::extract::RecordId;
use crate::models::record::Record;
use crate::routes::home_with;
use crate::templates::Flash;

/// Save a validated submission and land on the home page with the outcome.
pub async fn list_new<R: Record>(
    name: String,
    fields: R::Fields,
    pool: &PgPool,
) -> DirectoryResult<Response> {
    let flash = match insert::<R>(fields, pool).await {
        Ok(id) => {
            tracing::info!(kind = R::KIND, id, %name, "record listed");
            Flash::success(format!("{} {} was successfully listed!", R::KIND, name))
        }
        Err(error) => {
            tracing::warn!(%error, kind = R::KIND, %name, "failed to list record");
            Flash::error(format!(
                "An error occurred. {} {} could not be listed.",
                R::KIND,
                name
            ))
        }
    };

    home_with(flash)
}

async fn insert<R: Record>(fields: R::Fields, pool: &PgPool) -> DirectoryResult<i64> {
    let mut tx = pool.begin().await?;
    let id = R::insert(fields, &mut *tx).await?;
    tx.commit().await?;

    Ok(id)
}

pub async fn replace<R: Record>(
    id: i64,
    fields: R::Fields,
    pool: &PgPool,
) -> DirectoryResult<()> {
    let mut tx = pool.begin().await?;
    R::replace(id, fields, &mut *tx).await?;
    tx.commit().await?;

    tracing::info!(kind = R::KIND, id, "record edited");
    Ok(())
}

/// `DELETE /venues/:id` and `DELETE /artists/:id`, answering 204 once the
/// record is gone.
pub async fn delete<R: Record>(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
) -> DirectoryResult<StatusCode> {
    let name = remove::<R>(id, &pool).await?;
    tracing::info!(kind = R::KIND, id, %name, "record deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// The delete button on a detail page.
pub async fn delete_from_form<R: Record>(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
) -> DirectoryResult<Response> {
    let flash = match remove::<R>(id, &pool).await {
        Ok(name) => {
            tracing::info!(kind = R::KIND, id, %name, "record deleted");
            Flash::success(format!("{} {} was successfully deleted.", R::KIND, name))
        }
        Err(error) => {
            tracing::warn!(%error, kind = R::KIND, id, "failed to delete record");
            Flash::error(format!(
                "An error occurred. {} {} could not be deleted. {}",
                R::KIND,
                id,
                error.public_message()
            ))
        }
    };

    home_with(flash)
}

async fn remove<R: Record>(id: i64, pool: &PgPool) -> DirectoryResult<String> {
    let mut tx = pool.begin().await?;
    let name = R::remove(id, &mut *tx).await?;
    tx.commit().await?;

    Ok(name)
}
