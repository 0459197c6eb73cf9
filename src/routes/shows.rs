use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Extension;
use sqlx::PgPool;

use crate::error::{DirectoryError, DirectoryResult};
use crate::forms::FormData;
use crate::models::show::{NewShow, Show, ShowListing};
use crate::routes::home_with;
use crate::templates::{render, render_ok, Flash, ShowFields, ShowFormPage, ShowsPage, ShowsRow};
use crate::util::{current_time, START_TIME_INPUT_FORMAT};

pub async fn list(Extension(pool): Extension<PgPool>) -> DirectoryResult<Response> {
    let shows = ShowListing::all(&pool)
        .await?
        .into_iter()
        .map(ShowsRow::from_listing)
        .collect::<DirectoryResult<_>>()?;

    render_ok(ShowsPage { flash: None, shows })
}

/// The show form, with the start time pre-filled to now.
pub async fn create_form() -> DirectoryResult<Response> {
    let form = ShowFields {
        start_time: current_time().format(START_TIME_INPUT_FORMAT)?,
        ..ShowFields::default()
    };

    render_ok(ShowFormPage {
        flash: None,
        form,
        errors: vec![],
    })
}

pub async fn create(Extension(pool): Extension<PgPool>, body: Bytes) -> DirectoryResult<Response> {
    let fields = ShowFields::from(&FormData::parse(&body));
    let new_show = match fields.to_new_show() {
        Ok(new_show) => new_show,
        Err(DirectoryError::Invalid(errors)) => {
            return render(
                StatusCode::BAD_REQUEST,
                ShowFormPage {
                    flash: None,
                    form: fields,
                    errors,
                },
            );
        }
        Err(error) => return Err(error),
    };

    let flash = match insert(new_show, &pool).await {
        Ok(id) => {
            tracing::info!(show_id = id, "show listed");
            Flash::success("Show was successfully listed!")
        }
        Err(error) => {
            tracing::warn!(%error, "failed to list show");
            Flash::error(format!(
                "An error occurred. Show could not be listed. {}",
                error.public_message()
            ))
        }
    };

    home_with(flash)
}

async fn insert(new_show: NewShow, pool: &PgPool) -> DirectoryResult<i64> {
    let mut tx = pool.begin().await?;
    let id = Show::create(new_show, &mut tx).await?;
    tx.commit().await?;

    Ok(id)
}
