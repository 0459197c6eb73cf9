use axum::body::Bytes;
use axum::extract::Form;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use sqlx::PgPool;

use crate::error::{DirectoryError, DirectoryResult};
use crate::extract::RecordId;
use crate::forms::{FormData, SearchForm};
use crate::models::area::Area;
use crate::models::venue::{NewVenue, Venue};
use crate::routes::records;
use crate::templates::{
    render, render_ok, Flash, SearchPage, VenueFormPage, VenuePage, VenuesPage,
};
use crate::util::current_time;

pub async fn list(Extension(pool): Extension<PgPool>) -> DirectoryResult<Response> {
    let areas = Area::all(current_time(), &pool).await?;

    render_ok(VenuesPage { flash: None, areas })
}

pub async fn search(
    Extension(pool): Extension<PgPool>,
    Form(form): Form<SearchForm>,
) -> DirectoryResult<Response> {
    let results = Venue::search(&form.search_term, current_time(), &pool).await?;

    render_ok(SearchPage {
        flash: None,
        kind: "venues",
        search_term: form.search_term,
        results,
    })
}

pub async fn detail(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
) -> DirectoryResult<Response> {
    let mut conn = pool.acquire().await?;
    let detail = Venue::detail(id, current_time(), &mut conn).await?;

    render_ok(VenuePage::new(detail)?)
}

pub async fn create_form() -> DirectoryResult<Response> {
    render_ok(VenueFormPage::create(NewVenue::default(), vec![]))
}

pub async fn create(Extension(pool): Extension<PgPool>, body: Bytes) -> DirectoryResult<Response> {
    let new_venue = NewVenue::from(&FormData::parse(&body)).normalized();
    if let Err(DirectoryError::Invalid(errors)) = new_venue.validate() {
        return render(
            StatusCode::BAD_REQUEST,
            VenueFormPage::create(new_venue, errors),
        );
    }

    records::list_new::<Venue>(new_venue.name.clone(), new_venue, &pool).await
}

pub async fn edit_form(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
) -> DirectoryResult<Response> {
    let venue = Venue::with_id(id, &pool).await?;

    render_ok(VenueFormPage::edit(id, NewVenue::from(venue), vec![]))
}

pub async fn edit(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
    body: Bytes,
) -> DirectoryResult<Response> {
    Venue::with_id(id, &pool).await?;

    let update = NewVenue::from(&FormData::parse(&body)).normalized();
    if let Err(DirectoryError::Invalid(errors)) = update.validate() {
        return render(
            StatusCode::BAD_REQUEST,
            VenueFormPage::edit(id, update, errors),
        );
    }

    match records::replace::<Venue>(id, update.clone(), &pool).await {
        Ok(()) => Ok(Redirect::to(&format!("/venues/{}", id)).into_response()),
        Err(error @ DirectoryError::NotFound(_)) => Err(error),
        Err(error) => {
            tracing::warn!(%error, venue_id = id, "failed to edit venue");
            let status = error.status();
            let mut page = VenueFormPage::edit(id, update, vec![]);
            page.flash = Some(Flash::error(format!(
                "An error occurred. Venue {} could not be edited.",
                page.form.name
            )));

            render(status, page)
        }
    }
}
