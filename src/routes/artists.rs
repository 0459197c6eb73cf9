use axum::body::Bytes;
use axum::extract::Form;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use sqlx::PgPool;

use crate::error::{DirectoryError, DirectoryResult};
use crate::extract::RecordId;
use crate::forms::{FormData, SearchForm};
use crate::models::artist::{Artist, NewArtist};
use crate::routes::records;
use crate::templates::{
    render, render_ok, ArtistFormPage, ArtistPage, ArtistsPage, Flash, SearchPage,
};
use crate::util::current_time;

pub async fn list(Extension(pool): Extension<PgPool>) -> DirectoryResult<Response> {
    let artists = Artist::all(&pool).await?;

    render_ok(ArtistsPage {
        flash: None,
        artists,
    })
}

pub async fn search(
    Extension(pool): Extension<PgPool>,
    Form(form): Form<SearchForm>,
) -> DirectoryResult<Response> {
    let results = Artist::search(&form.search_term, current_time(), &pool).await?;

    render_ok(SearchPage {
        flash: None,
        kind: "artists",
        search_term: form.search_term,
        results,
    })
}

pub async fn detail(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
) -> DirectoryResult<Response> {
    let mut conn = pool.acquire().await?;
    let detail = Artist::detail(id, current_time(), &mut conn).await?;

    render_ok(ArtistPage::new(detail)?)
}

pub async fn create_form() -> DirectoryResult<Response> {
    render_ok(ArtistFormPage::create(NewArtist::default(), vec![]))
}

pub async fn create(Extension(pool): Extension<PgPool>, body: Bytes) -> DirectoryResult<Response> {
    let new_artist = NewArtist::from(&FormData::parse(&body)).normalized();
    if let Err(DirectoryError::Invalid(errors)) = new_artist.validate() {
        return render(
            StatusCode::BAD_REQUEST,
            ArtistFormPage::create(new_artist, errors),
        );
    }

    records::list_new::<Artist>(new_artist.name.clone(), new_artist, &pool).await
}

pub async fn edit_form(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
) -> DirectoryResult<Response> {
    let artist = Artist::with_id(id, &pool).await?;

    render_ok(ArtistFormPage::edit(id, NewArtist::from(artist), vec![]))
}

pub async fn edit(
    RecordId(id): RecordId,
    Extension(pool): Extension<PgPool>,
    body: Bytes,
) -> DirectoryResult<Response> {
    Artist::with_id(id, &pool).await?;

    let update = NewArtist::from(&FormData::parse(&body)).normalized();
    if let Err(DirectoryError::Invalid(errors)) = update.validate() {
        return render(
            StatusCode::BAD_REQUEST,
            ArtistFormPage::edit(id, update, errors),
        );
    }

    match records::replace::<Artist>(id, update.clone(), &pool).await {
        Ok(()) => Ok(Redirect::to(&format!("/artists/{}", id)).into_response()),
        Err(error @ DirectoryError::NotFound(_)) => Err(error),
        Err(error) => {
            tracing::warn!(%error, artist_id = id, "failed to edit artist");
            let status = error.status();
            let mut page = ArtistFormPage::edit(id, update, vec![]);
            page.flash = Some(Flash::error(format!(
                "An error occurred. Artist {} could not be edited.",
                page.form.name
            )));

            render(status, page)
        }
    }
}
