//! Page routing. Most tests render pages that never touch the database; the
//! `#[ignore]`d ones need a `DATABASE_URL` and clean up the rows they list.
mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use time::Duration;
use tower::ServiceExt;

use common::{body_text, database_pool, delete, get, lazy_pool, post_form};
use fyyur::models::artist::{Artist, NewArtist};
use fyyur::models::show::{NewShow, Show};
use fyyur::models::venue::{NewVenue, Venue};
use fyyur::models::DateTimeScalar;
use fyyur::routes::router;
use fyyur::util::current_time;

/// An id no venue or artist will ever be given.
const MISSING_ID: i64 = i64::MAX;

const VALID_VENUE_FORM: &str = "name=Nowhere+Hall&genres=Jazz&address=1+Main+St\
    &city=San+Francisco&state=CA";

#[tokio::test]
async fn home_page_renders() {
    let response = router(lazy_pool()).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("action=\"/venues/search\""));
}

#[tokio::test]
async fn empty_venue_form_renders() {
    let response = router(lazy_pool())
        .oneshot(get("/venues/create"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("List a new venue"));
    assert!(body.contains("<option value=\"Rock n Roll\">"));
}

#[tokio::test]
async fn empty_artist_form_renders() {
    let response = router(lazy_pool())
        .oneshot(get("/artists/create"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("List a new artist"));
}

#[tokio::test]
async fn show_form_is_prefilled_with_a_start_time() {
    let response = router(lazy_pool())
        .oneshot(get("/shows/create"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("name=\"start_time\" value=\"20"));
}

#[tokio::test]
async fn unknown_paths_render_the_not_found_page() {
    let response = router(lazy_pool())
        .oneshot(get("/no/such/page"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404 Not Found"));
}

#[tokio::test]
async fn invalid_venue_is_sent_back_with_its_errors() {
    let response = router(lazy_pool())
        .oneshot(post_form(
            "/venues/create",
            "name=The+Musical+Hop&city=San+Francisco&state=ZZ&phone=12345",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Pick at least one genre"));
    assert!(body.contains("ZZ is not a valid state"));
    assert!(body.contains("Phone must look like 123-456-7890"));
    assert!(body.contains("value=\"The Musical Hop\""));
}

#[tokio::test]
async fn ids_that_are_not_numbers_are_not_found() {
    for uri in ["/venues/abc", "/artists/99999999999999999999", "/venues/1.5/edit"] {
        let response = router(lazy_pool()).oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body_text(response).await.contains("404 Not Found"), "{uri}");
    }
}

#[tokio::test]
async fn deleting_a_non_numeric_id_is_not_found() {
    let response = router(lazy_pool())
        .oneshot(delete("/artists/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreadable_show_is_sent_back_with_its_errors() {
    let response = router(lazy_pool())
        .oneshot(post_form(
            "/shows/create",
            "venue_id=one&artist_id=4&start_time=next+tuesday",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Venue ID must be a whole number"));
    assert!(body.contains("Start time must look like"));
    assert!(body.contains("value=\"next tuesday\""));
}

#[tokio::test]
async fn graphql_playground_is_served() {
    let response = router(lazy_pool()).oneshot(get("/graphql")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("GraphQL Playground"));
}

async fn listed_venue(pool: &PgPool, name: &str) -> i64 {
    let mut tx = pool.begin().await.unwrap();
    let id = Venue::create(
        NewVenue {
            name: name.to_owned(),
            genres: vec!["Jazz".to_owned()],
            address: "1015 Folsom Street".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            ..NewVenue::default()
        },
        &mut tx,
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    id
}

async fn listed_artist(pool: &PgPool, name: &str) -> i64 {
    let mut tx = pool.begin().await.unwrap();
    let id = Artist::create(
        NewArtist {
            name: name.to_owned(),
            genres: vec!["Rock n Roll".to_owned()],
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            ..NewArtist::default()
        },
        &mut tx,
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    id
}

async fn booked_show(pool: &PgPool, venue_id: i64, artist_id: i64) -> i64 {
    let mut tx = pool.begin().await.unwrap();
    let id = Show::create(
        NewShow {
            venue_id,
            artist_id,
            start_time: DateTimeScalar(current_time() + Duration::days(14)),
        },
        &mut tx,
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    id
}

async fn clean_up(pool: &PgPool, venue_ids: &[i64], artist_ids: &[i64]) {
    sqlx::query("DELETE FROM shows WHERE venue_id = ANY($1) OR artist_id = ANY($2)")
        .bind(venue_ids)
        .bind(artist_ids)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM venues WHERE id = ANY($1)")
        .bind(venue_ids)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM artists WHERE id = ANY($1)")
        .bind(artist_ids)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn venue_with_shows_is_kept_by_the_delete_button() {
    let pool = database_pool().await;
    let venue_id = listed_venue(&pool, "Crowded Hall").await;
    let artist_id = listed_artist(&pool, "Crowded Act").await;
    booked_show(&pool, venue_id, artist_id).await;

    let response = router(pool.clone())
        .oneshot(post_form(&format!("/venues/{venue_id}/delete"), ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("alert-danger"));
    assert!(body.contains(&format!(
        "An error occurred. Venue {venue_id} could not be deleted. \
         Venue Crowded Hall still hosts 1 show(s) and cannot be deleted"
    )));
    assert!(Venue::with_id_opt(venue_id, &pool).await.unwrap().is_some());

    clean_up(&pool, &[venue_id], &[artist_id]).await;
}

#[tokio::test]
#[ignore]
async fn show_at_a_missing_venue_names_the_venue() {
    let pool = database_pool().await;
    let artist_id = listed_artist(&pool, "Stranded Act").await;

    let response = router(pool.clone())
        .oneshot(post_form(
            "/shows/create",
            &format!("venue_id={MISSING_ID}&artist_id={artist_id}&start_time=2035-04-01+20:00:00"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(&format!(
        "An error occurred. Show could not be listed. Venue with id {MISSING_ID} not found"
    )));
    let booked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE artist_id = $1")
        .bind(artist_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(booked, 0);

    clean_up(&pool, &[], &[artist_id]).await;
}

#[tokio::test]
#[ignore]
async fn editing_a_missing_venue_is_not_found_whatever_is_posted() {
    let pool = database_pool().await;
    let uri = format!("/venues/{MISSING_ID}/edit");

    for form in [VALID_VENUE_FORM, "name=&state=ZZ"] {
        let response = router(pool.clone())
            .oneshot(post_form(&uri, form))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{form}");
        assert!(body_text(response)
            .await
            .contains(&format!("Venue with id {MISSING_ID} not found")));
    }
}

#[tokio::test]
#[ignore]
async fn invalid_artist_edit_is_sent_back_with_its_errors() {
    let pool = database_pool().await;
    let artist_id = listed_artist(&pool, "Unchanged Act").await;

    let response = router(pool.clone())
        .oneshot(post_form(
            &format!("/artists/{artist_id}/edit"),
            "name=&genres=Jazz&state=CA",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Name is required"));
    assert!(body.contains(&format!("action=\"/artists/{artist_id}/edit\"")));
    let artist = Artist::with_id(artist_id, &pool).await.unwrap();
    assert_eq!(artist.name, "Unchanged Act");

    clean_up(&pool, &[], &[artist_id]).await;
}

#[tokio::test]
#[ignore]
async fn deleting_an_artist_answers_no_content() {
    let pool = database_pool().await;
    let artist_id = listed_artist(&pool, "Departing Act").await;

    let response = router(pool.clone())
        .oneshot(delete(&format!("/artists/{artist_id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(Artist::with_id_opt(artist_id, &pool)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore]
async fn listing_a_venue_lands_on_home_with_a_success_message() {
    let pool = database_pool().await;

    let response = router(pool.clone())
        .oneshot(post_form("/venues/create", VALID_VENUE_FORM))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Venue Nowhere Hall was successfully listed!"));

    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM venues WHERE name = 'Nowhere Hall'")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert!(!ids.is_empty());
    clean_up(&pool, &ids, &[]).await;
}
