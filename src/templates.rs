//! Page templates and the view models they render.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::DirectoryResult;
use crate::models::area::Area;
use crate::models::artist::{Artist, ArtistDetail, NewArtist};
use crate::models::listing::SearchResults;
use crate::models::show::{Booking, Schedule, ShowListing};
use crate::models::venue::{NewVenue, Venue, VenueDetail};
use crate::util::format_start_time;
use crate::validation::{GENRES, STATES};

/// A one-shot status message shown at the top of the next page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub message: String,
    pub is_error: bool,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Render a template into an HTML response with the given status.
pub fn render(status: StatusCode, page: impl Template) -> DirectoryResult<Response> {
    Ok((status, Html(page.render()?)).into_response())
}

pub fn render_ok(page: impl Template) -> DirectoryResult<Response> {
    render(StatusCode::OK, page)
}

/// A show row on a venue or artist page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowRow {
    pub id: i64,
    pub name: String,
    pub image_link: String,
    pub start_time: String,
}

impl ShowRow {
    fn from_booking(booking: &Booking) -> DirectoryResult<Self> {
        Ok(Self {
            id: booking.counterpart_id,
            name: booking.counterpart_name.clone(),
            image_link: booking.counterpart_image_link.clone(),
            start_time: format_start_time(booking.start_time)?,
        })
    }

    fn all(bookings: &[Booking]) -> DirectoryResult<Vec<Self>> {
        bookings.iter().map(Self::from_booking).collect()
    }
}

/// The upcoming and past rows of a detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleRows {
    pub upcoming: Vec<ShowRow>,
    pub past: Vec<ShowRow>,
}

impl ScheduleRows {
    pub fn from_schedule(schedule: &Schedule) -> DirectoryResult<Self> {
        Ok(Self {
            upcoming: ShowRow::all(&schedule.upcoming_shows)?,
            past: ShowRow::all(&schedule.past_shows)?,
        })
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomePage {
    pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "errors/error.html")]
pub struct ErrorPage {
    pub flash: Option<Flash>,
    pub status: u16,
    pub title: &'static str,
    pub message: String,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesPage {
    pub flash: Option<Flash>,
    pub areas: Vec<Area>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsPage {
    pub flash: Option<Flash>,
    pub artists: Vec<Artist>,
}

/// Search results for either venues or artists.
#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchPage {
    pub flash: Option<Flash>,
    /// `venues` or `artists`, used for links and the search form action
    pub kind: &'static str,
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct VenuePage {
    pub flash: Option<Flash>,
    pub venue: Venue,
    pub shows: ScheduleRows,
}

impl VenuePage {
    pub fn new(detail: VenueDetail) -> DirectoryResult<Self> {
        Ok(Self {
            flash: None,
            shows: ScheduleRows::from_schedule(&detail.schedule)?,
            venue: detail.venue,
        })
    }
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ArtistPage {
    pub flash: Option<Flash>,
    pub artist: Artist,
    pub shows: ScheduleRows,
}

impl ArtistPage {
    pub fn new(detail: ArtistDetail) -> DirectoryResult<Self> {
        Ok(Self {
            flash: None,
            shows: ScheduleRows::from_schedule(&detail.schedule)?,
            artist: detail.artist,
        })
    }
}

/// A row on the shows page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowsRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl ShowsRow {
    pub fn from_listing(listing: ShowListing) -> DirectoryResult<Self> {
        Ok(Self {
            start_time: format_start_time(listing.start_time)?,
            venue_id: listing.venue_id,
            venue_name: listing.venue_name,
            artist_id: listing.artist_id,
            artist_name: listing.artist_name,
            artist_image_link: listing.artist_image_link,
        })
    }
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsPage {
    pub flash: Option<Flash>,
    pub shows: Vec<ShowsRow>,
}

/// The venue form, for both listing a new venue and editing an existing one.
#[derive(Template)]
#[template(path = "forms/venue.html")]
pub struct VenueFormPage {
    pub flash: Option<Flash>,
    pub heading: String,
    pub action: String,
    pub form: NewVenue,
    pub errors: Vec<String>,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl VenueFormPage {
    pub fn create(form: NewVenue, errors: Vec<String>) -> Self {
        Self {
            flash: None,
            heading: "List a new venue".to_owned(),
            action: "/venues/create".to_owned(),
            form,
            errors,
            genres: GENRES,
            states: STATES,
        }
    }

    pub fn edit(id: i64, form: NewVenue, errors: Vec<String>) -> Self {
        Self {
            flash: None,
            heading: format!("Edit venue {}", form.name),
            action: format!("/venues/{}/edit", id),
            form,
            errors,
            genres: GENRES,
            states: STATES,
        }
    }

    fn genre_selected(&self, genre: &str) -> bool {
        self.form.has_genre(genre)
    }

    fn state_selected(&self, state: &str) -> bool {
        self.form.state == state
    }
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
pub struct ArtistFormPage {
    pub flash: Option<Flash>,
    pub heading: String,
    pub action: String,
    pub form: NewArtist,
    pub errors: Vec<String>,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl ArtistFormPage {
    pub fn create(form: NewArtist, errors: Vec<String>) -> Self {
        Self {
            flash: None,
            heading: "List a new artist".to_owned(),
            action: "/artists/create".to_owned(),
            form,
            errors,
            genres: GENRES,
            states: STATES,
        }
    }

    pub fn edit(id: i64, form: NewArtist, errors: Vec<String>) -> Self {
        Self {
            flash: None,
            heading: format!("Edit artist {}", form.name),
            action: format!("/artists/{}/edit", id),
            form,
            errors,
            genres: GENRES,
            states: STATES,
        }
    }

    fn genre_selected(&self, genre: &str) -> bool {
        self.form.has_genre(genre)
    }

    fn state_selected(&self, state: &str) -> bool {
        self.form.state == state
    }
}

/// The raw show form fields, kept as typed so a rejected form can be redisplayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShowFields {
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: String,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormPage {
    pub flash: Option<Flash>,
    pub form: ShowFields,
    pub errors: Vec<String>,
}
