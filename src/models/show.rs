use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject};
use sqlx::postgres::PgExecutor;
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::aggregate::Partition;
use crate::models::artist::Artist;
use crate::models::venue::Venue;
use crate::models::DateTimeScalar;
use crate::validation::Validator;

#[derive(SimpleObject, FromRow, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Show {
    /// The ID of the show
    pub id: i64,
    /// The venue hosting the show
    pub venue_id: Option<i64>,
    /// The artist performing
    pub artist_id: Option<i64>,

    /// When the show starts
    #[graphql(skip)]
    pub start_time: OffsetDateTime,
}

#[ComplexObject]
impl Show {
    /// When the show starts
    pub async fn start_time(&self) -> DateTimeScalar {
        DateTimeScalar(self.start_time)
    }

    pub async fn venue(&self, ctx: &Context<'_>) -> Result<Option<Venue>> {
        let pool: &PgPool = ctx.data_unchecked();
        match self.venue_id {
            Some(id) => Ok(Venue::with_id_opt(id, pool).await?),
            None => Ok(None),
        }
    }

    pub async fn artist(&self, ctx: &Context<'_>) -> Result<Option<Artist>> {
        let pool: &PgPool = ctx.data_unchecked();
        match self.artist_id {
            Some(id) => Ok(Artist::with_id_opt(id, pool).await?),
            None => Ok(None),
        }
    }
}

impl Show {
    pub async fn with_id<'e>(id: i64, executor: impl PgExecutor<'e>) -> DirectoryResult<Self> {
        Self::with_id_opt(id, executor)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Show", id))
    }

    pub async fn with_id_opt<'e>(
        id: i64,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<Option<Self>> {
        sqlx::query_as("SELECT id, venue_id, artist_id, start_time FROM shows WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Book an artist at a venue. Both must exist; the same booking twice is a conflict.
    pub async fn create(new_show: NewShow, conn: &mut PgConnection) -> DirectoryResult<i64> {
        Venue::with_id(new_show.venue_id, &mut *conn).await?;
        Artist::with_id(new_show.artist_id, &mut *conn).await?;

        let id = sqlx::query_scalar(
            "INSERT INTO shows (venue_id, artist_id, start_time)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(new_show.venue_id)
        .bind(new_show.artist_id)
        .bind(new_show.start_time.0)
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }
}

/// A show as listed on the shows page, with both sides of the booking.
#[derive(SimpleObject, FromRow, Clone, Debug)]
#[graphql(complex)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,

    #[graphql(skip)]
    pub start_time: OffsetDateTime,
}

#[ComplexObject]
impl ShowListing {
    pub async fn start_time(&self) -> DateTimeScalar {
        DateTimeScalar(self.start_time)
    }
}

impl ShowListing {
    /// Every show whose venue and artist both still exist, soonest first.
    pub async fn all<'e>(executor: impl PgExecutor<'e>) -> DirectoryResult<Vec<Self>> {
        sqlx::query_as(
            "SELECT s.id AS show_id, v.id AS venue_id, v.name AS venue_name,
                 a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                 s.start_time
             FROM shows s
             INNER JOIN venues v ON v.id = s.venue_id
             INNER JOIN artists a ON a.id = s.artist_id
             ORDER BY s.start_time, s.id",
        )
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }
}

/// One show seen from a venue or an artist: the other side of the booking
/// and when it starts.
#[derive(SimpleObject, FromRow, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Booking {
    /// The ID of the show
    pub show_id: i64,
    /// The ID of the artist (for a venue) or venue (for an artist)
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: String,

    #[graphql(skip)]
    pub start_time: OffsetDateTime,
}

#[ComplexObject]
impl Booking {
    pub async fn start_time(&self) -> DateTimeScalar {
        DateTimeScalar(self.start_time)
    }
}

impl Booking {
    pub async fn at_venue<'e>(
        venue_id: i64,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<Vec<Self>> {
        sqlx::query_as(
            "SELECT s.id AS show_id, a.id AS counterpart_id, a.name AS counterpart_name,
                 a.image_link AS counterpart_image_link, s.start_time
             FROM shows s INNER JOIN artists a ON a.id = s.artist_id
             WHERE s.venue_id = $1
             ORDER BY s.start_time, s.id",
        )
        .bind(venue_id)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn for_artist<'e>(
        artist_id: i64,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<Vec<Self>> {
        sqlx::query_as(
            "SELECT s.id AS show_id, v.id AS counterpart_id, v.name AS counterpart_name,
                 v.image_link AS counterpart_image_link, s.start_time
             FROM shows s INNER JOIN venues v ON v.id = s.venue_id
             WHERE s.artist_id = $1
             ORDER BY s.start_time, s.id",
        )
        .bind(artist_id)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }
}

/// A venue's or artist's bookings split around `now`, each side soonest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub upcoming_shows: Vec<Booking>,
    pub past_shows: Vec<Booking>,
}

impl Schedule {
    pub fn split(mut bookings: Vec<Booking>, now: OffsetDateTime) -> Self {
        bookings.sort_by_key(|booking| (booking.start_time, booking.show_id));

        let (upcoming_shows, past_shows) = bookings
            .into_iter()
            .partition(|booking| Partition::Upcoming.contains(booking.start_time, now));

        Self {
            upcoming_shows,
            past_shows,
        }
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }

    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTimeScalar,
}

impl NewShow {
    /// Build a show from the raw form fields, reporting every unusable field.
    pub fn from_form(venue_id: &str, artist_id: &str, start_time: &str) -> DirectoryResult<Self> {
        let mut validator = Validator::new();

        let venue_id = venue_id.trim().parse::<i64>().ok();
        if venue_id.is_none() {
            validator.error("Venue ID must be a whole number");
        }
        let artist_id = artist_id.trim().parse::<i64>().ok();
        if artist_id.is_none() {
            validator.error("Artist ID must be a whole number");
        }
        let parsed_start_time = crate::util::parse_start_time(start_time);
        if parsed_start_time.is_none() {
            validator.error("Start time must look like 2035-04-01 20:00:00");
        }
        validator.finish()?;

        match (venue_id, artist_id, parsed_start_time) {
            (Some(venue_id), Some(artist_id), Some(start_time)) => Ok(Self {
                venue_id,
                artist_id,
                start_time: DateTimeScalar(start_time),
            }),
            _ => Err(DirectoryError::Invalid(vec![
                "The show could not be read".to_owned(),
            ])),
        }
    }
}
