use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject};
use sqlx::postgres::PgExecutor;
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::aggregate::GroupBy;
use crate::models::listing::{self, SearchResults};
use crate::models::record::Record;
use crate::models::show::{Booking, Schedule};
use crate::util::current_time;
use crate::validation::{normalize_genres, Validator};

#[derive(SimpleObject, FromRow, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Venue {
    /// The ID of the venue
    pub id: i64,
    /// The name of the venue
    pub name: String,
    /// The genres of music the venue books, in the order they were entered
    pub genres: Vec<String>,
    /// The street address
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    /// Whether the venue is looking for artists to book
    pub seeking_talent: bool,
    /// What kind of talent the venue is looking for
    pub seeking_description: String,
    pub image_link: String,
}

#[ComplexObject]
impl Venue {
    /// Shows starting after now, soonest first
    pub async fn upcoming_shows(&self, ctx: &Context<'_>) -> Result<Vec<Booking>> {
        Ok(self.schedule(ctx).await?.upcoming_shows)
    }

    /// Shows that have already started, earliest first
    pub async fn past_shows(&self, ctx: &Context<'_>) -> Result<Vec<Booking>> {
        Ok(self.schedule(ctx).await?.past_shows)
    }

    pub async fn upcoming_shows_count(&self, ctx: &Context<'_>) -> Result<usize> {
        Ok(self.schedule(ctx).await?.upcoming_shows_count())
    }

    pub async fn past_shows_count(&self, ctx: &Context<'_>) -> Result<usize> {
        Ok(self.schedule(ctx).await?.past_shows_count())
    }
}

/// A venue together with its bookings, as shown on the venue page.
#[derive(Clone, Debug)]
pub struct VenueDetail {
    pub venue: Venue,
    pub schedule: Schedule,
}

impl Venue {
    async fn schedule(&self, ctx: &Context<'_>) -> DirectoryResult<Schedule> {
        let pool: &PgPool = ctx.data_unchecked();
        let bookings = Booking::at_venue(self.id, pool).await?;

        Ok(Schedule::split(bookings, current_time()))
    }

    pub async fn with_id<'e>(id: i64, executor: impl PgExecutor<'e>) -> DirectoryResult<Self> {
        Self::with_id_opt(id, executor)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Venue", id))
    }

    pub async fn with_id_opt<'e>(
        id: i64,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<Option<Self>> {
        sqlx::query_as(
            "SELECT id, name, genres, address, city, state, phone, website, facebook_link,
                 seeking_talent, seeking_description, image_link
             FROM venues WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn all<'e>(executor: impl PgExecutor<'e>) -> DirectoryResult<Vec<Self>> {
        sqlx::query_as(
            "SELECT id, name, genres, address, city, state, phone, website, facebook_link,
                 seeking_talent, seeking_description, image_link
             FROM venues ORDER BY name, id",
        )
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn detail(
        id: i64,
        now: OffsetDateTime,
        conn: &mut PgConnection,
    ) -> DirectoryResult<VenueDetail> {
        let venue = Self::with_id(id, &mut *conn).await?;
        let bookings = Booking::at_venue(id, &mut *conn).await?;

        Ok(VenueDetail {
            venue,
            schedule: Schedule::split(bookings, now),
        })
    }

    pub async fn search<'e>(
        term: &str,
        now: OffsetDateTime,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<SearchResults> {
        listing::search(GroupBy::Venue, term, now, executor).await
    }

    pub async fn create(new_venue: NewVenue, conn: &mut PgConnection) -> DirectoryResult<i64> {
        let new_venue = new_venue.normalized();
        new_venue.validate()?;

        let id = sqlx::query_scalar(
            "INSERT INTO venues
                 (name, genres, address, city, state, phone, website, facebook_link,
                  seeking_talent, seeking_description, image_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING id",
        )
        .bind(&new_venue.name)
        .bind(&new_venue.genres)
        .bind(&new_venue.address)
        .bind(&new_venue.city)
        .bind(&new_venue.state)
        .bind(&new_venue.phone)
        .bind(&new_venue.website)
        .bind(&new_venue.facebook_link)
        .bind(new_venue.seeking_talent)
        .bind(&new_venue.seeking_description)
        .bind(&new_venue.image_link)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Replace every field of the venue.
    pub async fn update(id: i64, update: NewVenue, conn: &mut PgConnection) -> DirectoryResult<()> {
        let update = update.normalized();
        update.validate()?;

        let result = sqlx::query(
            "UPDATE venues SET
                 name = $1, genres = $2, address = $3, city = $4, state = $5, phone = $6,
                 website = $7, facebook_link = $8, seeking_talent = $9,
                 seeking_description = $10, image_link = $11
             WHERE id = $12",
        )
        .bind(&update.name)
        .bind(&update.genres)
        .bind(&update.address)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.phone)
        .bind(&update.website)
        .bind(&update.facebook_link)
        .bind(update.seeking_talent)
        .bind(&update.seeking_description)
        .bind(&update.image_link)
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::not_found("Venue", id));
        }

        Ok(())
    }

    /// Delete a venue that hosts no shows, returning its name.
    pub async fn delete(id: i64, conn: &mut PgConnection) -> DirectoryResult<String> {
        let venue = Self::with_id(id, &mut *conn).await?;

        let show_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE venue_id = $1")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        if show_count > 0 {
            return Err(DirectoryError::Conflict(format!(
                "Venue {} still hosts {} show(s) and cannot be deleted",
                venue.name, show_count
            )));
        }

        sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(venue.name)
    }
}

#[async_trait::async_trait]
impl Record for Venue {
    const KIND: &'static str = "Venue";
    type Fields = NewVenue;

    async fn insert(fields: NewVenue, conn: &mut PgConnection) -> DirectoryResult<i64> {
        Venue::create(fields, conn).await
    }

    async fn replace(id: i64, fields: NewVenue, conn: &mut PgConnection) -> DirectoryResult<()> {
        Venue::update(id, fields, conn).await
    }

    async fn remove(id: i64, conn: &mut PgConnection) -> DirectoryResult<String> {
        Venue::delete(id, conn).await
    }
}

/// Every editable field of a venue, used both to create and to replace one.
#[derive(InputObject, Clone, Debug, Default, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    #[graphql(default)]
    pub phone: String,
    #[graphql(default)]
    pub website: String,
    #[graphql(default)]
    pub facebook_link: String,
    #[graphql(default)]
    pub seeking_talent: bool,
    #[graphql(default)]
    pub seeking_description: String,
    #[graphql(default)]
    pub image_link: String,
}

impl NewVenue {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            genres: normalize_genres(&self.genres),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            website: self.website.trim().to_owned(),
            facebook_link: self.facebook_link.trim().to_owned(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.trim().to_owned(),
            image_link: self.image_link.trim().to_owned(),
        }
    }

    pub fn validate(&self) -> DirectoryResult<()> {
        Validator::new()
            .required("Name", &self.name)
            .genres(&self.genres)
            .required("Address", &self.address)
            .required("City", &self.city)
            .state(&self.state)
            .phone(&self.phone)
            .link("Website", &self.website)
            .link("Facebook link", &self.facebook_link)
            .link("Image link", &self.image_link)
            .finish()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

impl From<Venue> for NewVenue {
    fn from(venue: Venue) -> Self {
        Self {
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mock::mock_venue;

    #[test]
    fn existing_venue_is_a_valid_submission() {
        let new_venue = NewVenue::from(mock_venue());
        assert!(new_venue.validate().is_ok());
    }

    #[test]
    fn normalizing_trims_fields_and_keeps_genre_order() {
        let new_venue = NewVenue {
            name: "  The Musical Hop ".to_owned(),
            genres: vec![" Swing".to_owned(), "".to_owned(), "Jazz ".to_owned()],
            city: " San Francisco".to_owned(),
            ..NewVenue::default()
        }
        .normalized();

        assert_eq!(new_venue.name, "The Musical Hop");
        assert_eq!(new_venue.genres, vec!["Swing", "Jazz"]);
        assert_eq!(new_venue.city, "San Francisco");
    }

    #[test]
    fn blank_venue_lists_every_missing_field() {
        match NewVenue::default().validate() {
            Err(DirectoryError::Invalid(errors)) => assert_eq!(
                errors,
                vec![
                    "Name is required",
                    "Pick at least one genre",
                    "Address is required",
                    "City is required",
                    "State is required",
                ]
            ),
            other => panic!("expected invalid venue, got {other:?}"),
        }
    }

    #[test]
    fn genre_membership_is_exact() {
        let new_venue = NewVenue::from(mock_venue());
        assert!(new_venue.has_genre("Jazz"));
        assert!(!new_venue.has_genre("jazz"));
    }
}
