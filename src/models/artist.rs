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
pub struct Artist {
    /// The ID of the artist
    pub id: i64,
    /// The name the artist performs under
    pub name: String,
    /// The genres the artist plays, in the order they were entered
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    /// Whether the artist is looking for venues to play
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
}

#[ComplexObject]
impl Artist {
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

#[derive(Clone, Debug)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub schedule: Schedule,
}

impl Artist {
    async fn schedule(&self, ctx: &Context<'_>) -> DirectoryResult<Schedule> {
        let pool: &PgPool = ctx.data_unchecked();
        let bookings = Booking::for_artist(self.id, pool).await?;

        Ok(Schedule::split(bookings, current_time()))
    }

    pub async fn with_id<'e>(id: i64, executor: impl PgExecutor<'e>) -> DirectoryResult<Self> {
        Self::with_id_opt(id, executor)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Artist", id))
    }

    pub async fn with_id_opt<'e>(
        id: i64,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<Option<Self>> {
        sqlx::query_as(
            "SELECT id, name, genres, city, state, phone, website, facebook_link,
                 seeking_venue, seeking_description, image_link
             FROM artists WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn all<'e>(executor: impl PgExecutor<'e>) -> DirectoryResult<Vec<Self>> {
        sqlx::query_as(
            "SELECT id, name, genres, city, state, phone, website, facebook_link,
                 seeking_venue, seeking_description, image_link
             FROM artists ORDER BY name, id",
        )
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn detail(
        id: i64,
        now: OffsetDateTime,
        conn: &mut PgConnection,
    ) -> DirectoryResult<ArtistDetail> {
        let artist = Self::with_id(id, &mut *conn).await?;
        let bookings = Booking::for_artist(id, &mut *conn).await?;

        Ok(ArtistDetail {
            artist,
            schedule: Schedule::split(bookings, now),
        })
    }

    pub async fn search<'e>(
        term: &str,
        now: OffsetDateTime,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<SearchResults> {
        listing::search(GroupBy::Artist, term, now, executor).await
    }

    pub async fn create(new_artist: NewArtist, conn: &mut PgConnection) -> DirectoryResult<i64> {
        let new_artist = new_artist.normalized();
        new_artist.validate()?;

        let id = sqlx::query_scalar(
            "INSERT INTO artists
                 (name, genres, city, state, phone, website, facebook_link,
                  seeking_venue, seeking_description, image_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id",
        )
        .bind(&new_artist.name)
        .bind(&new_artist.genres)
        .bind(&new_artist.city)
        .bind(&new_artist.state)
        .bind(&new_artist.phone)
        .bind(&new_artist.website)
        .bind(&new_artist.facebook_link)
        .bind(new_artist.seeking_venue)
        .bind(&new_artist.seeking_description)
        .bind(&new_artist.image_link)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Replace every field of the artist.
    pub async fn update(
        id: i64,
        update: NewArtist,
        conn: &mut PgConnection,
    ) -> DirectoryResult<()> {
        let update = update.normalized();
        update.validate()?;

        let result = sqlx::query(
            "UPDATE artists SET
                 name = $1, genres = $2, city = $3, state = $4, phone = $5, website = $6,
                 facebook_link = $7, seeking_venue = $8, seeking_description = $9,
                 image_link = $10
             WHERE id = $11",
        )
        .bind(&update.name)
        .bind(&update.genres)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.phone)
        .bind(&update.website)
        .bind(&update.facebook_link)
        .bind(update.seeking_venue)
        .bind(&update.seeking_description)
        .bind(&update.image_link)
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::not_found("Artist", id));
        }

        Ok(())
    }

    /// Delete an artist with no shows booked, returning their name.
    pub async fn delete(id: i64, conn: &mut PgConnection) -> DirectoryResult<String> {
        let artist = Self::with_id(id, &mut *conn).await?;

        let show_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE artist_id = $1")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        if show_count > 0 {
            return Err(DirectoryError::Conflict(format!(
                "Artist {} still has {} show(s) booked and cannot be deleted",
                artist.name, show_count
            )));
        }

        sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(artist.name)
    }
}

#[async_trait::async_trait]
impl Record for Artist {
    const KIND: &'static str = "Artist";
    type Fields = NewArtist;

    async fn insert(fields: NewArtist, conn: &mut PgConnection) -> DirectoryResult<i64> {
        Artist::create(fields, conn).await
    }

    async fn replace(id: i64, fields: NewArtist, conn: &mut PgConnection) -> DirectoryResult<()> {
        Artist::update(id, fields, conn).await
    }

    async fn remove(id: i64, conn: &mut PgConnection) -> DirectoryResult<String> {
        Artist::delete(id, conn).await
    }
}

#[derive(InputObject, Clone, Debug, Default, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    #[graphql(default)]
    pub phone: String,
    #[graphql(default)]
    pub website: String,
    #[graphql(default)]
    pub facebook_link: String,
    #[graphql(default)]
    pub seeking_venue: bool,
    #[graphql(default)]
    pub seeking_description: String,
    #[graphql(default)]
    pub image_link: String,
}

impl NewArtist {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            genres: normalize_genres(&self.genres),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            website: self.website.trim().to_owned(),
            facebook_link: self.facebook_link.trim().to_owned(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.trim().to_owned(),
            image_link: self.image_link.trim().to_owned(),
        }
    }

    pub fn validate(&self) -> DirectoryResult<()> {
        Validator::new()
            .required("Name", &self.name)
            .genres(&self.genres)
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

impl From<Artist> for NewArtist {
    fn from(artist: Artist) -> Self {
        Self {
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mock::mock_artist;

    #[test]
    fn existing_artist_is_a_valid_submission() {
        assert!(NewArtist::from(mock_artist()).validate().is_ok());
    }

    #[test]
    fn artist_name_is_required() {
        let new_artist = NewArtist {
            name: "   ".to_owned(),
            ..NewArtist::from(mock_artist())
        }
        .normalized();

        match new_artist.validate() {
            Err(DirectoryError::Invalid(errors)) => assert_eq!(errors, vec!["Name is required"]),
            other => panic!("expected invalid artist, got {other:?}"),
        }
    }

    #[test]
    fn bad_phone_and_links_are_reported() {
        let new_artist = NewArtist {
            phone: "326.123.5000".to_owned(),
            website: "gunsnpetals".to_owned(),
            ..NewArtist::from(mock_artist())
        };

        match new_artist.validate() {
            Err(DirectoryError::Invalid(errors)) => assert_eq!(
                errors,
                vec![
                    "Phone must look like 123-456-7890",
                    "Website must be an http(s) URL",
                ]
            ),
            other => panic!("expected invalid artist, got {other:?}"),
        }
    }
}
