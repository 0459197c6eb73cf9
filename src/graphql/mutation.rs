use async_graphql::{Context, Object, Result};
use sqlx::PgPool;

use crate::graphql::SUCCESS_MESSAGE;
use crate::models::artist::{Artist, NewArtist};
use crate::models::show::{NewShow, Show};
use crate::models::venue::{NewVenue, Venue};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Lists a new venue
    pub async fn create_venue(&self, ctx: &Context<'_>, new_venue: NewVenue) -> Result<Venue> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        let id = Venue::create(new_venue, &mut *tx).await?;
        let venue = Venue::with_id(id, &mut *tx).await?;
        tx.commit().await?;

        tracing::info!(venue_id = id, "venue listed");
        Ok(venue)
    }

    /// Replaces every field of a venue
    pub async fn update_venue(
        &self,
        ctx: &Context<'_>,
        id: i64,
        update: NewVenue,
    ) -> Result<Venue> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        Venue::update(id, update, &mut *tx).await?;
        let venue = Venue::with_id(id, &mut *tx).await?;
        tx.commit().await?;

        Ok(venue)
    }

    /// Deletes a venue that hosts no shows
    pub async fn delete_venue(&self, ctx: &Context<'_>, id: i64) -> Result<&'static str> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        let name = Venue::delete(id, &mut *tx).await?;
        tx.commit().await?;

        tracing::info!(venue_id = id, %name, "venue deleted");
        Ok(SUCCESS_MESSAGE)
    }

    /// Lists a new artist
    pub async fn create_artist(&self, ctx: &Context<'_>, new_artist: NewArtist) -> Result<Artist> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        let id = Artist::create(new_artist, &mut *tx).await?;
        let artist = Artist::with_id(id, &mut *tx).await?;
        tx.commit().await?;

        tracing::info!(artist_id = id, "artist listed");
        Ok(artist)
    }

    /// Replaces every field of an artist
    pub async fn update_artist(
        &self,
        ctx: &Context<'_>,
        id: i64,
        update: NewArtist,
    ) -> Result<Artist> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        Artist::update(id, update, &mut *tx).await?;
        let artist = Artist::with_id(id, &mut *tx).await?;
        tx.commit().await?;

        Ok(artist)
    }

    /// Deletes an artist with no shows booked
    pub async fn delete_artist(&self, ctx: &Context<'_>, id: i64) -> Result<&'static str> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        let name = Artist::delete(id, &mut *tx).await?;
        tx.commit().await?;

        tracing::info!(artist_id = id, %name, "artist deleted");
        Ok(SUCCESS_MESSAGE)
    }

    /// Books an artist at a venue
    pub async fn create_show(&self, ctx: &Context<'_>, new_show: NewShow) -> Result<Show> {
        let pool: &PgPool = ctx.data_unchecked();
        let mut tx = pool.begin().await?;
        let id = Show::create(new_show, &mut *tx).await?;
        let show = Show::with_id(id, &mut *tx).await?;
        tx.commit().await?;

        tracing::info!(show_id = id, "show listed");
        Ok(show)
    }
}
