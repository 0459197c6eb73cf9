use async_graphql::{Context, Object, Result};
use sqlx::PgPool;

use crate::models::aggregate::{aggregate, GroupBy, Partition, ShowCount};
use crate::models::area::Area;
use crate::models::artist::Artist;
use crate::models::listing::SearchResults;
use crate::models::show::ShowListing;
use crate::models::venue::Venue;
use crate::util::current_time;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every venue, ordered by name
    pub async fn venues(&self, ctx: &Context<'_>) -> Result<Vec<Venue>> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Venue::all(pool).await?)
    }

    pub async fn venue(&self, ctx: &Context<'_>, id: i64) -> Result<Venue> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Venue::with_id(id, pool).await?)
    }

    /// Venues grouped by city and state, with their upcoming show counts
    pub async fn areas(&self, ctx: &Context<'_>) -> Result<Vec<Area>> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Area::all(current_time(), pool).await?)
    }

    /// Venues whose name contains `term`, ignoring case
    pub async fn search_venues(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] term: String,
    ) -> Result<SearchResults> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Venue::search(&term, current_time(), pool).await?)
    }

    /// Every artist, ordered by name
    pub async fn artists(&self, ctx: &Context<'_>) -> Result<Vec<Artist>> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Artist::all(pool).await?)
    }

    pub async fn artist(&self, ctx: &Context<'_>, id: i64) -> Result<Artist> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Artist::with_id(id, pool).await?)
    }

    /// Artists whose name contains `term`, ignoring case
    pub async fn search_artists(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] term: String,
    ) -> Result<SearchResults> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(Artist::search(&term, current_time(), pool).await?)
    }

    /// Upcoming or past show counts per venue or artist, leaving out zero counts
    pub async fn show_counts(
        &self,
        ctx: &Context<'_>,
        partition: Partition,
        group_by: GroupBy,
    ) -> Result<Vec<ShowCount>> {
        let pool: &PgPool = ctx.data_unchecked();
        let counts = aggregate(partition, group_by, current_time(), pool).await?;

        Ok(counts.entries())
    }

    /// Every show, soonest first
    pub async fn shows(&self, ctx: &Context<'_>) -> Result<Vec<ShowListing>> {
        let pool: &PgPool = ctx.data_unchecked();
        Ok(ShowListing::all(pool).await?)
    }
}
