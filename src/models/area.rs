use async_graphql::SimpleObject;
use sqlx::postgres::PgExecutor;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::error::DirectoryResult;
use crate::models::aggregate::{joined_counts_query, GroupBy, Partition};
use crate::models::listing::Listing;

/// The venues in one city, for the venues page.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Listing>,
}

#[derive(FromRow)]
struct AreaRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    count: i64,
}

impl Area {
    /// Every venue grouped by city and state, with its upcoming show count.
    pub async fn all<'e>(
        now: OffsetDateTime,
        executor: impl PgExecutor<'e>,
    ) -> DirectoryResult<Vec<Self>> {
        let query = joined_counts_query(
            Partition::Upcoming,
            GroupBy::Venue,
            "o.id, o.name, o.city, o.state",
            "ORDER BY o.state, o.city, o.name, o.id",
        );
        let rows: Vec<AreaRow> = sqlx::query_as(&query).bind(now).fetch_all(executor).await?;

        Ok(Self::group(rows.into_iter().map(|row| {
            (
                row.city,
                row.state,
                Listing {
                    id: row.id,
                    name: row.name,
                    upcoming_shows_count: row.count,
                },
            )
        })))
    }

    /// Collapse rows sorted by (state, city) into one area per pair.
    pub fn group(rows: impl IntoIterator<Item = (String, String, Listing)>) -> Vec<Self> {
        let mut areas: Vec<Self> = Vec::new();
        for (city, state, venue) in rows {
            match areas.last_mut() {
                Some(area) if area.city == city && area.state == state => area.venues.push(venue),
                _ => areas.push(Area {
                    city,
                    state,
                    venues: vec![venue],
                }),
            }
        }

        areas
    }
}
