use async_graphql::SimpleObject;
use sqlx::postgres::PgExecutor;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::error::DirectoryResult;
use crate::models::aggregate::{joined_counts_query, GroupBy, Partition};
use crate::models::like_pattern;

/// A venue or artist with how many shows it has coming up.
#[derive(SimpleObject, FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "count")]
    pub upcoming_shows_count: i64,
}

#[derive(SimpleObject, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// How many records matched
    pub count: usize,
    pub data: Vec<Listing>,
}

impl From<Vec<Listing>> for SearchResults {
    fn from(data: Vec<Listing>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Case-insensitive substring search on venue or artist names.
/// An empty term matches every record.
pub async fn search<'e>(
    group_by: GroupBy,
    term: &str,
    now: OffsetDateTime,
    executor: impl PgExecutor<'e>,
) -> DirectoryResult<SearchResults> {
    let query = joined_counts_query(
        Partition::Upcoming,
        group_by,
        "o.id, o.name",
        "WHERE o.name ILIKE $2 ESCAPE '\\' ORDER BY o.name, o.id",
    );
    let listings: Vec<Listing> = sqlx::query_as(&query)
        .bind(now)
        .bind(like_pattern(term))
        .fetch_all(executor)
        .await?;

    Ok(listings.into())
}
