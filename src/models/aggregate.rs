//! Upcoming/past show counts, grouped by venue or by artist.
//!
//! Whether a show is upcoming is never stored: it is derived from the show's
//! start time and the `now` handed in by the caller, so two calls issued on
//! either side of a start time may disagree.
//!
//! Counts come in two shapes. [`aggregate`] runs the grouped count on its own
//! and returns a sparse [`ShowCounts`]; [`joined_counts_query`] embeds the same
//! grouped count as a subquery left-joined against the owning table, with
//! missing groups coalesced to zero.

use std::collections::HashMap;

use async_graphql::{Enum, SimpleObject};
use sqlx::postgres::PgExecutor;
use time::OffsetDateTime;

use crate::error::DirectoryResult;
use crate::models::show::Show;

/// Which side of `now` a show falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum)]
pub enum Partition {
    /// `start_time > now`
    Upcoming,
    /// `start_time <= now`
    Past,
}

impl Partition {
    pub fn of(start_time: OffsetDateTime, now: OffsetDateTime) -> Self {
        if start_time > now {
            Partition::Upcoming
        } else {
            Partition::Past
        }
    }

    pub fn contains(self, start_time: OffsetDateTime, now: OffsetDateTime) -> bool {
        Self::of(start_time, now) == self
    }

    fn comparison(self) -> &'static str {
        match self {
            Partition::Upcoming => ">",
            Partition::Past => "<=",
        }
    }
}

/// The foreign key shows are grouped by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum)]
pub enum GroupBy {
    Venue,
    Artist,
}

impl GroupBy {
    pub fn column(self) -> &'static str {
        match self {
            GroupBy::Venue => "venue_id",
            GroupBy::Artist => "artist_id",
        }
    }

    pub fn owner_table(self) -> &'static str {
        match self {
            GroupBy::Venue => "venues",
            GroupBy::Artist => "artists",
        }
    }

    pub fn key(self, show: &Show) -> Option<i64> {
        match self {
            GroupBy::Venue => show.venue_id,
            GroupBy::Artist => show.artist_id,
        }
    }
}

/// Show counts keyed by venue or artist id. Absent ids have no matching shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShowCounts(HashMap<i64, i64>);

impl ShowCounts {
    /// The count for `id`, coalescing absent groups to zero.
    pub fn get(&self, id: i64) -> i64 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    /// How many groups had at least one matching show.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every non-zero group, ordered by id.
    pub fn entries(&self) -> Vec<ShowCount> {
        let mut entries: Vec<ShowCount> = self
            .0
            .iter()
            .map(|(&id, &count)| ShowCount { id, count })
            .collect();
        entries.sort_by_key(|entry| entry.id);

        entries
    }
}

/// One group of [`ShowCounts`].
#[derive(SimpleObject, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowCount {
    /// The venue or artist ID
    pub id: i64,
    pub count: i64,
}

impl FromIterator<(i64, i64)> for ShowCounts {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(_id, count)| *count > 0).collect())
    }
}

/// The grouped count, binding `now` as `$1`. Yields `(id, count)` rows.
pub fn count_query(partition: Partition, group_by: GroupBy) -> String {
    let column = group_by.column();
    format!(
        "SELECT {column} AS id, COUNT(*) AS count FROM shows \
         WHERE {column} IS NOT NULL AND start_time {op} $1 \
         GROUP BY {column}",
        column = column,
        op = partition.comparison(),
    )
}

/// Select `columns` from the owning table (aliased `o`) alongside the
/// coalesced count for each row, as a `count` column. `tail` is appended
/// verbatim for filters and ordering; `$1` is already bound to `now`.
pub fn joined_counts_query(
    partition: Partition,
    group_by: GroupBy,
    columns: &str,
    tail: &str,
) -> String {
    format!(
        "SELECT {columns}, COALESCE(counts.count, 0) AS count \
         FROM {owner} o LEFT JOIN ({counts}) counts ON counts.id = o.id {tail}",
        columns = columns,
        owner = group_by.owner_table(),
        counts = count_query(partition, group_by),
        tail = tail,
    )
}

pub async fn aggregate<'e>(
    partition: Partition,
    group_by: GroupBy,
    now: OffsetDateTime,
    executor: impl PgExecutor<'e>,
) -> DirectoryResult<ShowCounts> {
    let query = count_query(partition, group_by);
    let rows: Vec<(i64, i64)> = sqlx::query_as(&query)
        .bind(now)
        .fetch_all(executor)
        .await?;

    Ok(rows.into_iter().collect())
}

/// The same grouping over shows already in memory.
///
/// This is the reference rule [`count_query`] must agree with: anything the
/// SQL counts for a partition and key, this counts too.
pub fn tally<'s>(
    shows: impl IntoIterator<Item = &'s Show>,
    partition: Partition,
    group_by: GroupBy,
    now: OffsetDateTime,
) -> ShowCounts {
    let mut counts = HashMap::new();
    for show in shows {
        if !partition.contains(show.start_time, now) {
            continue;
        }
        if let Some(id) = group_by.key(show) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    ShowCounts(counts)
}
