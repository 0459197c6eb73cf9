//! What venues and artists have in common: both are listed, edited and
//! deleted through a form, each write inside its caller's transaction.

use sqlx::PgConnection;

use crate::error::DirectoryResult;

#[async_trait::async_trait]
pub trait Record: Send + Sync + 'static {
    /// How the record is named in messages, e.g. `Venue`.
    const KIND: &'static str;
    /// Every editable field, used both to create and to replace a record.
    type Fields: Send + 'static;

    async fn insert(fields: Self::Fields, conn: &mut PgConnection) -> DirectoryResult<i64>;

    async fn replace(id: i64, fields: Self::Fields, conn: &mut PgConnection)
        -> DirectoryResult<()>;

    /// Delete the record, returning its name.
    async fn remove(id: i64, conn: &mut PgConnection) -> DirectoryResult<String>;
}
