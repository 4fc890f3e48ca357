use diesel_async::{AsyncConnection, AsyncPgConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::query::{admission, rate_limit, sheet};
use crate::db::{BoxFuture, DbProvider, RsvpStore};
use crate::error::{DbError, DbResult};
use crate::model::admission::{Admission, AdmissionOutcome};
use crate::model::rate_limit::RateLimitEntry;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// ## Summary
/// Creates a new database connection pool.
///
/// ## Errors
/// Returns an error if the pool cannot be created with the provided database URL.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool(database_url: &str, size: u32) -> anyhow::Result<DbPool> {
    tracing::debug!("Creating database connection pool");

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(size))
        .test_on_check_out(false)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(config)
        .await?;

    tracing::info!(
        pool_size = size,
        "Database connection pool created successfully"
    );

    Ok(pool)
}

impl DbProvider for DbPool {
    #[tracing::instrument(skip(self))]
    fn get_connection<'a>(&'a self) -> BoxFuture<'a, DbResult<DbConnection<'a>>> {
        Box::pin(async move {
            let conn = self.get().await?;
            Ok(conn)
        })
    }
}

impl RsvpStore for DbPool {
    fn admit<'a>(&'a self, admission: &'a Admission) -> BoxFuture<'a, DbResult<AdmissionOutcome>> {
        Box::pin(async move {
            let mut conn = self.get_connection().await?;
            conn.transaction::<_, DbError, _>(move |tx| {
                async move { admission::admit(tx, admission).await }.scope_boxed()
            })
            .await
        })
    }

    fn rows<'a>(&'a self, sheet_name: &'a str) -> BoxFuture<'a, DbResult<Vec<Vec<String>>>> {
        Box::pin(async move {
            let mut conn = self.get_connection().await?;
            let Some(found) = sheet::find_sheet(&mut conn, sheet_name).await? else {
                return Ok(Vec::new());
            };

            let data = sheet::load_rows(&mut conn, sheet_name).await?;
            let mut rows = Vec::with_capacity(data.len() + 1);
            rows.push(found.header);
            rows.extend(data.into_iter().map(|row| row.cells));
            Ok(rows)
        })
    }

    fn rate_limit_entries<'a>(
        &'a self,
        phone: &'a str,
    ) -> BoxFuture<'a, DbResult<Vec<RateLimitEntry>>> {
        Box::pin(async move {
            let mut conn = self.get_connection().await?;
            Ok(rate_limit::entries_for_phone(&mut conn, phone).await?)
        })
    }
}
