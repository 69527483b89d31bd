//! Embedded schema migrations.

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, PooledConnection, TRACING_TARGET_MIGRATION};

/// Runs all pending migrations and returns the versions that were applied.
///
/// The diesel migration harness is synchronous, so it runs on the blocking pool
/// behind an [`AsyncConnectionWrapper`].
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    tracing::info!(target: TRACING_TARGET_MIGRATION, "Starting database migration process");

    let start_time = Instant::now();
    let conn = pg.get_pooled_connection().await?;
    let mut conn: AsyncConnectionWrapper<PooledConnection> = AsyncConnectionWrapper::from(conn);

    let result = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.iter().map(ToString::to_string).collect::<Vec<_>>())
    })
    .await;

    let duration = start_time.elapsed();
    let versions = result
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Migration task panicked"
            );
            PgError::Migration(err.into())
        })?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Database migration process failed"
            );
            PgError::Migration(err)
        })?;

    if versions.is_empty() {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            "Database schema is already up to date"
        );
    } else {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            migrations = ?versions,
            "Applied pending migrations"
        );
    }

    Ok(versions)
}

/// Extension trait adding migration support to [`PgClient`].
pub trait PgClientExt {
    /// Applies any unapplied migrations. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails or the database is unreachable.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<Vec<String>>> + Send;
}

impl PgClientExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<Vec<String>> {
        run_pending_migrations(self).await
    }
}
