pub mod models;
pub mod store;

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

pub use store::ReadingStore;

/// How many times to try connecting before giving up, and how long to wait
/// between attempts. The database usually starts alongside the service, so
/// the first few attempts are expected to fail in an orchestrated deploy.
const CONNECT_ATTEMPTS: u32 = 10;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Build the connection pool, retrying for a bounded window.
///
/// Exhausting the retry budget is fatal: the caller must not start
/// serving without a reachable database.
pub async fn connect_with_retry(database_url: &str) -> Result<PgPool> {
    let mut attempt = 1;
    loop {
        match PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!(attempt, "Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    error = %e,
                    "Database not reachable yet, retrying"
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("database unreachable after {CONNECT_ATTEMPTS} attempts")
                });
            }
        }
    }
}

/// Create the `readings` table if it does not exist. Safe on every startup.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
