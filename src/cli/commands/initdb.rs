use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, info};

/// Create the schema on a fresh database, or bring an existing one up to
/// date. Safe to run repeatedly.
pub async fn init_database(database_url: &str) -> Result<()> {
    info!("Initializing database schema");
    debug!("Database URL: {}", database_url);

    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("connecting to '{}'", database_url))?;

    let pending = Migrator::get_pending_migrations(&db)
        .await
        .context("listing pending migrations")?
        .len();
    if pending == 0 {
        info!("Schema already up to date, nothing to apply");
        return Ok(());
    }

    info!("Applying {} pending migration(s)", pending);
    Migrator::up(&db, None).await.context("running migrations")?;

    info!("Database ready");
    Ok(())
}
