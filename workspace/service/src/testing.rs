use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;

/// Route service logs to the test harness. RUST_LOG picks the level.
pub fn init_tracing() {
    // Another test may have installed the subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory SQLite database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    init_tracing();

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn setup_installs_a_global_subscriber_once() {
        let _first = setup_db().await;
        let _second = setup_db().await;

        assert!(tracing::dispatcher::has_been_set());
    }
}
