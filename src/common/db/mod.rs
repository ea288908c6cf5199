use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};
use tracing::{event, Level};

use crate::settings::types::Settings;

const MAX_OPEN_CONNECTIONS: u32 = 10;
const MIN_IDLE_CONNECTIONS: u32 = 5;
const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(5 * 60);

pub async fn init_db(settings: &Settings) -> Result<DbConn, DbErr> {
    let mut options = ConnectOptions::new(settings.database.url.clone());
    options
        .max_connections(MAX_OPEN_CONNECTIONS)
        .min_connections(MIN_IDLE_CONNECTIONS)
        .max_lifetime(MAX_CONNECTION_LIFETIME)
        .sqlx_logging(settings.debug);

    event!(target: "backend", Level::INFO, "Connecting to the database.");
    let db_conn = Database::connect(options).await?;
    db_conn.ping().await?;
    event!(target: "backend", Level::INFO, "Connected to the database.");

    Migrator::up(&db_conn, None).await?;
    Ok(db_conn)
}
