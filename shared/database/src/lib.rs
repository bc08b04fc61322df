pub mod postgres;
pub mod mongodb;
pub mod migrations;
pub mod repositories;

pub use postgres::{PostgresPool, create_postgres_pool, health_check as postgres_health_check};
pub use self::mongodb::{MongoClient, MongoDatabase, bom_database, create_mongo_client, health_check as mongo_health_check};
pub use repositories::*;

use anyhow::Result;
use picklist_utils::DatabaseConfig;

pub async fn initialize_databases(config: &DatabaseConfig) -> Result<(PostgresPool, MongoClient)> {
    let postgres_pool = create_postgres_pool(config).await?;
    let mongo_client = create_mongo_client(config).await?;

    migrations::run_postgres_migrations(&postgres_pool).await?;

    Ok((postgres_pool, mongo_client))
}
