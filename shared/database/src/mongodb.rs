use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

use picklist_utils::DatabaseConfig;

pub type MongoClient = Client;
pub type MongoDatabase = Database;

pub async fn create_mongo_client(config: &DatabaseConfig) -> Result<MongoClient> {
    let mut options = ClientOptions::parse(&config.mongodb_url)
        .await
        .context("Invalid MongoDB connection string")?;
    options.app_name = Some("picklist-api".to_string());
    options.connect_timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
    options.server_selection_timeout = Some(Duration::from_secs(config.connection_timeout_seconds));

    let client = Client::with_options(options)?;
    health_check(&client).await.context("MongoDB ping failed")?;

    tracing::info!(database = %config.bom_database, "Connected to MongoDB BOM store");
    Ok(client)
}

/// Database holding the `Fixture` and `PDMSubAssembly` collections.
pub fn bom_database(client: &MongoClient, config: &DatabaseConfig) -> MongoDatabase {
    client.database(&config.bom_database)
}

pub async fn health_check(client: &MongoClient) -> Result<()> {
    client
        .database("admin")
        .run_command(doc! {"ping": 1}, None)
        .await?;
    Ok(())
}
