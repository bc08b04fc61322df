//! Fixture Repository
//!
//! Reads fixture BOMs and the assembly pool from the MongoDB BOM store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;

use picklist_models::{AssemblyRecord, Fixture};
use picklist_utils::{BomSource, DatabaseConfig};

use crate::mongodb::{bom_database, MongoClient};

#[derive(Clone)]
pub struct MongoBomRepository {
    fixtures: Collection<Fixture>,
    fixture_records: Collection<AssemblyRecord>,
    sub_assemblies: Collection<AssemblyRecord>,
}

impl MongoBomRepository {
    pub fn new(client: &MongoClient, config: &DatabaseConfig) -> Self {
        let database = bom_database(client, config);
        Self {
            fixtures: database.collection(&config.fixture_collection),
            fixture_records: database.collection(&config.fixture_collection),
            sub_assemblies: database.collection(&config.subassembly_collection),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Fixture>> {
        self.fixtures
            .find_one(doc! { "Name": name }, None)
            .await
            .with_context(|| format!("Failed to fetch fixture {}", name))
    }

    async fn records(collection: &Collection<AssemblyRecord>) -> Result<Vec<AssemblyRecord>> {
        let options = FindOptions::builder().projection(pool_projection()).build();
        let cursor = collection.find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }
}

fn pool_projection() -> Document {
    doc! { "_id": 0, "Name": 1, "Path": 1, "Buy": 1 }
}

#[async_trait]
impl BomSource for MongoBomRepository {
    async fn fixture(&self, name: &str) -> Result<Option<Fixture>> {
        self.find_by_name(name).await
    }

    /// The stored document itself: its quantities have not been through
    /// explosion, so they are the authoritative per-unit values.
    async fn reference_fixture(&self, name: &str) -> Result<Option<Fixture>> {
        self.find_by_name(name).await
    }

    async fn assembly_pool(&self) -> Result<Vec<AssemblyRecord>> {
        let mut pool = Self::records(&self.fixture_records)
            .await
            .context("Failed to load fixture pool")?;
        let sub_assemblies = Self::records(&self.sub_assemblies)
            .await
            .context("Failed to load sub-assembly pool")?;

        pool.extend(sub_assemblies);
        tracing::debug!(records = pool.len(), "Loaded assembly pool");
        Ok(pool)
    }
}
