//! Capability traits for every external collaborator the engine consults.
//!
//! The engine never reaches a database or HTTP client directly; adapters in
//! `picklist-database` and the API service implement these traits, and the
//! in-memory versions in [`super::fakes`] back the tests.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use picklist_models::{AssemblyRecord, Fixture, InventoryEntry, InventoryRegion};

/// Document store holding fixture BOMs.
#[async_trait]
pub trait BomSource: Send + Sync {
    /// Live fixture by exact name, to be exploded.
    async fn fixture(&self, name: &str) -> Result<Option<Fixture>>;

    /// Stored snapshot whose quantities are authoritative per unit.
    async fn reference_fixture(&self, name: &str) -> Result<Option<Fixture>>;

    /// Every fixture and sub-assembly record, for `PathName` buy resolution.
    async fn assembly_pool(&self) -> Result<Vec<AssemblyRecord>>;
}

/// Purchasing reference lists. Matching is case-insensitive and exact.
#[async_trait]
pub trait MakeBuyCatalog: Send + Sync {
    async fn is_force_make(&self, tdgpn: &str) -> Result<bool>;

    async fn is_force_buy(&self, tdgpn: &str) -> Result<bool>;
}

/// Design master list grouping (`Die`, `Label`, ...) by part number.
#[async_trait]
pub trait GroupingCatalog: Send + Sync {
    async fn grouping(&self, tdgpn: &str) -> Result<Option<String>>;
}

/// Warehouse inventory service, ranked locations first.
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn locations(&self, tdgpn: &str, region: InventoryRegion) -> Result<Vec<InventoryEntry>>;
}

/// Runs a lookup with a hard deadline. An elapsed deadline surfaces as an
/// error carrying [`tokio::time::error::Elapsed`].
pub async fn bounded<T, F>(limit: Duration, lookup: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, lookup).await {
        Ok(result) => result,
        Err(elapsed) => Err(anyhow::Error::new(elapsed)),
    }
}
