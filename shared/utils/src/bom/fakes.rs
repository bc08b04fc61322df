//! In-memory implementations of the lookup traits, for tests and local runs
//! without MongoDB, PostgreSQL or the inventory service.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use picklist_models::{AssemblyRecord, Fixture, InventoryEntry, InventoryRegion};

use super::lookups::{BomSource, GroupingCatalog, InventoryService, MakeBuyCatalog};

#[derive(Default)]
pub struct InMemoryBomSource {
    pub fixtures: HashMap<String, Fixture>,
    pub references: HashMap<String, Fixture>,
    pub pool: Vec<AssemblyRecord>,
    pub fail_fixture: bool,
    pub fail_reference: bool,
    pub fail_pool: bool,
}

impl InMemoryBomSource {
    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.fixtures.insert(fixture.name.clone(), fixture);
        self
    }

    pub fn with_reference(mut self, fixture: Fixture) -> Self {
        self.references.insert(fixture.name.clone(), fixture);
        self
    }

    pub fn with_pool(mut self, pool: Vec<AssemblyRecord>) -> Self {
        self.pool = pool;
        self
    }
}

#[async_trait]
impl BomSource for InMemoryBomSource {
    async fn fixture(&self, name: &str) -> Result<Option<Fixture>> {
        if self.fail_fixture {
            return Err(anyhow!("fixture store unavailable"));
        }
        Ok(self.fixtures.get(name).cloned())
    }

    async fn reference_fixture(&self, name: &str) -> Result<Option<Fixture>> {
        if self.fail_reference {
            return Err(anyhow!("reference store unavailable"));
        }
        Ok(self.references.get(name).cloned())
    }

    async fn assembly_pool(&self) -> Result<Vec<AssemblyRecord>> {
        if self.fail_pool {
            return Err(anyhow!("assembly pool unavailable"));
        }
        Ok(self.pool.clone())
    }
}

/// Make, buy and grouping lists. Keys are stored lower-cased so lookups are
/// case-insensitive like the SQL catalogs.
#[derive(Default)]
pub struct InMemoryCatalog {
    pub make: HashSet<String>,
    pub buy: HashSet<String>,
    pub groupings: HashMap<String, String>,
    pub failing: bool,
    pub delay: Option<Duration>,
    pub calls: AtomicU64,
}

impl InMemoryCatalog {
    pub fn with_force_make(mut self, tdgpn: &str) -> Self {
        self.make.insert(tdgpn.to_lowercase());
        self
    }

    pub fn with_force_buy(mut self, tdgpn: &str) -> Self {
        self.buy.insert(tdgpn.to_lowercase());
        self
    }

    pub fn with_grouping(mut self, tdgpn: &str, grouping: &str) -> Self {
        self.groupings.insert(tdgpn.to_lowercase(), grouping.to_string());
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(anyhow!("catalog database unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MakeBuyCatalog for InMemoryCatalog {
    async fn is_force_make(&self, tdgpn: &str) -> Result<bool> {
        self.enter().await?;
        Ok(self.make.contains(&tdgpn.to_lowercase()))
    }

    async fn is_force_buy(&self, tdgpn: &str) -> Result<bool> {
        self.enter().await?;
        Ok(self.buy.contains(&tdgpn.to_lowercase()))
    }
}

#[async_trait]
impl GroupingCatalog for InMemoryCatalog {
    async fn grouping(&self, tdgpn: &str) -> Result<Option<String>> {
        self.enter().await?;
        Ok(self.groupings.get(&tdgpn.to_lowercase()).cloned())
    }
}

/// Fixed inventory per region, with per-part failures and delays.
#[derive(Default)]
pub struct StaticInventory {
    pub domestic: HashMap<String, Vec<InventoryEntry>>,
    pub international: HashMap<String, Vec<InventoryEntry>>,
    pub failing: HashSet<String>,
    pub delays: HashMap<String, Duration>,
    pub calls: AtomicU64,
}

impl StaticInventory {
    pub fn with_locations(mut self, tdgpn: &str, entries: Vec<InventoryEntry>) -> Self {
        self.domestic.insert(tdgpn.to_string(), entries);
        self
    }

    pub fn with_intl_locations(mut self, tdgpn: &str, entries: Vec<InventoryEntry>) -> Self {
        self.international.insert(tdgpn.to_string(), entries);
        self
    }

    pub fn failing_for(mut self, tdgpn: &str) -> Self {
        self.failing.insert(tdgpn.to_string());
        self
    }

    pub fn delayed_for(mut self, tdgpn: &str, delay: Duration) -> Self {
        self.delays.insert(tdgpn.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl InventoryService for StaticInventory {
    async fn locations(&self, tdgpn: &str, region: InventoryRegion) -> Result<Vec<InventoryEntry>> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Some(delay) = self.delays.get(tdgpn) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(tdgpn) {
            return Err(anyhow!("inventory service returned 503 for {}", tdgpn));
        }

        let source = match region {
            InventoryRegion::Domestic => &self.domestic,
            InventoryRegion::International => &self.international,
        };
        Ok(source.get(tdgpn).cloned().unwrap_or_default())
    }
}
