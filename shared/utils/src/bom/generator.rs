//! Pick-list generation pipeline.
//!
//! Fetch the live fixture, explode it in place, then build one line per row.
//! Line building is independent per row and fans out with a bounded
//! concurrency limit; `buffered` keeps the output in row order.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::error::Elapsed;
use tracing::{debug, info, instrument, warn};

use picklist_models::{
    BatchPickListRequest, InventoryEntry, InventoryRegion, LookupSource, PickList, PickListLine,
    PickListRequest, PickListWarning, PickStatus,
};

use super::explosion::ExplosionEngine;
use super::inventory::{is_consumable, summarize_locations};
use super::lookups::{bounded, BomSource, GroupingCatalog, InventoryService, MakeBuyCatalog};
use super::reconcile::{
    describe_with_parent, per_unit_quantity, reconcile_quantities, Grouping, ReferenceSnapshot,
};
use super::tree::BomTree;
use crate::config::EngineConfig;
use crate::error::{ErrorResponse, PickListError, PickListResult};
use crate::log_degraded;
use crate::validation::{validate_fixture_name, validate_model};

/// Result of one batch entry; exactly one of `pick_list` and `error` is set.
#[derive(Debug, Serialize)]
pub struct BatchEntryOutcome {
    pub fixture: String,
    pub quantity: i64,
    pub pick_list: Option<PickList>,
    pub error: Option<ErrorResponse>,
}

impl BatchEntryOutcome {
    pub fn is_ok(&self) -> bool {
        self.pick_list.is_some()
    }
}

#[derive(Clone)]
pub struct PickListGenerator {
    bom: Arc<dyn BomSource>,
    catalog: Arc<dyn MakeBuyCatalog>,
    groupings: Arc<dyn GroupingCatalog>,
    inventory: Arc<dyn InventoryService>,
    config: EngineConfig,
}

impl PickListGenerator {
    pub fn new(
        bom: Arc<dyn BomSource>,
        catalog: Arc<dyn MakeBuyCatalog>,
        groupings: Arc<dyn GroupingCatalog>,
        inventory: Arc<dyn InventoryService>,
        config: EngineConfig,
    ) -> Self {
        Self {
            bom,
            catalog,
            groupings,
            inventory,
            config,
        }
    }

    fn lookup_timeout(&self) -> Duration {
        self.config.lookup_timeout()
    }

    #[instrument(skip(self), fields(fixture = %request.fixture, quantity = request.quantity))]
    pub async fn generate(
        &self,
        request: &PickListRequest,
        region: InventoryRegion,
    ) -> PickListResult<PickList> {
        validate_model(request)?;
        let name = validate_fixture_name(&request.fixture)?;

        let live = match bounded(self.lookup_timeout(), self.bom.fixture(&name)).await {
            Ok(Some(fixture)) => fixture,
            Ok(None) => return Err(PickListError::fixture_not_found(&name)),
            Err(err) if err.is::<Elapsed>() => {
                return Err(PickListError::timeout(format!("fixture lookup for {}", name)))
            }
            Err(err) => return Err(PickListError::database(format!("{:#}", err))),
        };

        let mut warnings = Vec::new();

        let reference = match bounded(self.lookup_timeout(), self.bom.reference_fixture(&name)).await {
            Ok(reference) => ReferenceSnapshot::from_fixture(reference.as_ref()),
            Err(err) => {
                warnings.push(degraded(LookupSource::ReferenceFixture, &name, &err));
                ReferenceSnapshot::default()
            }
        };

        if reference.is_empty() {
            debug!(fixture = %name, "no reference quantities, using live tree");
        }

        let pool = match bounded(self.lookup_timeout(), self.bom.assembly_pool()).await {
            Ok(pool) => pool,
            Err(err) => {
                warnings.push(degraded(LookupSource::AssemblyPool, &name, &err));
                Vec::new()
            }
        };

        let mut tree = BomTree::new(live.components);
        let explosion = ExplosionEngine::new(self.catalog.as_ref(), self.lookup_timeout());
        warnings.extend(explosion.explode(&mut tree, &pool).await);

        let built: Vec<(PickListLine, Vec<PickListWarning>)> = stream::iter(0..tree.len())
            .map(|idx| self.build_line(&tree, idx, &reference, request.quantity, region))
            .buffered(self.config.max_concurrent_lookups.max(1))
            .collect()
            .await;

        let mut lines = Vec::with_capacity(built.len());
        for (line, line_warnings) in built {
            lines.push(line);
            warnings.extend(line_warnings);
        }

        let pick_list = PickList {
            fixture: name,
            description: live.description,
            order_quantity: request.quantity,
            region,
            lines,
            warnings,
            generated_at: Utc::now(),
        };

        info!(
            lines = pick_list.lines.len(),
            short = pick_list.short_count(),
            degraded = pick_list.warnings.len(),
            "pick list generated"
        );

        Ok(pick_list)
    }

    /// Generates every entry in order. A failing entry carries its own error
    /// and does not stop the rest.
    pub async fn generate_batch(
        &self,
        batch: &BatchPickListRequest,
    ) -> PickListResult<Vec<BatchEntryOutcome>> {
        validate_model(batch)?;
        let region = InventoryRegion::from_intl_flag(batch.intl);

        let mut outcomes = Vec::with_capacity(batch.entries.len());
        for entry in &batch.entries {
            let outcome = match self.generate(entry, region).await {
                Ok(pick_list) => BatchEntryOutcome {
                    fixture: pick_list.fixture.clone(),
                    quantity: entry.quantity,
                    pick_list: Some(pick_list),
                    error: None,
                },
                Err(err) => {
                    warn!(fixture = %entry.fixture, error = %err, "batch entry failed");
                    BatchEntryOutcome {
                        fixture: entry.fixture.clone(),
                        quantity: entry.quantity,
                        pick_list: None,
                        error: Some(ErrorResponse::from(err)),
                    }
                }
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn build_line(
        &self,
        tree: &BomTree,
        idx: usize,
        reference: &ReferenceSnapshot,
        order_quantity: i64,
        region: InventoryRegion,
    ) -> (PickListLine, Vec<PickListWarning>) {
        let component = tree.get(idx);
        let parent_tdgpn = tree.parent(idx).map(|p| p.tdgpn.clone()).unwrap_or_default();
        let per_unit = per_unit_quantity(component, tree.is_suppressed(idx), reference);

        let ((grouping, grouping_warning), (entries, inventory_warning)) = tokio::join!(
            self.grouping_for(&component.tdgpn),
            self.locations_for(&component.tdgpn, region)
        );

        let summary = summarize_locations(&entries);
        let consumable = is_consumable(&summary);
        let quantities = reconcile_quantities(component, per_unit, order_quantity, consumable, grouping);

        let line = PickListLine {
            level: component.level.clone(),
            tdgpn: component.tdgpn.clone(),
            description: describe_with_parent(&parent_tdgpn, component.description_text()),
            parent_tdgpn,
            vendor: component.vendor.clone(),
            vendor_pn: component.vendor_pn.clone(),
            unit_of_measure: component.unit_of_measure.clone(),
            quantity_per_unit: quantities.per_unit,
            quantity_needed: quantities.needed,
            status: PickStatus::classify(consumable, quantities.needed, summary.quantity_available),
            location: summary.location,
            quantity_available: summary.quantity_available,
            is_consumable_or_vmi: consumable,
        };

        let warnings = grouping_warning.into_iter().chain(inventory_warning).collect();
        (line, warnings)
    }

    async fn grouping_for(&self, tdgpn: &str) -> (Grouping, Option<PickListWarning>) {
        if tdgpn.trim().is_empty() {
            return (Grouping::Other, None);
        }

        match bounded(self.lookup_timeout(), self.groupings.grouping(tdgpn)).await {
            Ok(name) => (Grouping::from_catalog(name.as_deref()), None),
            Err(err) => (Grouping::Other, Some(degraded(LookupSource::Grouping, tdgpn, &err))),
        }
    }

    async fn locations_for(
        &self,
        tdgpn: &str,
        region: InventoryRegion,
    ) -> (Vec<InventoryEntry>, Option<PickListWarning>) {
        if tdgpn.trim().is_empty() {
            return (Vec::new(), None);
        }

        match bounded(self.lookup_timeout(), self.inventory.locations(tdgpn, region)).await {
            Ok(entries) => (entries, None),
            Err(err) => (Vec::new(), Some(degraded(LookupSource::Inventory, tdgpn, &err))),
        }
    }
}

fn degraded(source: LookupSource, tdgpn: &str, err: &anyhow::Error) -> PickListWarning {
    log_degraded!(source.as_str(), tdgpn, err);
    PickListWarning {
        tdgpn: tdgpn.to_string(),
        source,
        message: format!("{:#}", err),
    }
}
