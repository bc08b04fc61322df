//! BOM explosion: decides, row by row, whether a node or its descendants carry
//! the real procurement demand, zeroing the other side in place.
//!
//! Rows are visited from the end of the list to the start. Deeper rows come
//! later in a BOM listing, so their decisions are final before any ancestor
//! reads its children's quantities. The pass is sequential because each
//! decision depends on mutations made earlier in the same pass.

use std::time::Duration;
use tracing::debug;

use picklist_models::{
    file_name, groups, AssemblyRecord, Component, ComponentType, LookupSource, PickListWarning,
};

use super::lookups::{bounded, MakeBuyCatalog};
use super::tree::BomTree;
use crate::log_degraded;

pub struct ExplosionEngine<'a> {
    catalog: &'a dyn MakeBuyCatalog,
    lookup_timeout: Duration,
    warnings: Vec<PickListWarning>,
}

impl<'a> ExplosionEngine<'a> {
    pub fn new(catalog: &'a dyn MakeBuyCatalog, lookup_timeout: Duration) -> Self {
        Self {
            catalog,
            lookup_timeout,
            warnings: Vec::new(),
        }
    }

    /// Explodes `tree` in place and returns the lookups that degraded.
    pub async fn explode(mut self, tree: &mut BomTree, pool: &[AssemblyRecord]) -> Vec<PickListWarning> {
        for idx in (0..tree.len()).rev() {
            let component = tree.get(idx).clone();

            match component.component_type {
                ComponentType::Part => self.explode_part(tree, idx, &component).await,
                ComponentType::SubAssembly if component.group != groups::PCB => {
                    self.explode_sub_assembly(tree, idx, &component, pool).await
                }
                _ => {}
            }
        }

        self.warnings
    }

    async fn explode_part(&mut self, tree: &mut BomTree, idx: usize, part: &Component) {
        if part.quantity == 0.0 || !has_family(tree, idx) {
            return;
        }

        match part.group.as_str() {
            groups::METAL_PART | groups::PCB => {
                if !self.force_make(&part.tdgpn).await {
                    debug!(level = %part.level, tdgpn = %part.tdgpn, "part bought whole, zeroing children");
                    zero_children(tree, idx, None);
                } else if tree.any_child_nonzero(idx) {
                    debug!(level = %part.level, tdgpn = %part.tdgpn, "force-make part, children carry demand");
                    tree.suppress(idx);
                }
            }
            groups::PLASTIC_PART => {
                if self.force_buy(&part.tdgpn).await {
                    debug!(level = %part.level, tdgpn = %part.tdgpn, "force-buy plastic part, zeroing children");
                    zero_children(tree, idx, None);
                } else if tree.any_child_nonzero(idx) {
                    tree.suppress(idx);
                }
            }
            _ => {
                if tree.any_child_nonzero(idx) {
                    tree.suppress(idx);
                }
            }
        }
    }

    async fn explode_sub_assembly(
        &mut self,
        tree: &mut BomTree,
        idx: usize,
        assembly: &Component,
        pool: &[AssemblyRecord],
    ) {
        let buy = resolve_buy(assembly.path_name.as_deref(), pool);

        if buy {
            if has_family(tree, idx) {
                debug!(level = %assembly.level, tdgpn = %assembly.tdgpn, "bought sub-assembly, zeroing descendants");
                zero_children(tree, idx, Some(&assembly.level));
            }
            return;
        }

        // Force-make here zeroes the node itself: a made, non-bought assembly
        // is never pulled as a unit. This is the opposite polarity of the
        // MetalPart/PCB branch and is kept as the purchasing rule states it.
        if self.force_make(&assembly.tdgpn).await || tree.any_child_nonzero(idx) {
            tree.suppress(idx);
        }
    }

    async fn force_make(&mut self, tdgpn: &str) -> bool {
        if tdgpn.trim().is_empty() {
            return false;
        }

        match bounded(self.lookup_timeout, self.catalog.is_force_make(tdgpn)).await {
            Ok(flag) => flag,
            Err(err) => {
                self.degrade(LookupSource::ForceMake, tdgpn, &err);
                false
            }
        }
    }

    async fn force_buy(&mut self, tdgpn: &str) -> bool {
        if tdgpn.trim().is_empty() {
            return false;
        }

        match bounded(self.lookup_timeout, self.catalog.is_force_buy(tdgpn)).await {
            Ok(flag) => flag,
            Err(err) => {
                self.degrade(LookupSource::ForceBuy, tdgpn, &err);
                false
            }
        }
    }

    fn degrade(&mut self, source: LookupSource, tdgpn: &str, err: &anyhow::Error) {
        log_degraded!(source.as_str(), tdgpn, err);
        self.warnings.push(PickListWarning {
            tdgpn: tdgpn.to_string(),
            source,
            message: format!("{:#}", err),
        });
    }
}

/// Gate shared by both node kinds: at least two related rows and at least one
/// strict child.
fn has_family(tree: &BomTree, idx: usize) -> bool {
    !tree.children(idx).is_empty() && tree.family_size(idx) > 1
}

fn zero_children(tree: &mut BomTree, idx: usize, except_level: Option<&str>) {
    let children = tree.children(idx).to_vec();
    for child in children {
        if except_level.map_or(true, |level| tree.get(child).level != level) {
            tree.suppress(child);
        }
    }
}

/// True when the first pool record whose design file name matches `path_name`
/// (case-insensitively) is flagged `Buy`.
pub fn resolve_buy(path_name: Option<&str>, pool: &[AssemblyRecord]) -> bool {
    let Some(target) = path_name.filter(|p| !p.is_empty()) else {
        return false;
    };
    let target = file_name(target).to_lowercase();

    pool.iter()
        .find(|record| record.file_key().as_deref() == Some(target.as_str()))
        .map_or(false, |record| record.buy)
}
