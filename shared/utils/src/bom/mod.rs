//! BOM explosion and pick-list aggregation.
//!
//! [`tree`] indexes a fixture's flat component list, [`explosion`] applies the
//! make/buy rules in place, [`reconcile`] derives per-unit and needed
//! quantities, [`inventory`] folds warehouse locations, and [`generator`]
//! runs the whole pipeline against the collaborators in [`lookups`].

pub mod explosion;
pub mod fakes;
pub mod generator;
pub mod inventory;
pub mod lookups;
pub mod reconcile;
pub mod tree;

pub use explosion::{resolve_buy, ExplosionEngine};
pub use generator::{BatchEntryOutcome, PickListGenerator};
pub use inventory::{is_consumable, summarize_locations};
pub use lookups::{bounded, BomSource, GroupingCatalog, InventoryService, MakeBuyCatalog};
pub use reconcile::{Grouping, LineQuantities, ReferenceSnapshot};
pub use tree::BomTree;
