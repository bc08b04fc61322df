//! Pick-list output records and the requests that produce them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::inventory::InventoryRegion;

/// Warehouse classification of a single line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PickStatus {
    /// Vendor-managed or consumable stock; not counted against availability.
    Consumable,
    /// Nothing to pull for this order.
    NotRequired,
    /// Less on hand than the order needs.
    Short,
    Available,
}

impl PickStatus {
    pub fn classify(is_consumable: bool, quantity_needed: i64, quantity_available: f64) -> Self {
        if is_consumable {
            Self::Consumable
        } else if quantity_needed == 0 {
            Self::NotRequired
        } else if quantity_needed as f64 > quantity_available {
            Self::Short
        } else {
            Self::Available
        }
    }
}

/// One output row of a pick list, in the same position as its BOM row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickListLine {
    pub level: String,
    pub tdgpn: String,
    pub parent_tdgpn: String,
    pub description: String,
    pub vendor: Option<String>,
    pub vendor_pn: Option<String>,
    pub unit_of_measure: Option<String>,
    pub quantity_per_unit: i64,
    pub quantity_needed: i64,
    pub location: String,
    pub quantity_available: f64,
    pub is_consumable_or_vmi: bool,
    pub status: PickStatus,
}

impl PickListLine {
    pub fn is_short(&self) -> bool {
        self.status == PickStatus::Short
    }
}

/// External lookup that degraded to its safe default while building a list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    ForceMake,
    ForceBuy,
    Grouping,
    Inventory,
    ReferenceFixture,
    AssemblyPool,
}

impl LookupSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForceMake => "force_make",
            Self::ForceBuy => "force_buy",
            Self::Grouping => "grouping",
            Self::Inventory => "inventory",
            Self::ReferenceFixture => "reference_fixture",
            Self::AssemblyPool => "assembly_pool",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickListWarning {
    pub tdgpn: String,
    pub source: LookupSource,
    pub message: String,
}

/// A generated pick list for one fixture and order quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickList {
    pub fixture: String,
    pub description: Option<String>,
    pub order_quantity: i64,
    pub region: InventoryRegion,
    pub lines: Vec<PickListLine>,
    pub warnings: Vec<PickListWarning>,
    pub generated_at: DateTime<Utc>,
}

impl PickList {
    pub fn short_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_short()).count()
    }
}

/// Request for a single pick list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct PickListRequest {
    #[validate(length(min = 1, max = 100, message = "Fixture number must be between 1 and 100 characters"))]
    pub fixture: String,
    #[validate(range(min = 1, max = 100000, message = "Quantity must be between 1 and 100000"))]
    pub quantity: i64,
}

impl PickListRequest {
    pub fn new(fixture: impl Into<String>, quantity: i64) -> Self {
        Self {
            fixture: fixture.into(),
            quantity,
        }
    }
}

/// Several fixtures generated one after another with a shared region.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchPickListRequest {
    #[validate(length(min = 1, max = 50, message = "Batch must contain between 1 and 50 entries"))]
    #[validate]
    pub entries: Vec<PickListRequest>,
    #[serde(default)]
    pub intl: bool,
}
