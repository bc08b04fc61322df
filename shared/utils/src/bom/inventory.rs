//! Folds a part's ranked inventory locations into one display tuple.

use picklist_models::{ConsumableType, InventoryEntry, InventorySummary};

/// Only the first two ranked locations are ever shown.
pub const MAX_LOCATIONS: usize = 2;

pub fn summarize_locations(entries: &[InventoryEntry]) -> InventorySummary {
    let mut summary = InventorySummary::default();

    for entry in entries.iter().take(MAX_LOCATIONS) {
        let location = entry.location_text();

        // An entry leads while nothing has been rendered yet, so a blank first
        // location lets the second entry take the leading slot.
        if summary.location.is_empty() {
            match entry.kind() {
                tag @ (ConsumableType::Consumable | ConsumableType::InHouse) => {
                    summary.location = format!("{}\n{}", tag.as_str(), location);
                    summary.is_consumable_or_vmi = true;
                }
                ConsumableType::Vmi => {
                    summary.location.push_str(location);
                    summary.is_consumable_or_vmi = true;
                }
                ConsumableType::Stock => {
                    summary.quantity_available += entry.quantity;
                    summary.location = stock_label(location, entry.quantity);
                }
            }
        } else if !location.is_empty() {
            summary.quantity_available += entry.quantity;
            summary.location.push('\n');
            match entry.kind() {
                ConsumableType::Vmi => summary.location.push_str(location),
                _ => summary.location.push_str(&stock_label(location, entry.quantity)),
            }
        }
    }

    summary
}

fn stock_label(location: &str, quantity: f64) -> String {
    format!("{} ({})", location, quantity.floor() as i64)
}

/// Consumable or vendor-managed, by flag or by what the location says.
pub fn is_consumable(summary: &InventorySummary) -> bool {
    if summary.is_consumable_or_vmi {
        return true;
    }

    let location = summary.location.to_uppercase();
    location.contains("CONSUMABLE") || location.contains("VMI")
}
