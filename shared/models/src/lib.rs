//! # Pick-List Domain Models
//!
//! Core records shared by the BOM repositories, the explosion engine and the
//! HTTP surface.
//!
//! ## Key Models
//!
//! - **Component**: one BOM row, positioned in the tree by its dotted `Level`
//! - **Fixture**: a named BOM root with ordered components
//! - **AssemblyRecord**: fixture/sub-assembly pool entry carrying the `Buy` flag
//! - **InventoryEntry**: a ranked warehouse location for a part number
//! - **PickListLine** / **PickList**: engine output handed to renderers
//!
//! Field names follow the stored BOM documents (`PascalCase`, `TDGPN`), so the
//! models deserialize directly from MongoDB and from the inventory service.

pub mod component;
pub mod fixture;
pub mod inventory;
pub mod picklist;

#[cfg(test)]
pub mod property_tests;

pub use component::*;
pub use fixture::*;
pub use inventory::*;
pub use picklist::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_lookup_by_level() {
        let fixture = Fixture::new(
            "FX-100",
            vec![
                Component::part("1", "TDG-1", groups::METAL_PART, 1.0),
                Component::part("1.1", "TDG-2", "Hardware", 4.0),
            ],
        );

        let child = fixture.component_at("1.1").unwrap();
        let parent = parent_level(&child.level).and_then(|p| fixture.component_at(p));
        assert_eq!(parent.map(|p| p.tdgpn.as_str()), Some("TDG-1"));
        assert!(fixture.component_at("2").is_none());
    }

    #[test]
    fn test_region_from_flag() {
        assert_eq!(InventoryRegion::from_intl_flag(true), InventoryRegion::International);
        assert_eq!(InventoryRegion::from_intl_flag(false), InventoryRegion::Domestic);
    }

    #[test]
    fn test_pick_list_short_count() {
        let line = |status| PickListLine {
            level: "1".to_string(),
            tdgpn: "TDG-1".to_string(),
            parent_tdgpn: String::new(),
            description: String::new(),
            vendor: None,
            vendor_pn: None,
            unit_of_measure: None,
            quantity_per_unit: 1,
            quantity_needed: 1,
            location: String::new(),
            quantity_available: 0.0,
            is_consumable_or_vmi: false,
            status,
        };

        let list = PickList {
            fixture: "FX-100".to_string(),
            description: None,
            order_quantity: 1,
            region: InventoryRegion::Domestic,
            lines: vec![line(PickStatus::Short), line(PickStatus::Available), line(PickStatus::Short)],
            warnings: Vec::new(),
            generated_at: chrono::Utc::now(),
        };
        assert_eq!(list.short_count(), 2);
    }
}
