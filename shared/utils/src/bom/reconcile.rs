//! Per-unit and order-quantity derivation for exploded rows.

use std::collections::HashMap;

use picklist_models::{Component, Fixture};

/// Master-list grouping that changes how a line is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Die,
    Label,
    Other,
}

impl Grouping {
    pub fn from_catalog(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if n.eq_ignore_ascii_case("Die") => Self::Die,
            Some(n) if n.eq_ignore_ascii_case("Label") => Self::Label,
            _ => Self::Other,
        }
    }
}

/// Quantities read from the stored reference fixture, keyed by `Level`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    quantities: HashMap<String, f64>,
}

impl ReferenceSnapshot {
    pub fn from_fixture(fixture: Option<&Fixture>) -> Self {
        let quantities = fixture
            .map(|f| {
                f.components
                    .iter()
                    .map(|c| (c.level.clone(), c.quantity))
                    .collect()
            })
            .unwrap_or_default();

        Self { quantities }
    }

    pub fn quantity_at(&self, level: &str) -> Option<f64> {
        self.quantities.get(level).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineQuantities {
    pub per_unit: i64,
    pub needed: i64,
}

/// Nearest integer, halves away from zero.
pub fn round_quantity(quantity: f64) -> i64 {
    if quantity.is_finite() {
        quantity.round() as i64
    } else {
        0
    }
}

/// Per-unit quantity for one exploded row.
///
/// A row that explosion suppressed stays at zero, as does an explodable row
/// left at zero. Anything else takes the reference quantity at the same level
/// and falls back to the live value.
pub fn per_unit_quantity(component: &Component, suppressed: bool, reference: &ReferenceSnapshot) -> i64 {
    if suppressed || (component.is_explodable() && component.quantity == 0.0) {
        return 0;
    }

    let quantity = reference
        .quantity_at(&component.level)
        .unwrap_or(component.quantity);

    round_quantity(quantity)
}

pub fn is_label(component: &Component, grouping: Grouping) -> bool {
    grouping == Grouping::Label || component.tdgpn.to_uppercase().contains("LABEL")
}

pub fn is_wire(component: &Component) -> bool {
    component.description_text().to_uppercase().contains("WIRE")
}

/// Applies the order quantity and the category overrides to a per-unit value.
pub fn reconcile_quantities(
    component: &Component,
    per_unit: i64,
    order_quantity: i64,
    is_consumable: bool,
    grouping: Grouping,
) -> LineQuantities {
    if grouping == Grouping::Die {
        return LineQuantities {
            per_unit: 0,
            needed: 0,
        };
    }

    let needed = if is_consumable {
        per_unit
    } else if is_label(component, grouping) || is_wire(component) {
        0
    } else {
        per_unit.saturating_mul(order_quantity)
    };

    LineQuantities { per_unit, needed }
}

/// Prefixes a description with the parent it is fitted into.
pub fn describe_with_parent(parent_tdgpn: &str, description: &str) -> String {
    if parent_tdgpn.is_empty() {
        description.to_string()
    } else if description.is_empty() {
        format!("GOES INTO {}", parent_tdgpn)
    } else {
        format!("GOES INTO {}\n{}", parent_tdgpn, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_models::groups;

    fn snapshot(rows: &[(&str, f64)]) -> ReferenceSnapshot {
        let components = rows
            .iter()
            .map(|(level, qty)| Component::part(level, "REF", "Hardware", *qty))
            .collect();
        ReferenceSnapshot::from_fixture(Some(&Fixture::new("FX", components)))
    }

    #[test]
    fn test_round_quantity_ties_away_from_zero() {
        assert_eq!(round_quantity(2.5), 3);
        assert_eq!(round_quantity(2.49), 2);
        assert_eq!(round_quantity(-1.5), -2);
        assert_eq!(round_quantity(f64::NAN), 0);
    }

    #[test]
    fn test_per_unit_prefers_reference() {
        let reference = snapshot(&[("1.1", 3.4)]);
        let live = Component::part("1.1", "A", "Hardware", 9.0);

        assert_eq!(per_unit_quantity(&live, false, &reference), 3);
    }

    #[test]
    fn test_per_unit_falls_back_to_live() {
        let reference = snapshot(&[("1", 1.0)]);
        let live = Component::part("1.2", "A", "Hardware", 1.6);

        assert_eq!(per_unit_quantity(&live, false, &reference), 2);
        assert_eq!(per_unit_quantity(&live, false, &ReferenceSnapshot::default()), 2);
    }

    #[test]
    fn test_exploded_zero_is_final() {
        let reference = snapshot(&[("1", 4.0)]);
        let zeroed = Component::part("1", "A", "Other", 0.0);
        assert_eq!(per_unit_quantity(&zeroed, false, &reference), 0);

        // PCB sub-assemblies are never exploded themselves, so a stored zero
        // is not a decision unless a parent suppressed the row.
        let pcb = Component::sub_assembly("1", "PCB-1", groups::PCB, 0.0);
        assert_eq!(per_unit_quantity(&pcb, false, &reference), 4);
    }

    #[test]
    fn test_suppressed_child_keeps_zero_over_reference() {
        let reference = snapshot(&[("1.1", 2.0), ("1.2", 3.0)]);

        let pcb = Component::sub_assembly("1.1", "PCB-1", groups::PCB, 0.0);
        assert_eq!(per_unit_quantity(&pcb, true, &reference), 0);

        let untyped = Component {
            level: "1.2".to_string(),
            tdgpn: "DOC-1".to_string(),
            ..Component::default()
        };
        assert_eq!(per_unit_quantity(&untyped, true, &reference), 0);
        assert_eq!(per_unit_quantity(&untyped, false, &reference), 3);
    }

    #[test]
    fn test_order_quantity_scales_need() {
        let part = Component::part("1", "BOLT", "Hardware", 2.0);
        let q = reconcile_quantities(&part, 2, 100, false, Grouping::Other);
        assert_eq!(q, LineQuantities { per_unit: 2, needed: 200 });
    }

    #[test]
    fn test_consumable_ignores_order_quantity() {
        let part = Component::part("1", "GLUE", "Hardware", 1.0);
        let q = reconcile_quantities(&part, 1, 50, true, Grouping::Other);
        assert_eq!(q.needed, 1);
    }

    #[test]
    fn test_consumable_wins_over_label() {
        let part = Component::part("1", "LABEL-9", "Hardware", 1.0);
        let q = reconcile_quantities(&part, 2, 50, true, Grouping::Label);
        assert_eq!(q.needed, 2);
    }

    #[test]
    fn test_label_and_wire_need_nothing() {
        let label = Component::part("1", "tdg-label-4", "Hardware", 1.0);
        assert_eq!(reconcile_quantities(&label, 1, 10, false, Grouping::Other).needed, 0);

        let grouped = Component::part("1", "STICKER", "Hardware", 1.0);
        assert_eq!(reconcile_quantities(&grouped, 1, 10, false, Grouping::Label).needed, 0);

        let wire = Component::part("1", "W-18", "Hardware", 6.0).with_description("18 AWG Wire, red");
        let q = reconcile_quantities(&wire, 6, 10, false, Grouping::Other);
        assert_eq!(q, LineQuantities { per_unit: 6, needed: 0 });
    }

    #[test]
    fn test_die_overrides_everything() {
        let die = Component::part("1", "DIE-2", "Tooling", 3.0);
        for consumable in [true, false] {
            let q = reconcile_quantities(&die, 3, 1000, consumable, Grouping::Die);
            assert_eq!(q, LineQuantities { per_unit: 0, needed: 0 });
        }
    }

    #[test]
    fn test_grouping_from_catalog() {
        assert_eq!(Grouping::from_catalog(Some("Die")), Grouping::Die);
        assert_eq!(Grouping::from_catalog(Some("label ")), Grouping::Label);
        assert_eq!(Grouping::from_catalog(Some("Fastener")), Grouping::Other);
        assert_eq!(Grouping::from_catalog(None), Grouping::Other);
    }

    #[test]
    fn test_describe_with_parent() {
        assert_eq!(describe_with_parent("", "Bolt"), "Bolt");
        assert_eq!(describe_with_parent("ASSY-1", "Bolt"), "GOES INTO ASSY-1\nBolt");
        assert_eq!(describe_with_parent("ASSY-1", ""), "GOES INTO ASSY-1");
    }
}
