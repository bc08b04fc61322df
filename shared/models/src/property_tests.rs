//! Property-based tests for level-path ancestry and document round-trips.

use proptest::prelude::*;

use crate::{level_depth, parent_level, Component, ComponentType};

prop_compose! {
    fn arb_level()(segments in prop::collection::vec(1u32..20, 1..6)) -> String {
        segments.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(".")
    }
}

prop_compose! {
    fn arb_component()(
        level in arb_level(),
        is_part in any::<bool>(),
        group in prop_oneof![
            Just("MetalPart".to_string()),
            Just("PCB".to_string()),
            Just("PlasticPart".to_string()),
            Just("Hardware".to_string()),
        ],
        tdgpn in "[A-Z]{3}-[0-9]{3,6}",
        quantity in 0u32..50,
    ) -> Component {
        Component {
            level,
            component_type: if is_part { ComponentType::Part } else { ComponentType::SubAssembly },
            group,
            tdgpn,
            quantity: quantity as f64,
            ..Component::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A derived parent is always exactly one level shallower and a true prefix.
    #[test]
    fn prop_parent_level_is_true_ancestor(level in arb_level()) {
        match parent_level(&level) {
            Some(parent) => {
                prop_assert_eq!(level_depth(parent) + 1, level_depth(&level));
                let prefix = format!("{}.", parent);
                prop_assert!(level.starts_with(&prefix));
            }
            None => prop_assert_eq!(level_depth(&level), 1),
        }
    }

    /// Walking parents from any level reaches a root in exactly depth - 1 steps.
    #[test]
    fn prop_parent_chain_reaches_root(level in arb_level()) {
        let mut steps = 0;
        let mut current = level.as_str();
        while let Some(parent) = parent_level(current) {
            current = parent;
            steps += 1;
        }
        prop_assert_eq!(steps + 1, level_depth(&level));
        prop_assert!(!current.contains('.'));
    }

    /// Components survive the document representation used by the BOM store.
    #[test]
    fn prop_component_document_round_trip(component in arb_component()) {
        let json = serde_json::to_value(&component).unwrap();
        prop_assert!(json.get("TDGPN").is_some());
        prop_assert!(json.get("Level").is_some());
        let back: Component = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, component);
    }
}
