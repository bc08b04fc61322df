//! Property tests for the explosion pass.

use proptest::prelude::*;
use std::time::Duration;

use picklist_models::{AssemblyRecord, Component, ComponentType};
use picklist_utils::bom::fakes::InMemoryCatalog;
use picklist_utils::{BomTree, ExplosionEngine};

prop_compose! {
    fn arb_level()(segments in prop::collection::vec(1u32..4, 1..5)) -> String {
        segments.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(".")
    }
}

prop_compose! {
    fn arb_component()(
        level in arb_level(),
        kind in 0u8..3,
        group in prop_oneof![
            Just("MetalPart"),
            Just("PCB"),
            Just("PlasticPart"),
            Just("Hardware"),
        ],
        tdgpn in prop_oneof![Just("TDG-1"), Just("TDG-2"), Just("TDG-3"), Just("TDG-4")],
        quantity in 0u32..5,
        bought in any::<bool>(),
    ) -> Component {
        let component_type = match kind {
            0 => ComponentType::Part,
            1 => ComponentType::SubAssembly,
            _ => ComponentType::Other,
        };
        Component {
            level,
            component_type,
            group: group.to_string(),
            tdgpn: tdgpn.to_string(),
            quantity: quantity as f64,
            path_name: Some(if bought { "BUY.SLDASM" } else { "MAKE.SLDASM" }.to_string()),
            ..Component::default()
        }
    }
}

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::default()
        .with_force_make("TDG-1")
        .with_force_make("TDG-3")
        .with_force_buy("TDG-2")
}

fn pool() -> Vec<AssemblyRecord> {
    vec![
        AssemblyRecord::new(r"\\vault\BUY.SLDASM", true),
        AssemblyRecord::new(r"\\vault\MAKE.SLDASM", false),
    ]
}

fn run(tree: &mut BomTree) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let catalog = catalog();
    let pool = pool();
    runtime.block_on(async {
        ExplosionEngine::new(&catalog, Duration::from_secs(1))
            .explode(tree, &pool)
            .await
    });
}

fn quantities(tree: &BomTree) -> Vec<f64> {
    tree.components().iter().map(|c| c.quantity).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A second pass over an exploded tree changes nothing.
    #[test]
    fn prop_explosion_is_idempotent(components in prop::collection::vec(arb_component(), 0..20)) {
        let mut tree = BomTree::new(components);
        run(&mut tree);
        let first = quantities(&tree);

        run(&mut tree);
        prop_assert_eq!(first, quantities(&tree));
    }

    /// Explosion only ever zeroes quantities; it never invents or changes demand.
    #[test]
    fn prop_explosion_only_zeroes(components in prop::collection::vec(arb_component(), 0..20)) {
        let before: Vec<f64> = components.iter().map(|c| c.quantity).collect();
        let mut tree = BomTree::new(components);
        run(&mut tree);

        for (old, new) in before.iter().zip(quantities(&tree)) {
            prop_assert!(new == *old || new == 0.0);
        }
    }

    /// Every recorded descendant is a strict, dot-bounded extension of its owner.
    #[test]
    fn prop_children_are_true_descendants(components in prop::collection::vec(arb_component(), 0..20)) {
        let tree = BomTree::new(components);
        for idx in 0..tree.len() {
            let owner = &tree.get(idx).level;
            for &child in tree.children(idx) {
                let level = &tree.get(child).level;
                let prefix = format!("{}.", owner);
                prop_assert!(level.starts_with(&prefix));
                prop_assert!(tree.get(child).depth() > tree.get(idx).depth());
            }
        }
    }
}
