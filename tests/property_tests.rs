//! Property-based tests for the classification engine
//!
//! Covers the invariants the heuristic and classifier must hold for
//! arbitrary inputs: order-independence of the acceptance rule, the
//! fixed substring-rule priority, and registration idempotence.

use proptest::prelude::*;
use recuento::classify::{classify_callee, ApiKind};
use recuento::facts::FieldDeclFact;
use recuento::heuristic::accepts;
use recuento::ops::Operation;
use recuento::registry::CandidateRegistry;

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (-5i64..6).prop_map(Operation::Set),
        (-5i64..6).prop_map(Operation::Delta),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_accepts_is_order_independent(
        ops in prop::collection::vec(arb_operation(), 0..12),
    ) {
        // Property: reversing (or any reordering of) the history never
        // changes the verdict
        let mut reversed = ops.clone();
        reversed.reverse();
        prop_assert_eq!(accepts(&ops), accepts(&reversed));

        let mut rotated = ops.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(1);
        }
        prop_assert_eq!(accepts(&ops), accepts(&rotated));
    }

    #[test]
    fn prop_accepts_never_panics(
        ops in prop::collection::vec(arb_operation(), 0..32),
    ) {
        let _ = accepts(&ops);
    }

    #[test]
    fn prop_canonical_triple_always_accepts(
        extra in prop::collection::vec((1i64..5).prop_map(Operation::Delta), 0..6),
    ) {
        // Property: Set(1) + unit deltas both ways accept no matter what
        // additional positive deltas are present
        let mut ops = vec![Operation::Set(1), Operation::Delta(1), Operation::Delta(-1)];
        ops.extend(extra);
        prop_assert!(accepts(&ops));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_classify_never_panics(name in "[a-z0-9_]{0,40}") {
        let _ = classify_callee(&name);
    }

    #[test]
    fn prop_init_always_wins(prefix in "[a-z_]{0,10}", suffix in "[a-z_]{0,10}") {
        // Property: any name containing "init" classifies as Init, no
        // matter what other rule substrings surround it
        let name = format!("{}init{}", prefix, suffix);
        let (kind, _) = classify_callee(&name).unwrap();
        prop_assert_eq!(kind, ApiKind::Init);
    }

    #[test]
    fn prop_add_unless_never_classifies_as_plain_add(prefix in "[a-z0-9]{0,8}") {
        // Property: names carrying "add_unless" reach the AddUnless rule
        // unless an earlier rule (init/get/inc/put/dec/set) also matches
        let name = format!("{}_add_unless", prefix);
        let (kind, _) = classify_callee(&name).unwrap();
        prop_assert_ne!(kind, ApiKind::Add);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_registration_is_idempotent(
        file in "[a-z/]{1,20}\\.h",
        line in 1u32..10_000,
        names in prop::collection::vec("[a-z_]{1,12}", 1..5),
    ) {
        // Property: any number of declarations at one location yields
        // exactly one candidate, keeping the first-seen name
        let mut registry = CandidateRegistry::new();
        for name in &names {
            let _ = registry.register(&FieldDeclFact {
                file: file.clone(),
                line,
                name: name.clone(),
                type_name: "atomic_t".to_string(),
                enclosing_types: vec![],
            });
        }
        prop_assert_eq!(registry.len(), 1);
        let field = registry.iter().next().unwrap();
        prop_assert_eq!(&field.name, &names[0]);
    }
}
