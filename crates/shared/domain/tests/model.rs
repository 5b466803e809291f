use cfm_domain::model::{Cardinality, CfmModel, Constraint, ConstraintKind, Feature, Interval, ModelError};
use serde_json::json;

fn card(intervals: &[(u64, Option<u64>)]) -> Cardinality {
    Cardinality::new(intervals.iter().map(|&(lower, upper)| Interval::new(lower, upper)).collect())
}

fn leaf(name: &str, instance: Cardinality) -> Feature {
    Feature {
        name: name.to_owned(),
        instance_cardinality: instance,
        group_type_cardinality: card(&[(0, Some(0))]),
        group_instance_cardinality: card(&[(0, Some(0))]),
        children: Vec::new(),
    }
}

#[test]
fn bounded_interval_admits_its_closed_range() {
    let interval = Interval::new(2, Some(4));
    assert!(!interval.contains(1));
    assert!(interval.contains(2));
    assert!(interval.contains(3));
    assert!(interval.contains(4));
    assert!(!interval.contains(5));
}

#[test]
fn unbounded_interval_admits_everything_above_lower() {
    let interval = Interval::new(3, None);
    assert!(!interval.contains(2));
    assert!(interval.contains(3));
    assert!(interval.contains(1_000_000));
}

#[test]
fn cardinality_union_semantics() {
    let cardinality = card(&[(0, Some(2)), (5, None)]);
    assert!(cardinality.is_valid(0));
    assert!(cardinality.is_valid(2));
    assert!(!cardinality.is_valid(3));
    assert!(!cardinality.is_valid(4));
    assert!(cardinality.is_valid(5));
    assert!(cardinality.is_valid(1000));
}

#[test]
fn display_renders_star_for_unbounded() {
    let cardinality = card(&[(0, Some(1)), (3, None)]);
    assert_eq!(cardinality.to_string(), "0..1, 3..*");
}

#[test]
fn required_follows_first_interval_lower_bound() {
    assert!(!leaf("a", card(&[(0, Some(1))])).is_required());
    assert!(leaf("b", card(&[(1, Some(1))])).is_required());
    assert!(leaf("c", card(&[(2, None)])).is_required());
}

#[test]
fn unbound_propagates_from_deep_descendants() {
    let grandchild = leaf("grandchild", card(&[(0, None)]));
    assert!(grandchild.is_unbound());

    let mut child = leaf("child", card(&[(0, Some(1))]));
    assert!(!child.is_unbound());
    child.children.push(grandchild);

    let mut root = leaf("root", card(&[(1, Some(1))]));
    root.children.push(child);

    assert!(root.is_unbound(), "bounded root with an unbound descendant is unbound");
}

#[test]
fn unbound_ignores_group_cardinalities() {
    let mut feature = leaf("root", card(&[(1, Some(1))]));
    feature.group_type_cardinality = card(&[(1, Some(1))]);
    feature.group_instance_cardinality = card(&[(1, None)]);

    assert!(!feature.is_unbound(), "only instance cardinality decides unboundness");

    feature.instance_cardinality = card(&[(1, None)]);
    assert!(feature.is_unbound());
}

#[test]
fn flatten_visits_every_node_exactly_once() {
    // Depth 5, branching factor 3: 1 + 3 + 9 + 27 + 81 = 121 nodes.
    fn build(depth: u32, counter: &mut u32) -> Feature {
        let mut feature = leaf(&format!("f{}", *counter), card(&[(0, Some(1))]));
        *counter += 1;
        if depth > 1 {
            for _ in 0..3 {
                feature.children.push(build(depth - 1, counter));
            }
        }
        feature
    }

    let mut counter = 0;
    let model = CfmModel { root: build(5, &mut counter), constraints: Vec::new() };

    let features = model.features();
    assert_eq!(features.len(), 121);

    let mut names: Vec<_> = features.iter().map(|f| f.name.clone()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 121, "no node may be visited twice");
}

#[test]
fn roundtrip_preserves_bounded_and_unbounded_intervals() {
    let original = json!({
        "root": {
            "name": "sandwich",
            "instance_cardinality": { "intervals": [{ "lower": 1, "upper": 1 }] },
            "group_type_cardinality": { "intervals": [{ "lower": 1, "upper": 2 }] },
            "group_instance_cardinality": { "intervals": [{ "lower": 2, "upper": null }] },
            "children": [
                {
                    "name": "bread",
                    "instance_cardinality": { "intervals": [{ "lower": 2, "upper": 2 }] },
                    "group_type_cardinality": { "intervals": [{ "lower": 0, "upper": 0 }] },
                    "group_instance_cardinality": { "intervals": [{ "lower": 0, "upper": 0 }] },
                    "children": []
                }
            ]
        },
        "constraints": [
            {
                "require": true,
                "first_feature_name": "sandwich",
                "first_cardinality": { "intervals": [{ "lower": 1, "upper": 1 }] },
                "second_feature_name": "bread",
                "second_cardinality": { "intervals": [{ "lower": 2, "upper": null }] }
            }
        ]
    });

    let model: CfmModel = serde_json::from_value(original.clone()).expect("model decode");
    model.validate().expect("well-formed model");
    assert_eq!(model.root.name, "sandwich");
    assert_eq!(model.constraints[0].kind, ConstraintKind::Require);
    assert_eq!(model.root.group_instance_cardinality.intervals[0].upper, None);

    let encoded = serde_json::to_value(&model).expect("model encode");
    assert_eq!(encoded, original, "decode then encode must be the identity");
}

#[test]
fn absent_upper_bound_decodes_as_unbounded() {
    let interval: Interval = serde_json::from_value(json!({ "lower": 3 })).expect("decode");
    assert_eq!(interval, Interval::new(3, None));
}

#[test]
fn validate_rejects_inverted_interval() {
    let mut model = CfmModel { root: leaf("root", card(&[(2, Some(1))])), constraints: Vec::new() };
    assert!(matches!(model.validate(), Err(ModelError::InvertedInterval { .. })));

    model.root.instance_cardinality = card(&[(1, Some(1))]);
    model.validate().expect("fixed interval validates");
}

#[test]
fn validate_rejects_empty_cardinality() {
    let model = CfmModel { root: leaf("root", card(&[])), constraints: Vec::new() };
    assert!(matches!(model.validate(), Err(ModelError::EmptyCardinality { .. })));
}

#[test]
fn validate_rejects_duplicate_feature_names() {
    let mut root = leaf("root", card(&[(1, Some(1))]));
    root.children.push(leaf("root", card(&[(0, Some(1))])));
    let model = CfmModel { root, constraints: Vec::new() };
    assert!(matches!(model.validate(), Err(ModelError::DuplicateFeature { name }) if name == "root"));
}

#[test]
fn validate_rejects_dangling_constraint_reference() {
    let model = CfmModel {
        root: leaf("root", card(&[(1, Some(1))])),
        constraints: vec![Constraint {
            kind: ConstraintKind::Exclude,
            first_feature_name: "root".to_owned(),
            first_cardinality: card(&[(1, Some(1))]),
            second_feature_name: "ghost".to_owned(),
            second_cardinality: card(&[(1, Some(1))]),
        }],
    };
    assert!(matches!(model.validate(), Err(ModelError::UnknownFeature { name }) if name == "ghost"));
}

#[test]
fn non_integer_bounds_are_rejected_at_decode() {
    let err = serde_json::from_value::<Interval>(json!({ "lower": 1.5, "upper": 2 }));
    assert!(err.is_err(), "fractional bounds must not decode");

    let err = serde_json::from_value::<Interval>(json!({ "lower": -1, "upper": 2 }));
    assert!(err.is_err(), "negative bounds must not decode");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bounded_validity_matches_closed_range(lower in 0u64..1000, span in 0u64..1000, value in 0u64..3000) {
            let interval = Interval::new(lower, Some(lower + span));
            prop_assert_eq!(interval.contains(value), lower <= value && value <= lower + span);
        }

        #[test]
        fn unbounded_validity_matches_lower_bound(lower in 0u64..1000, value in 0u64..3000) {
            let interval = Interval::new(lower, None);
            prop_assert_eq!(interval.contains(value), value >= lower);
        }
    }
}
