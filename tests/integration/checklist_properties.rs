use proptest::prelude::*;
use syllabus::checklist::{collect_leaf_keys, ChecklistAction, ChecklistState};
use syllabus::document::normalize;
use syllabus::types::{Node, NodeId, NodeKey, Subject};

/// Trees up to depth 3 with sibling ids 0..n, so ids are locally unique.
fn arb_node(id: i64, depth: u32) -> BoxedStrategy<Node> {
    if depth == 0 {
        return Just(Node::leaf(id, "leaf")).boxed();
    }
    (0usize..4)
        .prop_flat_map(move |width| {
            let children: Vec<_> = (0..width as i64).map(|i| arb_node(i, depth - 1)).collect();
            children
        })
        .prop_map(move |children| Node::branch(id, "node", children))
        .boxed()
}

fn subject_with(topic: Node) -> Subject {
    Subject {
        id: 1.into(),
        name: "s".to_string(),
        topics: vec![topic],
        resources: Vec::new(),
    }
}

proptest! {
    #[test]
    fn set_all_then_fully_checked(topic in arb_node(0, 3), value in any::<bool>()) {
        let subject = subject_with(topic.clone());
        let mut state = ChecklistState::new();
        state.set_all_descendants(&subject.id, &[], &topic, value);
        prop_assert_eq!(state.is_fully_checked(&subject.id, &[], &topic), value);
        let once = state.clone();
        state.set_all_descendants(&subject.id, &[], &topic, value);
        prop_assert_eq!(state, once);
    }

    #[test]
    fn toggle_leaf_is_an_involution(topic in arb_node(0, 3), pick in any::<prop::sample::Index>()) {
        let subject = subject_with(topic.clone());
        let keys = collect_leaf_keys(&subject.id, &[], &topic);
        let key = &keys[pick.index(keys.len())];
        let (_, path) = NodeKey::parse(key.as_str()).unwrap();

        let state = ChecklistState::new();
        let action = ChecklistAction::ToggleLeaf { path };
        let twice = state
            .reduce(&subject, &action)
            .and_then(|s| s.reduce(&subject, &action))
            .unwrap();
        prop_assert_eq!(twice.is_checked(key), state.is_checked(key));
    }

    #[test]
    fn fully_checked_iff_every_leaf_checked(
        topic in arb_node(0, 3),
        bits in prop::collection::vec(any::<bool>(), 64),
    ) {
        let subject = subject_with(topic.clone());
        let keys = collect_leaf_keys(&subject.id, &[], &topic);
        let mut state = ChecklistState::new();
        for (key, bit) in keys.iter().zip(bits.iter()) {
            if *bit {
                let (_, path) = NodeKey::parse(key.as_str()).unwrap();
                state = state.reduce(&subject, &ChecklistAction::ToggleLeaf { path }).unwrap();
            }
        }
        let expected = keys.iter().all(|k| state.is_checked(k));
        prop_assert_eq!(state.is_fully_checked(&subject.id, &[], &topic), expected);
    }

    #[test]
    fn collect_leaf_keys_is_deterministic(topic in arb_node(0, 3)) {
        let first = collect_leaf_keys(&1.into(), &[], &topic);
        let second = collect_leaf_keys(&1.into(), &[], &topic);
        prop_assert_eq!(first.len(), topic.leaf_count());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn node_keys_are_injective_for_integer_ids(
        a in (any::<i64>(), prop::collection::vec(any::<i64>(), 1..5)),
        b in (any::<i64>(), prop::collection::vec(any::<i64>(), 1..5)),
    ) {
        let to_ids = |v: &Vec<i64>| v.iter().map(|n| NodeId::from(*n)).collect::<Vec<_>>();
        let key_a = NodeKey::new(&a.0.into(), &to_ids(&a.1));
        let key_b = NodeKey::new(&b.0.into(), &to_ids(&b.1));
        prop_assert_eq!(key_a == key_b, a == b);
    }
}

#[test]
fn scenario_topic_with_two_leaves() {
    let raw = serde_json::json!([{
        "id": 1,
        "name": "Subject",
        "topics": [{
            "id": 2,
            "name": "Topic",
            "subtopics": [{ "id": 3, "name": "a" }, { "id": 4, "name": "b" }]
        }]
    }]);
    let forest = normalize(&raw);
    let subject = &forest.subjects[0];
    let topic = &subject.topics[0];

    let mut state = ChecklistState::new();
    assert!(!state.is_fully_checked(&subject.id, &[], topic));

    state
        .apply(subject, &ChecklistAction::SetAllDescendants { path: vec![2.into()], value: true })
        .unwrap();
    let keys: Vec<_> = state
        .checked_leaves()
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), *v))
        .collect();
    assert_eq!(
        keys,
        vec![("1:2:3".to_string(), true), ("1:2:4".to_string(), true)]
    );
    assert!(state.is_fully_checked(&subject.id, &[], topic));

    state
        .apply(subject, &ChecklistAction::ToggleLeaf { path: vec![2.into(), 3.into()] })
        .unwrap();
    assert!(!state.is_fully_checked(&subject.id, &[], topic));
    assert!(state.is_checked(&NodeKey::from("1:2:4")));
}
