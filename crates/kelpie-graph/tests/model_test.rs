use kelpie_graph::{
    ConditionKind, Error, NodeKind, NodePatch, Position, START_NODE_ID, WorkflowGraph,
};
use serde_json::{Map, Value};

#[test]
fn new_graph_has_single_start_node_and_no_edges() {
    let g = WorkflowGraph::new();
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 0);

    let start = g.node(START_NODE_ID).expect("start node");
    assert_eq!(start.kind, NodeKind::Start);
    assert_eq!(start.label, "Start");
    assert_eq!(start.position, Position::new(80.0, 80.0));
}

#[test]
fn generated_ids_never_collide() {
    let g = WorkflowGraph::new();
    let g = g.with_node(NodeKind::QueueScan, None, None).unwrap();
    let g = g.with_node(NodeKind::Spider, None, None).unwrap();
    let g = g.with_node(NodeKind::Webhook, None, None).unwrap();

    let mut ids: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![START_NODE_ID, "node_1", "node_2", "node_3"]);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), g.node_count());
}

#[test]
fn generated_ids_skip_taken_names() {
    let g = WorkflowGraph::new()
        .with_node(NodeKind::Normalize, None, Some("node_1"))
        .unwrap();
    let g = g.with_node(NodeKind::Dedupe, None, None).unwrap();
    assert!(g.has_node("node_2"));
}

#[test]
fn explicit_duplicate_id_is_rejected() {
    let g = WorkflowGraph::new();
    let err = g
        .with_node(NodeKind::Condition, None, Some(START_NODE_ID))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateNodeId { id } if id == START_NODE_ID));
    // The original snapshot is untouched.
    assert_eq!(g.node_count(), 1);
}

#[test]
fn blank_label_falls_back_to_kind_name() {
    let g = WorkflowGraph::new()
        .with_node(NodeKind::QueueScan, Some("   "), Some("q"))
        .unwrap();
    assert_eq!(g.node("q").unwrap().label, "queue_scan");

    let g = g
        .with_node(NodeKind::Webhook, Some(" notify "), Some("w"))
        .unwrap();
    assert_eq!(g.node("w").unwrap().label, "notify");
}

#[test]
fn remove_node_cascades_incident_edges() {
    let g = WorkflowGraph::new()
        .with_node(NodeKind::Spider, None, Some("a"))
        .unwrap()
        .with_node(NodeKind::Dedupe, None, Some("b"))
        .unwrap()
        .with_edge(START_NODE_ID, "a", "always")
        .with_edge("a", "b", "always")
        .with_edge("b", START_NODE_ID, "always");

    let g = g.with_node_removed("a");
    assert!(!g.has_node("a"));
    assert_eq!(g.edge_count(), 1);
    assert!(
        g.edges()
            .iter()
            .all(|e| e.from != "a" && e.to != "a")
    );
}

#[test]
fn remove_edge_out_of_range_is_a_no_op() {
    let g = WorkflowGraph::new().with_edge(START_NODE_ID, "x", "always");
    let g2 = g.with_edge_removed(5);
    assert_eq!(g, g2);

    let g3 = g.with_edge_removed(0);
    assert_eq!(g3.edge_count(), 0);
}

#[test]
fn patch_merges_shallowly_and_ignores_unknown_ids() {
    let mut config = Map::new();
    config.insert("url".to_string(), Value::String("https://x".to_string()));

    let g = WorkflowGraph::new()
        .with_node(NodeKind::Webhook, None, Some("w"))
        .unwrap()
        .with_node_patched(
            "w",
            NodePatch {
                config: Some(config.clone()),
                ..Default::default()
            },
        );
    assert_eq!(g.node("w").unwrap().config, config);

    // Patching the label alone leaves the config in place.
    let g = g.with_node_patched(
        "w",
        NodePatch {
            label: Some("notify".to_string()),
            ..Default::default()
        },
    );
    let w = g.node("w").unwrap();
    assert_eq!(w.label, "notify");
    assert_eq!(w.config, config);

    let g2 = g.with_node_patched(
        "ghost",
        NodePatch {
            label: Some("nope".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(g, g2);
}

#[test]
fn bulk_position_update_ignores_unknown_ids() {
    let g = WorkflowGraph::new().with_positions([
        (START_NODE_ID, Position::new(10.0, 20.0)),
        ("ghost", Position::new(1.0, 1.0)),
    ]);
    assert_eq!(g.node(START_NODE_ID).unwrap().position, Position::new(10.0, 20.0));
    assert_eq!(g.node_count(), 1);
}

#[test]
fn mutations_return_new_snapshots() {
    let g1 = WorkflowGraph::new();
    let g2 = g1.with_edge(START_NODE_ID, "x", "always");
    assert_eq!(g1.edge_count(), 0);
    assert_eq!(g2.edge_count(), 1);
}

#[test]
fn node_kind_round_trips_through_strings() {
    for kind in NodeKind::ALL {
        assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
    }
    assert!(matches!(
        "teleport".parse::<NodeKind>(),
        Err(Error::UnknownNodeKind { .. })
    ));
}

#[test]
fn condition_prefixes_are_recognized() {
    assert_eq!(ConditionKind::classify("always"), ConditionKind::Always);
    assert_eq!(ConditionKind::classify("true"), ConditionKind::BoolLiteral);
    assert_eq!(ConditionKind::classify("false"), ConditionKind::BoolLiteral);
    assert_eq!(
        ConditionKind::classify("equals:domain=example.com"),
        ConditionKind::Equals
    );
    assert_eq!(ConditionKind::classify("contains:sinkhole"), ConditionKind::Contains);
    assert_eq!(ConditionKind::classify("regex:^mal.*"), ConditionKind::Regex);
    assert_eq!(ConditionKind::classify("gte:score=5"), ConditionKind::Gte);
    assert_eq!(ConditionKind::classify("lte:age=30"), ConditionKind::Lte);
    assert_eq!(ConditionKind::classify("whenever"), ConditionKind::Custom);
}
