use kelpie_graph::{Error, NodeKind, PersistedGraph, Position, WorkflowGraph};
use serde_json::Value;

#[test]
fn load_tolerates_missing_positions_and_edges() {
    let json = r#"{
        "nodes": [
            {"id": "start", "type": "start", "label": "Start", "config": {}},
            {"id": "a", "type": "spider", "label": "", "config": {}},
            {"id": "b", "type": "dedupe", "config": {}},
            {"id": "c", "type": "webhook", "config": {}},
            {"id": "d", "type": "save_iocs", "config": {}}
        ]
    }"#;
    let g = WorkflowGraph::from_persisted(PersistedGraph::from_json(json).unwrap());

    assert_eq!(g.edge_count(), 0);
    // Position-less nodes are spread on a 4-column grid by load index.
    assert_eq!(g.node("start").unwrap().position, Position::new(80.0, 80.0));
    assert_eq!(g.node("a").unwrap().position, Position::new(280.0, 80.0));
    assert_eq!(g.node("b").unwrap().position, Position::new(480.0, 80.0));
    assert_eq!(g.node("c").unwrap().position, Position::new(680.0, 80.0));
    assert_eq!(g.node("d").unwrap().position, Position::new(80.0, 220.0));
    // Blank labels fall back to the kind's wire name.
    assert_eq!(g.node("a").unwrap().label, "spider");
    assert_eq!(g.node("b").unwrap().label, "dedupe");
}

#[test]
fn load_keeps_explicit_positions() {
    let json = r#"{
        "nodes": [{"id": "start", "type": "start", "label": "Start", "config": {}, "x": 12.5, "y": 640}],
        "edges": []
    }"#;
    let g = WorkflowGraph::from_persisted(PersistedGraph::from_json(json).unwrap());
    assert_eq!(g.node("start").unwrap().position, Position::new(12.5, 640.0));
}

#[test]
fn missing_edge_condition_defaults_to_always() {
    let json = r#"{
        "nodes": [
            {"id": "start", "type": "start", "config": {}},
            {"id": "a", "type": "normalize", "config": {}}
        ],
        "edges": [{"from": "start", "to": "a"}]
    }"#;
    let g = WorkflowGraph::from_persisted(PersistedGraph::from_json(json).unwrap());
    assert_eq!(g.edges()[0].condition, "always");
}

#[test]
fn unknown_node_type_is_a_load_error() {
    let json = r#"{"nodes": [{"id": "x", "type": "teleport", "config": {}}], "edges": []}"#;
    assert!(matches!(
        PersistedGraph::from_json(json),
        Err(Error::MalformedGraphJson { .. })
    ));
}

#[test]
fn saved_shape_has_exactly_the_wire_fields() {
    let g = WorkflowGraph::new()
        .with_node(NodeKind::QueueScan, Some("Scan"), Some("scan"))
        .unwrap()
        .with_edge("start", "scan", "contains:example.com");

    let json = g.to_persisted().to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    let node = value["nodes"][1].as_object().unwrap();
    let mut node_keys: Vec<&str> = node.keys().map(String::as_str).collect();
    node_keys.sort_unstable();
    assert_eq!(node_keys, vec!["config", "id", "label", "type", "x", "y"]);
    assert_eq!(node["type"], "queue_scan");
    assert!(node["x"].is_number());
    assert!(node["y"].is_number());

    let edge = value["edges"][0].as_object().unwrap();
    let mut edge_keys: Vec<&str> = edge.keys().map(String::as_str).collect();
    edge_keys.sort_unstable();
    assert_eq!(edge_keys, vec!["condition", "from", "to"]);
}

#[test]
fn persisted_round_trip_preserves_the_graph() {
    let g = WorkflowGraph::new()
        .with_node(NodeKind::FilterRegex, Some("only apex"), Some("f"))
        .unwrap()
        .with_edge("start", "f", "regex:^[^.]+\\.[^.]+$")
        .with_positions([("f", Position::new(300.0, 220.0))]);

    let restored = WorkflowGraph::from_persisted(g.to_persisted());
    assert_eq!(g, restored);
}

#[test]
fn empty_document_loads_as_empty_graph() {
    let g = WorkflowGraph::from_persisted(PersistedGraph::from_json("{}").unwrap());
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.edge_count(), 0);
}
