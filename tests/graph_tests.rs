use routegraph::{Edge, Graph, Node, RouteGraphError, audit_graph};
use serde_json::json;

fn diamond() -> Graph {
    let mut graph = Graph::new();
    graph.connect("A", "B", 1.0).expect("edge");
    graph.connect("B", "D", 1.0).expect("edge");
    graph.connect("A", "C", 5.0).expect("edge");
    graph.connect("C", "D", 1.0).expect("edge");
    graph
}

#[test]
fn test_add_node_rejects_empty_id() {
    let mut graph = Graph::new();
    let err = graph.add_node(Node::new("  ")).unwrap_err();
    assert!(matches!(err, RouteGraphError::InvalidInput(_)));
}

#[test]
fn test_add_edge_rejects_unknown_endpoints() {
    let mut graph = Graph::new();
    graph.add_node(Node::new("A")).expect("node");
    let err = graph.add_edge(Edge::new("A", "missing", 1.0)).unwrap_err();
    assert!(matches!(err, RouteGraphError::InvalidInput(_)));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_add_edge_rejects_self_loop() {
    let mut graph = Graph::new();
    graph.add_node(Node::new("A")).expect("node");
    let err = graph.add_edge(Edge::new("A", "A", 1.0)).unwrap_err();
    assert!(matches!(err, RouteGraphError::InvalidInput(_)));
}

#[test]
fn test_neighbors_are_lexicographic() {
    let mut graph = Graph::new();
    graph.connect("A", "C", 1.0).expect("edge");
    graph.connect("A", "B", 1.0).expect("edge");
    graph.connect("A", "D", 1.0).expect("edge");
    let order: Vec<String> = graph.neighbors("A").into_iter().map(|(n, _)| n).collect();
    assert_eq!(order, vec!["B", "C", "D"]);
}

#[test]
fn test_remove_node_cascades_incident_edges() {
    let mut graph = diamond();
    graph.remove_node("B").expect("remove");
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.edge("A", "B").is_none());
    assert!(graph.edge("B", "D").is_none());
    let report = audit_graph(&graph);
    assert!(!report.has_issues(), "{:?}", report.messages);
}

#[test]
fn test_remove_edge_honors_bidirectional_reversed_lookup() {
    let mut graph = diamond();
    graph.remove_edge("D", "B").expect("reversed remove");
    assert!(graph.edge("B", "D").is_none());
    assert!(graph.edge("D", "B").is_none());
    let err = graph.remove_edge("B", "D").unwrap_err();
    assert!(matches!(err, RouteGraphError::NotFound(_)));
}

#[test]
fn test_adjacency_consistent_after_mutation_sequence() {
    let mut graph = diamond();
    graph.add_node(Node::new("E").with_data(json!({"kind": "hub"}))).expect("node");
    graph.add_edge(Edge::new("E", "A", 2.0)).expect("edge");
    graph.add_edge(Edge::new("D", "E", 0.5).bidirectional()).expect("edge");
    graph.remove_edge("A", "C").expect("remove");
    graph.remove_node("C").expect("remove");
    graph.connect("E", "B", 4.0).expect("edge");
    graph.remove_edge("E", "A").expect("remove");

    let report = audit_graph(&graph);
    assert!(!report.has_issues(), "{:?}", report.messages);
    assert_eq!(report.forward_entries, report.reverse_entries);
}

#[test]
fn test_replacing_edge_updates_weight_everywhere() {
    let mut graph = Graph::new();
    graph.connect("A", "B", 1.0).expect("edge");
    graph
        .add_edge(Edge::new("A", "B", 9.0).bidirectional())
        .expect("replace");
    assert_eq!(graph.step_cost("A", "B"), Some(9.0));
    assert_eq!(graph.step_cost("B", "A"), Some(9.0));
    assert_eq!(graph.edge_count(), 1);
    assert!(!audit_graph(&graph).has_issues());
}

#[test]
fn test_directed_edge_is_one_way() {
    let mut graph = Graph::new();
    graph.add_node(Node::new("A")).expect("node");
    graph.add_node(Node::new("B")).expect("node");
    graph.add_edge(Edge::new("A", "B", 1.0)).expect("edge");
    assert_eq!(graph.neighbors("A").len(), 1);
    assert!(graph.neighbors("B").is_empty());
    assert!(graph.edge("B", "A").is_none());
    assert_eq!(graph.incoming("B").len(), 1);
}
