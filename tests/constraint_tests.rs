use routegraph::{Algorithm, Constraints, Graph, Pathfinder, RouteGraphError, SearchOptions};

fn diamond() -> Pathfinder {
    let mut graph = Graph::new();
    graph.connect("A", "B", 1.0).expect("edge");
    graph.connect("B", "D", 1.0).expect("edge");
    graph.connect("A", "C", 5.0).expect("edge");
    graph.connect("C", "D", 1.0).expect("edge");
    Pathfinder::new(graph)
}

fn tagged() -> Pathfinder {
    let mut graph = Graph::new();
    graph.connect("A", "B", 1.0).expect("edge");
    graph.connect("B", "D", 1.0).expect("edge");
    graph.connect("A", "C", 5.0).expect("edge");
    graph.connect("C", "D", 1.0).expect("edge");
    for id in ["A", "B", "D"] {
        let node = graph.node(id).cloned().expect("node").with_tag("paved");
        graph.add_node(node).expect("node");
    }
    for (u, v) in [("A", "B"), ("B", "D")] {
        let edge = graph.edge(u, v).cloned().expect("edge").with_tag("paved");
        graph.add_edge(edge).expect("edge");
    }
    Pathfinder::new(graph)
}

#[test]
fn test_avoid_node_forces_detour() {
    let finder = diamond();
    let options = SearchOptions::with_constraints(Constraints::new().avoid_node("B"));
    let path = finder
        .find_path_with("A", "D", Algorithm::Dijkstra, &options)
        .expect("search")
        .expect("path");
    assert_eq!(path.nodes, vec!["A", "C", "D"]);
    assert_eq!(path.total_cost, 6.0);
}

#[test]
fn test_avoid_edge_excludes_either_orientation_of_bidirectional() {
    let finder = diamond();
    for constraints in [
        Constraints::new().avoid_edge("A", "B"),
        Constraints::new().avoid_edge("B", "A"),
    ] {
        let options = SearchOptions::with_constraints(constraints);
        let path = finder
            .find_path_with("A", "D", Algorithm::Dijkstra, &options)
            .expect("search")
            .expect("path");
        assert_eq!(path.nodes, vec!["A", "C", "D"]);
    }
}

#[test]
fn test_max_edge_weight_prunes_heavy_edges() {
    let finder = diamond();
    let options = SearchOptions::with_constraints(Constraints::new().max_edge_weight(4.0));
    let path = finder
        .find_path_with("A", "D", Algorithm::Dijkstra, &options)
        .expect("search")
        .expect("path");
    assert_eq!(path.nodes, vec!["A", "B", "D"]);

    // Tight enough to sever every route.
    let options = SearchOptions::with_constraints(Constraints::new().max_edge_weight(0.5));
    assert!(finder
        .find_path_with("A", "D", Algorithm::Dijkstra, &options)
        .expect("search")
        .is_none());
}

#[test]
fn test_required_tags_keep_only_matching_elements() {
    let finder = tagged();
    let options = SearchOptions::with_constraints(Constraints::new().require_tag("paved"));
    let path = finder
        .find_path_with("A", "D", Algorithm::Dijkstra, &options)
        .expect("search")
        .expect("path");
    assert_eq!(path.nodes, vec!["A", "B", "D"]);

    let options = SearchOptions::with_constraints(Constraints::new().require_tag("rail"));
    assert!(finder
        .find_path_with("A", "D", Algorithm::Dijkstra, &options)
        .expect("search")
        .is_none());
}

#[test]
fn test_negative_max_edge_weight_is_rejected_before_searching() {
    let finder = diamond();
    let options = SearchOptions::with_constraints(Constraints::new().max_edge_weight(-1.0));
    let err = finder
        .find_path_with("A", "D", Algorithm::Dijkstra, &options)
        .unwrap_err();
    assert!(matches!(err, RouteGraphError::InvalidInput(_)));
}

#[test]
fn test_constrained_searches_never_touch_the_route_cache() {
    let finder = diamond();
    let options = SearchOptions::with_constraints(Constraints::new().avoid_node("B"));
    for _ in 0..2 {
        finder
            .find_path_with("A", "D", Algorithm::Dijkstra, &options)
            .expect("search")
            .expect("path");
    }
    let stats = finder.path_cache_stats();
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.hits, 0);
}

#[test]
fn test_constraints_filter_all_paths_enumeration() {
    let finder = diamond();
    let options = SearchOptions::with_constraints(Constraints::new().avoid_node("C"));
    let paths = finder
        .find_all_paths_with("A", "D", 10, None, &options)
        .expect("enumerate");
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes, vec!["A", "B", "D"]);
}
