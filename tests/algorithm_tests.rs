use routegraph::dataset::{GraphShape, generate_graph, node_id};
use routegraph::{Algorithm, Graph, Pathfinder, RouteGraphError};

fn diamond() -> Pathfinder {
    let mut graph = Graph::new();
    graph.connect("A", "B", 1.0).expect("edge");
    graph.connect("B", "D", 1.0).expect("edge");
    graph.connect("A", "C", 5.0).expect("edge");
    graph.connect("C", "D", 1.0).expect("edge");
    Pathfinder::new(graph)
}

#[test]
fn test_shortest_path_takes_cheap_route() {
    let finder = diamond();
    let path = finder
        .find_shortest_path("A", "D")
        .expect("search")
        .expect("path");
    assert_eq!(path.nodes, vec!["A", "B", "D"]);
    assert_eq!(path.total_cost, 2.0);
    assert_eq!(path.hop_count(), 2);
}

#[test]
fn test_breadth_first_matches_minimum_hops() {
    let finder = diamond();
    let path = finder
        .find_path("A", "D", Algorithm::Breadth)
        .expect("search")
        .expect("path");
    assert_eq!(path.hop_count(), 2);
    // Cost is still reported even though ranking ignored it.
    assert!(path.total_cost > 0.0);
}

#[test]
fn test_astar_cost_equals_dijkstra_without_positions() {
    let finder = diamond();
    let dijkstra = finder
        .find_path("A", "D", Algorithm::Dijkstra)
        .expect("search")
        .expect("path");
    let astar = finder
        .find_path("A", "D", Algorithm::AStar)
        .expect("search")
        .expect("path");
    assert_eq!(dijkstra.total_cost, astar.total_cost);
    assert_eq!(dijkstra.nodes, astar.nodes);
}

#[test]
fn test_astar_cost_equals_dijkstra_on_grid() {
    let graph = generate_graph(GraphShape::Grid2D { width: 5, height: 4 }, 20, 7);
    let finder = Pathfinder::new(graph);
    let start = node_id(0);
    let goal = node_id(19);
    let dijkstra = finder
        .find_path(&start, &goal, Algorithm::Dijkstra)
        .expect("search")
        .expect("path");
    let astar = finder
        .find_path(&start, &goal, Algorithm::AStar)
        .expect("search")
        .expect("path");
    assert_eq!(dijkstra.total_cost, astar.total_cost);
    assert_eq!(dijkstra.total_cost, 7.0);
}

#[test]
fn test_bidirectional_cost_equals_dijkstra() {
    let finder = diamond();
    let plain = finder
        .find_path("A", "D", Algorithm::Dijkstra)
        .expect("search")
        .expect("path");
    let both_ends = finder
        .find_path("A", "D", Algorithm::Bidirectional)
        .expect("search")
        .expect("path");
    assert_eq!(plain.total_cost, both_ends.total_cost);

    let graph = generate_graph(GraphShape::Grid2D { width: 6, height: 6 }, 36, 3);
    let finder = Pathfinder::new(graph);
    let plain = finder
        .find_path(&node_id(0), &node_id(35), Algorithm::Dijkstra)
        .expect("search")
        .expect("path");
    let both_ends = finder
        .find_path(&node_id(0), &node_id(35), Algorithm::Bidirectional)
        .expect("search")
        .expect("path");
    assert_eq!(plain.total_cost, both_ends.total_cost);
}

#[test]
fn test_depth_first_returns_some_valid_route() {
    let finder = diamond();
    let path = finder
        .find_path("A", "D", Algorithm::Depth)
        .expect("search")
        .expect("path");
    assert_eq!(path.start(), "A");
    assert_eq!(path.goal(), "D");
    assert_eq!(path.edges.len(), path.nodes.len() - 1);
}

#[test]
fn test_unknown_endpoints_are_not_an_error() {
    let finder = diamond();
    assert!(finder
        .find_path("A", "nowhere", Algorithm::Dijkstra)
        .expect("search")
        .is_none());
    assert!(finder
        .find_path("nowhere", "D", Algorithm::Dijkstra)
        .expect("search")
        .is_none());
}

#[test]
fn test_same_start_and_goal_yields_no_route() {
    let finder = diamond();
    assert!(finder
        .find_path("A", "A", Algorithm::Dijkstra)
        .expect("search")
        .is_none());
}

#[test]
fn test_disconnected_goal_yields_no_route() {
    let mut finder = diamond();
    finder.add_node(routegraph::Node::new("E")).expect("node");
    for algorithm in [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Breadth,
        Algorithm::Depth,
        Algorithm::Bidirectional,
    ] {
        assert!(
            finder.find_path("A", "E", algorithm).expect("search").is_none(),
            "expected no route to isolated node"
        );
    }
}

#[test]
fn test_path_through_waypoints_splices_legs() {
    let finder = diamond();
    let path = finder
        .find_path_through_nodes(&["A", "D", "C"], Algorithm::Dijkstra)
        .expect("search")
        .expect("path");
    assert_eq!(path.nodes, vec!["A", "B", "D", "C"]);
    assert_eq!(path.total_cost, 3.0);
    assert_eq!(path.metadata.get("legs"), Some(&serde_json::json!(2)));
}

#[test]
fn test_path_through_waypoints_fails_when_leg_unreachable() {
    let mut finder = diamond();
    finder.add_node(routegraph::Node::new("E")).expect("node");
    assert!(finder
        .find_path_through_nodes(&["A", "E", "D"], Algorithm::Dijkstra)
        .expect("search")
        .is_none());
}

#[test]
fn test_path_through_waypoints_validates_input() {
    let finder = diamond();
    let err = finder
        .find_path_through_nodes(&["A"], Algorithm::Dijkstra)
        .unwrap_err();
    assert!(matches!(err, RouteGraphError::InvalidInput(_)));
    let err = finder
        .find_path_through_nodes(&["A", "A", "D"], Algorithm::Dijkstra)
        .unwrap_err();
    assert!(matches!(err, RouteGraphError::InvalidInput(_)));
}

#[test]
fn test_node_weight_modifier_steers_optimal_route() {
    let mut graph = Graph::new();
    graph.connect("A", "B", 1.0).expect("edge");
    graph.connect("B", "D", 1.0).expect("edge");
    graph.connect("A", "C", 1.5).expect("edge");
    graph.connect("C", "D", 1.0).expect("edge");
    let mut toll = graph.node("B").cloned().expect("node B");
    toll.weight = 4.0;
    graph.add_node(toll).expect("node");
    let finder = Pathfinder::new(graph);
    let path = finder
        .find_shortest_path("A", "D")
        .expect("search")
        .expect("path");
    // Entering B now costs 4.0, so the heavier edge route wins.
    assert_eq!(path.nodes, vec!["A", "C", "D"]);
    assert_eq!(path.total_cost, 2.5);
}
