//! End-to-end edge drawing against the in-memory reference host.

use tangle_core::testing::MemoryGraph;
use tangle_core::{
    EdgeData, EdgeRouting, GraphView, ItemId, NodeData, Point, ShapeId, ShapePayload,
};
use tangle_render::EdgeRenderer;
use tangle_route::ObstacleSet;

fn graph_with_gap() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph.add_node(NodeData::new("a", Point::new(0.0, 0.0)).with_size(20.0, 20.0));
    graph.add_node(NodeData::new("b", Point::new(100.0, 100.0)).with_size(20.0, 20.0));
    graph.add_node(NodeData::new("wall", Point::new(50.0, 50.0)).with_size(20.0, 20.0));
    graph
}

#[test]
fn drawn_edge_lands_in_the_graph() {
    let mut graph = graph_with_gap();
    graph.add_edge(EdgeData::new("a->b", "a", "b"));
    let renderer = EdgeRenderer::new();
    let obstacles = ObstacleSet::from_view(&graph);
    let edge = graph.edge(&ItemId::new("a->b")).expect("edge");

    renderer.draw_edge(
        &edge,
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        &EdgeRouting::default(),
        &obstacles,
        &mut graph,
    );

    let owner = ItemId::new("a->b");
    let committed: Vec<&str> = graph
        .committed_shapes(&owner)
        .iter()
        .map(|spec| spec.id.as_str())
        .collect();
    assert!(committed.contains(&"key"));
    assert!(committed.contains(&"arrow-target"));
    assert!(!committed.contains(&"arrow-source"));
    let visible = graph.visible_shapes(&owner);
    assert!(visible.contains(&ShapeId::key()));
}

#[test]
fn avoidance_redraw_routes_around_the_wall() {
    let mut graph = graph_with_gap();
    graph.add_edge(
        EdgeData::new("a->b", "a", "b").with_routing(EdgeRouting::orthogonal_avoiding()),
    );
    let renderer = EdgeRenderer::new();
    let obstacles = ObstacleSet::from_view(&graph);
    let edge = graph.edge(&ItemId::new("a->b")).expect("edge");

    renderer.draw_edge(
        &edge,
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        &edge.routing,
        &obstacles,
        &mut graph,
    );

    let owner = ItemId::new("a->b");
    let key = graph
        .committed_shapes(&owner)
        .iter()
        .find(|spec| spec.id == ShapeId::key())
        .expect("key shape");
    let ShapePayload::Path(svg) = &key.payload else {
        panic!("key payload must be a path, got {:?}", key.payload);
    };
    // The wall occupies x 40..60, y 40..60; a direct diagonal would cut
    // through its center at 50 50.
    assert!(!svg.contains("50.00 50.00"), "path crosses the wall: {svg}");
    assert!(svg.contains('L'), "routed path must bend: {svg}");
}

#[test]
fn redraw_removes_stale_decorations() {
    let mut graph = graph_with_gap();
    graph.add_edge(EdgeData::new("a->b", "a", "b").with_label("first"));
    let renderer = EdgeRenderer::new();
    let obstacles = ObstacleSet::from_view(&graph);
    let owner = ItemId::new("a->b");

    let labeled = graph.edge(&owner).expect("edge");
    renderer.draw_edge(
        &labeled,
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        &EdgeRouting::default(),
        &obstacles,
        &mut graph,
    );
    assert!(graph.visible_shapes(&owner).contains(&ShapeId::label()));

    let unlabeled = EdgeData::new("a->b", "a", "b");
    renderer.draw_edge(
        &unlabeled,
        Point::new(0.0, 0.0),
        Point::new(100.0, 100.0),
        &EdgeRouting::default(),
        &obstacles,
        &mut graph,
    );
    assert!(!graph.visible_shapes(&owner).contains(&ShapeId::label()));
    assert!(graph.visible_shapes(&owner).contains(&ShapeId::key()));
}
