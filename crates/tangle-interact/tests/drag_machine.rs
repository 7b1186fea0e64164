//! End-to-end drag gestures against the in-memory reference host.
//!
//! Every test drives a [`DragMachine`] with raw pointer events and asserts
//! on what lands in the [`MemoryGraph`]: committed positions, visibility,
//! overlay primitives, parent changes, and emitted events.

use web_time::{Duration, Instant};

use tangle_core::testing::MemoryGraph;
use tangle_core::{
    ComboData, EdgeData, EdgeRouting, GraphView, InputEvent, ItemId, KeyCode, KeyEvent, NodeData,
    Point, PointerEvent, PointerKind, ProbeEvent, Rect, ShapeId, ShapePayload, TransientKey,
};
use tangle_interact::{Behavior, DRAGGING_STATE, DragConfig, DragMachine};

const MS_16: Duration = Duration::from_millis(16);

fn now() -> Instant {
    Instant::now()
}

fn down_on(id: &str, x: f64, y: f64) -> InputEvent {
    InputEvent::Pointer(
        PointerEvent::new(PointerKind::Down, Point::new(x, y)).with_target(ItemId::new(id)),
    )
}

fn move_to(x: f64, y: f64) -> InputEvent {
    InputEvent::pointer(PointerKind::Move, Point::new(x, y))
}

fn up_at(x: f64, y: f64) -> InputEvent {
    InputEvent::pointer(PointerKind::Up, Point::new(x, y))
}

fn escape() -> InputEvent {
    InputEvent::Key(KeyEvent::new(KeyCode::Escape))
}

/// Answer every outstanding hit-test request the way a real backend
/// would: resolve the topmost item and dispatch the probe event back.
fn answer_probes(machine: &mut DragMachine, graph: &mut MemoryGraph, t: Instant) {
    for request in graph.take_hit_requests() {
        let hit = graph.hit_test_topmost(request.point, &request.exclude);
        let answer = InputEvent::Probe(ProbeEvent {
            id: request.probe,
            hit,
        });
        machine.handle(&answer, t, graph);
    }
}

fn drag(machine: &mut DragMachine, graph: &mut MemoryGraph, t: Instant, path: [(f64, f64); 3]) {
    let [(x0, y0), (x1, y1), (x2, y2)] = path;
    machine.handle(&down_on("a", x0, y0), t, graph);
    machine.handle(&move_to(x1, y1), t, graph);
    machine.handle(&up_at(x2, y2), t, graph);
}

// ---------------------------------------------------------------------------
// Combo restructuring
// ---------------------------------------------------------------------------

#[test]
fn dropping_on_a_combo_reparents_the_node() {
    let mut g = MemoryGraph::new();
    g.add_combo(ComboData::new("c1", Point::new(300.0, 300.0)).with_size(100.0, 100.0));
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(DragConfig::new().with_throttle(Duration::ZERO));
    let t = now();

    drag(&mut m, &mut g, t, [(100.0, 100.0), (200.0, 200.0), (300.0, 300.0)]);
    assert!(m.is_settling());
    answer_probes(&mut m, &mut g, t);

    assert!(m.is_idle());
    assert_eq!(g.node(&"a".into()).unwrap().parent, Some(ItemId::new("c1")));
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(300.0, 300.0)));
}

#[test]
fn combo_restructuring_off_leaves_parents_alone() {
    let mut g = MemoryGraph::new();
    g.add_combo(ComboData::new("c1", Point::new(300.0, 300.0)).with_size(100.0, 100.0));
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    drag(&mut m, &mut g, t, [(100.0, 100.0), (200.0, 200.0), (300.0, 300.0)]);

    assert!(m.is_idle());
    assert_eq!(g.hit_request_count(), 0);
    assert_eq!(g.node(&"a".into()).unwrap().parent, None);
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(300.0, 300.0)));
}

#[test]
fn dropping_on_a_node_adopts_that_nodes_parent() {
    let mut g = MemoryGraph::new();
    g.add_combo(ComboData::new("c1", Point::new(300.0, 300.0)).with_size(100.0, 100.0));
    g.add_node(
        NodeData::new("b", Point::new(300.0, 300.0))
            .with_size(40.0, 40.0)
            .with_parent("c1"),
    );
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(DragConfig::new().with_throttle(Duration::ZERO));
    let t = now();

    drag(&mut m, &mut g, t, [(100.0, 100.0), (200.0, 200.0), (300.0, 300.0)]);
    answer_probes(&mut m, &mut g, t);

    assert_eq!(g.node(&"a".into()).unwrap().parent, Some(ItemId::new("c1")));
}

#[test]
fn dropping_on_bare_canvas_clears_the_parent() {
    let mut g = MemoryGraph::new();
    g.add_combo(ComboData::new("c1", Point::new(100.0, 100.0)).with_size(200.0, 200.0));
    g.add_node(
        NodeData::new("a", Point::new(100.0, 100.0))
            .with_size(40.0, 40.0)
            .with_parent("c1"),
    );
    let mut m = DragMachine::new(DragConfig::new().with_throttle(Duration::ZERO));
    let t = now();

    drag(&mut m, &mut g, t, [(100.0, 100.0), (400.0, 400.0), (600.0, 600.0)]);
    answer_probes(&mut m, &mut g, t);

    assert!(m.is_idle());
    assert_eq!(g.node(&"a".into()).unwrap().parent, None);
}

// ---------------------------------------------------------------------------
// Preview modes
// ---------------------------------------------------------------------------

#[test]
fn delegate_mode_moves_only_the_rectangle_until_release() {
    let mut g = MemoryGraph::new();
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_delegate(true)
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("a", 100.0, 100.0), t, &mut g);
    m.handle(&move_to(150.0, 100.0), t, &mut g);

    assert_eq!(g.position_write_calls(), 0);
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(100.0, 100.0)));
    let spec = g.transient(&TransientKey::Delegate).expect("delegate rect");
    match &spec.shape.payload {
        ShapePayload::Rect(r) => assert_eq!(*r, Rect::new(130.0, 80.0, 40.0, 40.0)),
        other => panic!("delegate payload should be a rect, got {other:?}"),
    }

    m.handle(&up_at(150.0, 100.0), t, &mut g);
    assert!(m.is_idle());
    assert_eq!(g.position_write_calls(), 1);
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(150.0, 100.0)));
    assert_eq!(g.transient_count(), 0);
}

#[test]
fn transient_mode_previews_on_the_overlay_and_restores_exactly() {
    let mut g = MemoryGraph::new();
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    g.add_node(NodeData::new("b", Point::new(300.0, 100.0)).with_size(40.0, 40.0));
    g.add_edge(EdgeData::new("e1", "a", "b"));
    g.set_visible_shapes(&"e1".into(), vec![ShapeId::key(), ShapeId::label()]);
    let before_edge = g.visible_shapes(&"e1".into());
    let before_node = g.visible_shapes(&"a".into());

    let mut m = DragMachine::new(
        DragConfig::new()
            .with_transient(true)
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("a", 100.0, 100.0), t, &mut g);
    m.handle(&move_to(140.0, 100.0), t, &mut g);

    // Real items hidden, copies on the overlay, data untouched.
    assert!(!g.is_visible(&"a".into()));
    assert!(!g.is_visible(&"e1".into()));
    assert_eq!(g.position_write_calls(), 0);
    let copy = g.transient(&TransientKey::Item("a".into())).expect("node copy");
    match &copy.shape.payload {
        ShapePayload::Rect(r) => assert_eq!(*r, Rect::new(120.0, 80.0, 40.0, 40.0)),
        other => panic!("node copy should be a rect, got {other:?}"),
    }
    let edge_copy = g.transient(&TransientKey::Item("e1".into())).expect("edge copy");
    assert!(matches!(&edge_copy.shape.payload, ShapePayload::Path(_)));

    m.handle(&up_at(140.0, 100.0), t, &mut g);
    assert!(m.is_idle());
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(140.0, 100.0)));
    assert_eq!(g.transient_count(), 0);
    assert_eq!(g.visible_shapes(&"a".into()), before_node);
    assert_eq!(g.visible_shapes(&"e1".into()), before_edge);
}

#[test]
fn hide_related_mode_hides_edges_neighbors_and_ancestors() {
    let mut g = MemoryGraph::new();
    g.add_combo(ComboData::new("c1", Point::new(100.0, 100.0)).with_size(200.0, 200.0));
    g.add_node(
        NodeData::new("a", Point::new(100.0, 100.0))
            .with_size(40.0, 40.0)
            .with_parent("c1"),
    );
    g.add_node(NodeData::new("b", Point::new(300.0, 100.0)).with_size(40.0, 40.0));
    g.add_edge(EdgeData::new("e1", "a", "b"));

    let mut m = DragMachine::new(
        DragConfig::new()
            .with_hide_related_edges(true)
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("a", 100.0, 100.0), t, &mut g);
    m.handle(&move_to(120.0, 100.0), t, &mut g);

    assert!(g.is_visible(&"a".into()));
    assert!(!g.is_visible(&"e1".into()));
    assert!(!g.is_visible(&"b".into()));
    assert!(!g.is_visible(&"c1".into()));

    m.handle(&up_at(120.0, 100.0), t, &mut g);
    assert!(m.is_idle());
    assert!(g.is_visible(&"e1".into()));
    assert!(g.is_visible(&"b".into()));
    assert!(g.is_visible(&"c1".into()));
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[test]
fn escape_with_a_preview_keeps_real_positions_and_restores_visibility() {
    let mut g = MemoryGraph::new();
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_transient(true)
            .with_event_name("dragend")
            .with_throttle(Duration::ZERO),
    );
    let t = now();

    m.handle(&down_on("a", 100.0, 100.0), t, &mut g);
    m.handle(&move_to(180.0, 100.0), t, &mut g);
    assert!(!g.is_visible(&"a".into()));

    m.handle(&escape(), t, &mut g);
    assert!(m.is_idle());
    assert!(g.is_visible(&"a".into()));
    assert_eq!(g.transient_count(), 0);
    // Real data was never touched, so nothing to roll back.
    assert_eq!(g.position_write_calls(), 0);
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(100.0, 100.0)));
    assert!(g.events().is_empty());
    assert!(!g.has_state(&"a".into(), DRAGGING_STATE));
}

#[test]
fn escape_during_settling_is_ignored() {
    let mut g = MemoryGraph::new();
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_event_name("dragend")
            .with_throttle(Duration::ZERO),
    );
    let t = now();

    drag(&mut m, &mut g, t, [(100.0, 100.0), (150.0, 100.0), (160.0, 100.0)]);
    assert!(m.is_settling());

    assert!(!m.handle(&escape(), t, &mut g).consumed());
    assert!(m.is_settling());
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(160.0, 100.0)));

    answer_probes(&mut m, &mut g, t);
    assert!(m.is_idle());
    assert_eq!(g.take_events().len(), 1);
}

#[test]
fn deactivate_unwinds_an_active_drag() {
    let mut g = MemoryGraph::new();
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_transient(true)
            .with_throttle(Duration::ZERO),
    );
    let t = now();

    m.handle(&down_on("a", 100.0, 100.0), t, &mut g);
    m.handle(&move_to(160.0, 100.0), t, &mut g);
    assert!(m.is_dragging());

    m.deactivate(&mut g);
    assert!(m.is_idle());
    assert!(g.is_visible(&"a".into()));
    assert_eq!(g.transient_count(), 0);
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(100.0, 100.0)));
}

// ---------------------------------------------------------------------------
// Throttling
// ---------------------------------------------------------------------------

#[test]
fn the_release_delta_lands_even_inside_the_throttle_window() {
    let mut g = MemoryGraph::new();
    g.add_node(NodeData::new("a", Point::new(100.0, 100.0)).with_size(40.0, 40.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_throttle(MS_16)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("a", 100.0, 100.0), t, &mut g);
    m.handle(&move_to(110.0, 100.0), t, &mut g);
    m.handle(&move_to(112.0, 98.0), t + Duration::from_millis(1), &mut g);
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(110.0, 100.0)));

    m.handle(&up_at(115.0, 95.0), t + Duration::from_millis(2), &mut g);
    assert!(m.is_idle());
    assert_eq!(g.node_position(&"a".into()), Some(Point::new(115.0, 95.0)));
}

// ---------------------------------------------------------------------------
// Overlap prevention
// ---------------------------------------------------------------------------

fn overlap_graph() -> MemoryGraph {
    let mut g = MemoryGraph::new();
    g.add_node(
        NodeData::new("m", Point::new(0.0, 0.0))
            .with_size(20.0, 20.0)
            .with_prevent_overlap(true),
    );
    g.add_node(NodeData::new("p", Point::new(100.0, 0.0)).with_size(20.0, 20.0));
    g.add_node(NodeData::new("q", Point::new(100.0, 100.0)).with_size(20.0, 20.0));
    g.add_edge(
        EdgeData::new("w", "p", "q").with_routing(EdgeRouting::orthogonal_avoiding()),
    );
    g
}

#[test]
fn near_avoidance_edges_hide_and_redraw_while_the_drag_is_close() {
    let mut g = overlap_graph();
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("m", 0.0, 0.0), t, &mut g);
    m.handle(&move_to(60.0, 50.0), t, &mut g);

    assert!(!g.is_visible(&"w".into()));
    let redraw = g.transient(&TransientKey::Item("w".into())).expect("re-routed edge");
    assert!(matches!(&redraw.shape.payload, ShapePayload::Path(_)));

    // Moving away restores the edge mid-gesture.
    m.handle(&move_to(-200.0, 0.0), t, &mut g);
    assert!(g.is_visible(&"w".into()));
    assert!(g.transient(&TransientKey::Item("w".into())).is_none());

    m.handle(&up_at(-200.0, 0.0), t, &mut g);
    assert!(m.is_idle());
    assert!(g.is_visible(&"w".into()));
    assert_eq!(g.transient_count(), 0);
}

#[test]
fn near_edges_still_hidden_at_release_are_restored_by_the_settle() {
    let mut g = overlap_graph();
    let before = g.visible_shapes(&"w".into());
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("m", 0.0, 0.0), t, &mut g);
    m.handle(&move_to(60.0, 50.0), t, &mut g);
    assert!(!g.is_visible(&"w".into()));

    m.handle(&up_at(60.0, 50.0), t, &mut g);
    assert!(m.is_idle());
    assert_eq!(g.visible_shapes(&"w".into()), before);
    assert_eq!(g.transient_count(), 0);
}

#[test]
fn nodes_without_the_marker_leave_near_edges_alone() {
    let mut g = overlap_graph();
    // Same layout, but the dragged node does not request overlap
    // prevention.
    g.add_node(NodeData::new("plain", Point::new(0.0, 40.0)).with_size(20.0, 20.0));
    let mut m = DragMachine::new(
        DragConfig::new()
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();

    m.handle(&down_on("plain", 0.0, 40.0), t, &mut g);
    m.handle(&move_to(60.0, 50.0), t, &mut g);

    assert!(g.is_visible(&"w".into()));
    assert!(g.transient(&TransientKey::Item("w".into())).is_none());
}

// ---------------------------------------------------------------------------
// Restore fidelity
// ---------------------------------------------------------------------------

#[test]
fn a_full_gesture_leaves_every_visible_shape_set_unchanged() {
    let mut g = MemoryGraph::new();
    g.add_combo(ComboData::new("c1", Point::new(100.0, 100.0)).with_size(200.0, 200.0));
    g.add_node(
        NodeData::new("a", Point::new(100.0, 100.0))
            .with_size(40.0, 40.0)
            .with_parent("c1"),
    );
    g.add_node(NodeData::new("b", Point::new(300.0, 100.0)).with_size(40.0, 40.0));
    g.add_edge(EdgeData::new("e1", "a", "b"));
    g.set_visible_shapes(&"e1".into(), vec![ShapeId::key(), ShapeId::halo(), ShapeId::label()]);

    let ids: Vec<ItemId> = vec!["c1".into(), "a".into(), "b".into(), "e1".into()];
    let before: Vec<Vec<ShapeId>> = ids.iter().map(|id| g.visible_shapes(id)).collect();

    let mut m = DragMachine::new(
        DragConfig::new()
            .with_transient(true)
            .with_throttle(Duration::ZERO)
            .with_update_combo_structure(false),
    );
    let t = now();
    drag(&mut m, &mut g, t, [(100.0, 100.0), (150.0, 120.0), (160.0, 130.0)]);
    assert!(m.is_idle());

    let after: Vec<Vec<ShapeId>> = ids.iter().map(|id| g.visible_shapes(id)).collect();
    assert_eq!(after, before);
    assert_eq!(g.transient_count(), 0);
}
