#![forbid(unsafe_code)]

//! Node dragging: the state machine behind pointer-driven node movement.
//!
//! [`DragMachine`] is a [`Behavior`] that turns a pointer-down on a node,
//! a stream of moves, and a release into position commits, transient
//! previews, visibility bookkeeping, and (optionally) a combo membership
//! change resolved from the drop point.
//!
//! # State Machine
//!
//! **Idle → Armed → Dragging → Settling → Idle**
//!
//! - **Armed**: a press landed on a node and passed the `should_begin`
//!   gate. Nothing has moved yet.
//! - **Dragging**: movement exceeded the one-pixel threshold. A
//!   [`DragSession`] snapshot exists; per-frame updates go to real data
//!   (live mode, throttled), the transient overlay (transient mode), or a
//!   single synthetic rectangle (delegate mode).
//! - **Settling**: the pointer was released and the final delta committed.
//!   The machine waits out the settle debounce and the drop-target probe,
//!   then restores hidden items, clears the overlay, and emits the
//!   completion event.
//!
//! # Invariants
//!
//! 1. Every item hidden during a gesture is restored with its recorded
//!    sub-shape set exactly once, on settle and on cancel alike.
//! 2. Real node positions are untouched until release while a delegate or
//!    transient preview is active.
//! 3. A `pointerdown` during any non-Idle phase is ignored; gestures never
//!    nest.
//! 4. The final release delta is always committed, throttle or not.
//! 5. Missing ids are logged and skipped; no host lookup failure aborts a
//!    gesture.
//!
//! # Failure Modes
//!
//! - A probe answer arriving after its deadline, or after the machine left
//!   Settling, is discarded.
//! - Escape during Settling is ignored: the commit has already happened
//!   and parent changes are applied only in this phase.

use core::fmt;
use std::mem;

use ahash::AHashSet;
use web_time::{Duration, Instant};

use tangle_core::cancellation::CancellationSource;
use tangle_core::data::EdgeData;
use tangle_core::event::{
    DropTarget, InputEvent, KeyCode, PointerButton, PointerEvent, PointerKind, ProbeEvent, ProbeId,
};
use tangle_core::geometry::Point;
use tangle_core::graph::{GraphEvent, GraphHost, TransientKey, TransientSpec};
use tangle_core::id::{ItemId, ItemKind, ShapeId};
use tangle_core::shape::{ShapePayload, ShapeSpec, ShapeStyle};
use tangle_render::build_path;
use tangle_route::{ObstacleBox, ObstacleSet, RouterConfig, route};

use crate::behavior::{Behavior, Handled};
use crate::config::DragConfig;
use crate::ledger::VisibilityLedger;
use crate::session::{DragSession, DragTarget, PendingProbe, SettleState};
use crate::timing::{Debounce, Throttle};

#[cfg(feature = "tracing")]
use tangle_core::logging::{debug, warn};
#[cfg(not(feature = "tracing"))]
use tangle_core::{debug, warn};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Movement must exceed this (world units, either axis) before a press
/// becomes a drag.
const DRAG_THRESHOLD: f64 = 1.0;

/// Padding around the moved selection when querying for near edges.
const NEAR_EDGE_MARGIN: f64 = 40.0;

/// How long a drop probe may stay unanswered before the settle proceeds
/// without it.
pub const DROP_PROBE_TIMEOUT: Duration = Duration::from_millis(250);

/// State set on every dragged item for the duration of the gesture.
pub const DRAGGING_STATE: &str = "dragging";

/// Stroke of transient node copies.
const TRANSIENT_STROKE: &str = "#1890FF";

/// Stroke of transient edge previews.
const TRANSIENT_EDGE_STROKE: &str = "#99ADD1";

/// Opacity of transient previews.
const TRANSIENT_OPACITY: f64 = 0.6;

fn transient_node_style() -> ShapeStyle {
    ShapeStyle::stroked(TRANSIENT_STROKE, 1.0).with_opacity(TRANSIENT_OPACITY)
}

fn transient_edge_style() -> ShapeStyle {
    ShapeStyle::stroked(TRANSIENT_EDGE_STROKE, 1.0).with_opacity(TRANSIENT_OPACITY)
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

enum Phase {
    Idle,
    Armed { origin: Point, pressed: ItemId },
    Dragging(Box<DragSession>),
    Settling(Box<SettleState>),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Armed { .. } => "armed",
            Self::Dragging(_) => "dragging",
            Self::Settling(_) => "settling",
        }
    }
}

// ---------------------------------------------------------------------------
// DragMachine
// ---------------------------------------------------------------------------

/// The drag interaction. One instance serves one canvas; it holds no graph
/// data of its own and reaches everything through the host traits.
pub struct DragMachine {
    config: DragConfig,
    phase: Phase,
    next_probe: u64,
}

impl fmt::Debug for DragMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragMachine")
            .field("phase", &self.phase.name())
            .finish()
    }
}

impl Default for DragMachine {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragMachine {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            next_probe: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    #[inline]
    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling(_))
    }
}

impl Behavior for DragMachine {
    /// Pointer-down only arms the machine and is never consumed, so
    /// sibling behaviors (selection, context menus) still see the press.
    /// Moves and releases are consumed once a gesture is in flight.
    fn handle(&mut self, event: &InputEvent, now: Instant, host: &mut dyn GraphHost) -> Handled {
        match event {
            InputEvent::Pointer(ev) => match ev.kind {
                PointerKind::Down => self.on_pointer_down(ev, host),
                PointerKind::Move => self.on_pointer_move(ev, now, host),
                PointerKind::Up => self.on_pointer_up(ev, now, host),
            },
            InputEvent::Key(key) if key.code == KeyCode::Escape => self.on_escape(host),
            InputEvent::Key(_) => Handled::No,
            InputEvent::Probe(probe) => self.on_probe(probe, now, host),
        }
    }

    fn poll(&mut self, now: Instant, host: &mut dyn GraphHost) {
        match &mut self.phase {
            Phase::Dragging(session) => {
                if session.modes.live()
                    && let Some(delta) = session.throttle.poll(now)
                {
                    host.update_positions(&session.positions_at(delta), false);
                }
            }
            Phase::Settling(_) => self.try_settle(now, host),
            Phase::Idle | Phase::Armed { .. } => {}
        }
    }

    /// Unwinds any in-flight gesture: an active drag is cancelled, a
    /// pending settle is completed immediately.
    fn deactivate(&mut self, host: &mut dyn GraphHost) {
        match &mut self.phase {
            Phase::Idle => {}
            Phase::Armed { .. } => self.phase = Phase::Idle,
            Phase::Dragging(_) => self.cancel_drag(host),
            Phase::Settling(settle) => {
                if let Some(probe) = settle.probe.take() {
                    probe.source.cancel();
                }
                self.finish_settle(host);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl DragMachine {
    fn on_pointer_down(&mut self, ev: &PointerEvent, host: &mut dyn GraphHost) -> Handled {
        if !matches!(self.phase, Phase::Idle) {
            debug!(phase = self.phase.name(), "pointer down during active gesture ignored");
            return Handled::No;
        }
        if ev.button != PointerButton::Left {
            return Handled::No;
        }
        let Some(target) = &ev.target else {
            return Handled::No;
        };
        if host.node(target).is_none() {
            return Handled::No;
        }
        if let Some(gate) = self.config.should_begin
            && !gate(ev, ev.target.as_ref())
        {
            return Handled::No;
        }
        self.phase = Phase::Armed {
            origin: ev.position,
            pressed: target.clone(),
        };
        Handled::No
    }

    fn on_pointer_move(
        &mut self,
        ev: &PointerEvent,
        now: Instant,
        host: &mut dyn GraphHost,
    ) -> Handled {
        match &mut self.phase {
            Phase::Idle | Phase::Settling(_) => Handled::No,
            Phase::Armed { origin, pressed } => {
                let (dx, dy) = origin.delta_to(ev.position);
                if dx.abs() <= DRAG_THRESHOLD && dy.abs() <= DRAG_THRESHOLD {
                    return Handled::No;
                }
                let origin = *origin;
                let pressed = pressed.clone();
                if !self.begin_drag(origin, &pressed, host) {
                    self.phase = Phase::Idle;
                    return Handled::No;
                }
                self.drag_to(ev.position, now, host);
                Handled::Yes
            }
            Phase::Dragging(_) => {
                self.drag_to(ev.position, now, host);
                Handled::Yes
            }
        }
    }

    fn on_pointer_up(
        &mut self,
        ev: &PointerEvent,
        now: Instant,
        host: &mut dyn GraphHost,
    ) -> Handled {
        match &mut self.phase {
            Phase::Idle => Handled::No,
            Phase::Armed { .. } => {
                // Threshold never exceeded: the press stays a click.
                self.phase = Phase::Idle;
                Handled::No
            }
            Phase::Dragging(_) => {
                self.begin_settle(ev.position, now, host);
                Handled::Yes
            }
            Phase::Settling(settle) => {
                // Repeated releases restart the debounce; one restore pass.
                settle.debounce.arm((), now);
                settle.debounce_done = false;
                Handled::Yes
            }
        }
    }

    fn on_escape(&mut self, host: &mut dyn GraphHost) -> Handled {
        match &self.phase {
            Phase::Idle | Phase::Settling(_) => Handled::No,
            Phase::Armed { .. } => {
                self.phase = Phase::Idle;
                Handled::Yes
            }
            Phase::Dragging(_) => {
                self.cancel_drag(host);
                Handled::Yes
            }
        }
    }

    fn on_probe(&mut self, ev: &ProbeEvent, now: Instant, host: &mut dyn GraphHost) -> Handled {
        let Phase::Settling(settle) = &mut self.phase else {
            debug!(probe = ev.id.get(), "probe answer with no settle in flight, discarding");
            return Handled::No;
        };
        let Some(pending) = &settle.probe else {
            debug!(probe = ev.id.get(), "late probe answer discarded");
            return Handled::No;
        };
        if pending.id != ev.id {
            debug!(probe = ev.id.get(), "stale probe answer discarded");
            return Handled::No;
        }
        settle.probe = None;
        settle.resolved = Some(ev.hit.clone());
        self.try_settle(now, host);
        Handled::Yes
    }
}

// ---------------------------------------------------------------------------
// Gesture transitions
// ---------------------------------------------------------------------------

impl DragMachine {
    /// Build the session and apply drag-entry side effects. Returns `false`
    /// when no draggable target survives the lookup.
    fn begin_drag(&mut self, origin: Point, pressed: &ItemId, host: &mut dyn GraphHost) -> bool {
        let Some(pressed_node) = host.node(pressed) else {
            warn!(id = %pressed, "pressed node vanished before drag start");
            return false;
        };
        let modes = self.config.resolve_modes();

        // Selection resolution: a press on a selected node drags the whole
        // selection, otherwise only the pressed node.
        let ids: Vec<ItemId> = if pressed_node.has_state(&self.config.selected_state) {
            host.items_with_state(&self.config.selected_state)
                .into_iter()
                .filter(|id| host.node(id).is_some())
                .collect()
        } else {
            vec![pressed.clone()]
        };

        let mut targets = Vec::with_capacity(ids.len());
        let mut prevent_overlap = false;
        for id in ids {
            let Some(node) = host.node(&id) else {
                warn!(id = %id, "selected node vanished, skipping");
                continue;
            };
            prevent_overlap |= node.prevent_overlap;
            targets.push(DragTarget {
                id,
                origin: node.position,
                bounds: node.bounds,
            });
        }
        if targets.is_empty() {
            return false;
        }

        let mut related_edges: Vec<ItemId> = targets
            .iter()
            .flat_map(|t| host.related_edges(&t.id))
            .collect();
        related_edges.sort();
        related_edges.dedup();

        for t in &targets {
            host.raise(&t.id);
            host.set_state(&t.id, DRAGGING_STATE, true);
        }

        let mut session = DragSession {
            origin,
            modes,
            targets,
            related_edges,
            delta: (0.0, 0.0),
            prevent_overlap,
            ledger: VisibilityLedger::new(),
            near_hidden: AHashSet::new(),
            throttle: Throttle::new(self.config.throttle),
        };

        if modes.hide_related {
            Self::hide_surroundings(&mut session, host);
        } else if modes.transient {
            Self::enter_transient(&mut session, host);
        } else if modes.delegate {
            host.draw_transient(TransientSpec::new(
                TransientKey::Delegate,
                ShapeSpec::new(ShapeId::key(), ShapePayload::Rect(session.union_bounds()))
                    .with_style(self.config.delegate_style.clone()),
            ));
        }

        debug!(targets = session.targets.len(), "drag started");
        self.phase = Phase::Dragging(Box::new(session));
        true
    }

    /// Apply one pointer position while Dragging.
    fn drag_to(&mut self, position: Point, now: Instant, host: &mut dyn GraphHost) {
        let Phase::Dragging(session) = &mut self.phase else {
            return;
        };
        session.delta = session.origin.delta_to(position);

        if session.modes.delegate {
            host.draw_transient(TransientSpec::new(
                TransientKey::Delegate,
                ShapeSpec::new(ShapeId::key(), ShapePayload::Rect(session.moved_bounds()))
                    .with_style(self.config.delegate_style.clone()),
            ));
        } else if session.modes.transient {
            Self::draw_transient_preview(session, host);
        } else if let Some(delta) = session.throttle.submit(session.delta, now) {
            host.update_positions(&session.positions_at(delta), false);
        }

        if session.prevent_overlap {
            Self::refresh_near_edges(session, host);
        }
    }

    /// Commit the release delta and enter Settling.
    fn begin_settle(&mut self, release: Point, now: Instant, host: &mut dyn GraphHost) {
        let Phase::Dragging(session) = mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };
        let mut session = *session;
        session.throttle.cancel();
        session.delta = session.origin.delta_to(release);

        // Forced commit: the release delta always lands on real data, combo
        // bounds included.
        host.update_positions(&session.positions_at(session.delta), true);

        let probe = if self.config.update_combo_structure {
            self.next_probe += 1;
            let id = ProbeId::new(self.next_probe);
            let source = CancellationSource::new();
            host.request_hit_test(release, &session.ids(), id, source.token());
            Some(PendingProbe {
                id,
                deadline: now + DROP_PROBE_TIMEOUT,
                source,
            })
        } else {
            None
        };

        let mut debounce = Debounce::new(self.config.settle_debounce);
        debounce.arm((), now);

        debug!(delta = ?session.delta, "drag released, settling");
        self.phase = Phase::Settling(Box::new(SettleState {
            session,
            debounce,
            debounce_done: false,
            probe,
            resolved: None,
        }));
        self.try_settle(now, host);
    }

    /// Finish the settle once both the debounce and the probe are done.
    fn try_settle(&mut self, now: Instant, host: &mut dyn GraphHost) {
        let Phase::Settling(settle) = &mut self.phase else {
            return;
        };
        if settle.debounce.poll(now).is_some() {
            settle.debounce_done = true;
        }
        if let Some(probe) = &settle.probe
            && now >= probe.deadline
        {
            probe.source.cancel();
            debug!(probe = probe.id.get(), "drop probe timed out");
            settle.probe = None;
        }
        if settle.debounce_done && settle.probe_settled() {
            self.finish_settle(host);
        }
    }

    /// Restore pass: parent change, overlay removal, visibility restore,
    /// state clear, completion event. Returns the machine to Idle.
    fn finish_settle(&mut self, host: &mut dyn GraphHost) {
        let Phase::Settling(settle) = mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };
        let SettleState {
            mut session,
            resolved,
            ..
        } = *settle;

        if let Some(hit) = resolved {
            Self::apply_drop(&session, hit, host);
        }
        Self::clear_overlay(&session, host);
        Self::restore_hidden(&mut session, host);
        for id in session.ids() {
            host.set_state(&id, DRAGGING_STATE, false);
        }
        if let Some(name) = &self.config.event_name {
            host.emit(GraphEvent::new(name.clone(), session.ids()));
        }
        debug!("drag settled");
    }

    /// Escape path: restore everything, roll back positions when no
    /// preview mode absorbed the movement, emit nothing.
    fn cancel_drag(&mut self, host: &mut dyn GraphHost) {
        let Phase::Dragging(session) = mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };
        let mut session = *session;
        session.throttle.cancel();

        Self::clear_overlay(&session, host);
        Self::restore_hidden(&mut session, host);
        if session.modes.live() {
            host.update_positions(&session.origin_positions(), true);
        }
        for id in session.ids() {
            host.set_state(&id, DRAGGING_STATE, false);
        }
        debug!("drag cancelled");
    }
}

// ---------------------------------------------------------------------------
// Side-effect helpers
// ---------------------------------------------------------------------------

impl DragMachine {
    /// Hide related edges, combo ancestors, and non-dragged neighbors,
    /// recording each in the ledger.
    fn hide_surroundings(session: &mut DragSession, host: &mut dyn GraphHost) {
        let mut hidden: Vec<ItemId> = session.related_edges.clone();
        for t in &session.targets {
            let mut cursor = host.node(&t.id).and_then(|n| n.parent);
            while let Some(combo_id) = cursor {
                if hidden.contains(&combo_id) {
                    break;
                }
                cursor = host.combo(&combo_id).and_then(|c| c.parent);
                hidden.push(combo_id);
            }
            for neighbor in host.neighbors(&t.id) {
                if !session.contains(&neighbor) {
                    hidden.push(neighbor);
                }
            }
        }
        hidden.sort();
        hidden.dedup();
        for id in hidden {
            Self::hide_item(session, &id, host);
        }
    }

    /// Draw overlay copies of the selection and its edges, then hide the
    /// real items.
    fn enter_transient(session: &mut DragSession, host: &mut dyn GraphHost) {
        Self::draw_transient_preview(session, host);
        let ids: Vec<ItemId> = session
            .ids()
            .into_iter()
            .chain(session.related_edges.iter().cloned())
            .collect();
        for id in ids {
            Self::hide_item(session, &id, host);
        }
    }

    fn hide_item(session: &mut DragSession, id: &ItemId, host: &mut dyn GraphHost) {
        let shapes = host.visible_shapes(id);
        if shapes.is_empty() {
            return;
        }
        if session.ledger.record(id.clone(), shapes.clone()) {
            host.set_visibility(id, &shapes, false);
        }
    }

    /// Redraw overlay copies of every target and related edge at the
    /// current delta.
    fn draw_transient_preview(session: &DragSession, host: &mut dyn GraphHost) {
        let (dx, dy) = session.delta;
        for t in &session.targets {
            host.draw_transient(TransientSpec::new(
                TransientKey::Item(t.id.clone()),
                ShapeSpec::new(ShapeId::key(), ShapePayload::Rect(t.bounds.translate(dx, dy)))
                    .with_style(transient_node_style()),
            ));
        }
        for edge_id in &session.related_edges {
            let Some(edge) = host.edge(edge_id) else {
                warn!(id = %edge_id, "related edge vanished during drag");
                continue;
            };
            let Some(from) = Self::endpoint_position(session, &edge.source, &*host) else {
                continue;
            };
            let Some(to) = Self::endpoint_position(session, &edge.target, &*host) else {
                continue;
            };
            let svg = build_path(&[from, to], 0.0).to_svg();
            host.draw_transient(TransientSpec::new(
                TransientKey::Item(edge_id.clone()),
                ShapeSpec::new(ShapeId::key(), ShapePayload::Path(svg))
                    .with_style(transient_edge_style()),
            ));
        }
    }

    /// Overlap prevention: diff the avoidance edges near the moved
    /// selection against the previously hidden set, restore the ones out
    /// of range, hide newcomers, and redraw every near edge re-routed
    /// around the moved boxes.
    fn refresh_near_edges(session: &mut DragSession, host: &mut dyn GraphHost) {
        let area = session.moved_bounds().inflate(NEAR_EDGE_MARGIN);
        let candidates: Vec<ItemId> = host
            .edges_near(area)
            .into_iter()
            .filter(|id| {
                host.edge(id).is_some_and(|edge| {
                    edge.routing.avoidance_active()
                        && !session.contains(&edge.source)
                        && !session.contains(&edge.target)
                        && (session.near_hidden.contains(id) || host.is_visible(id))
                })
            })
            .collect();

        let still_near: AHashSet<ItemId> = candidates.iter().cloned().collect();
        let gone: Vec<ItemId> = session
            .near_hidden
            .iter()
            .filter(|id| !still_near.contains(*id))
            .cloned()
            .collect();
        for id in gone {
            session.near_hidden.remove(&id);
            host.remove_transient(&TransientKey::Item(id.clone()));
            if let Some(shapes) = session.ledger.take(&id) {
                host.set_visibility(&id, &shapes, true);
            }
        }

        if candidates.is_empty() {
            return;
        }

        let obstacles = Self::moved_obstacles(session, &*host);
        for id in candidates {
            if !session.near_hidden.contains(&id) {
                Self::hide_item(session, &id, host);
                session.near_hidden.insert(id.clone());
            }
            let Some(edge) = host.edge(&id) else {
                continue;
            };
            Self::draw_routed_transient(session, &edge, &obstacles, host);
        }
    }

    /// Obstacle snapshot with dragged boxes at their moved positions.
    fn moved_obstacles(session: &DragSession, host: &dyn GraphHost) -> ObstacleSet {
        let (dx, dy) = session.delta;
        let boxes: Vec<ObstacleBox> = host
            .node_ids()
            .into_iter()
            .filter_map(|id| {
                let bounds = match session.target(&id) {
                    Some(t) => t.bounds.translate(dx, dy),
                    None => host.bounds(&id)?,
                };
                if bounds.is_empty() {
                    None
                } else {
                    Some(ObstacleBox::new(id, bounds))
                }
            })
            .collect();
        ObstacleSet::from_boxes(boxes)
    }

    fn draw_routed_transient(
        session: &DragSession,
        edge: &EdgeData,
        obstacles: &ObstacleSet,
        host: &mut dyn GraphHost,
    ) {
        let Some(from) = Self::endpoint_position(session, &edge.source, &*host) else {
            return;
        };
        let Some(to) = Self::endpoint_position(session, &edge.target, &*host) else {
            return;
        };
        let mut points = Vec::with_capacity(edge.control_points.len() + 2);
        points.push(from);
        points.extend(edge.control_points.iter().copied());
        points.push(to);

        let config = RouterConfig::from_edge_routing(&edge.routing);
        let routed = route(&points, &edge.source, &edge.target, obstacles, &config);
        let svg = build_path(&routed, edge.routing.corner_radius).to_svg();
        host.draw_transient(TransientSpec::new(
            TransientKey::Item(edge.id.clone()),
            ShapeSpec::new(ShapeId::key(), ShapePayload::Path(svg))
                .with_style(transient_edge_style()),
        ));
    }

    /// An edge endpoint's current center: moved origin for dragged nodes,
    /// live host position otherwise.
    fn endpoint_position(
        session: &DragSession,
        id: &ItemId,
        host: &dyn GraphHost,
    ) -> Option<Point> {
        if let Some(t) = session.target(id) {
            let (dx, dy) = session.delta;
            return Some(t.origin.translate(dx, dy));
        }
        match host.node(id) {
            Some(node) => Some(node.position),
            None => {
                warn!(id = %id, "edge endpoint missing, skipping redraw");
                None
            }
        }
    }

    /// Resolve and apply the parent change implied by the drop target.
    fn apply_drop(session: &DragSession, hit: Option<DropTarget>, host: &mut dyn GraphHost) {
        let new_parent: Option<ItemId> = match hit {
            None => None,
            Some(target) => match target.kind {
                ItemKind::Combo => Some(target.id),
                ItemKind::Node => match host.node(&target.id) {
                    Some(node) => node.parent,
                    None => {
                        warn!(id = %target.id, "drop target vanished, keeping parents");
                        return;
                    }
                },
                ItemKind::Edge => return,
            },
        };
        for id in session.ids() {
            let Some(node) = host.node(&id) else {
                warn!(id = %id, "dragged node vanished before reparenting");
                continue;
            };
            if node.parent != new_parent {
                host.set_parent(&id, new_parent.as_ref());
            }
        }
    }

    fn clear_overlay(session: &DragSession, host: &mut dyn GraphHost) {
        if session.modes.delegate {
            host.remove_transient(&TransientKey::Delegate);
        }
        if session.modes.transient {
            for id in session.ids() {
                host.remove_transient(&TransientKey::Item(id));
            }
            for id in &session.related_edges {
                host.remove_transient(&TransientKey::Item(id.clone()));
            }
        }
        for id in &session.near_hidden {
            host.remove_transient(&TransientKey::Item(id.clone()));
        }
    }

    fn restore_hidden(session: &mut DragSession, host: &mut dyn GraphHost) {
        for (id, shapes) in session.ledger.drain() {
            if host.node(&id).is_none() && host.edge(&id).is_none() && host.combo(&id).is_none() {
                warn!(id = %id, "hidden item vanished during gesture, skipping restore");
                continue;
            }
            host.set_visibility(&id, &shapes, true);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
