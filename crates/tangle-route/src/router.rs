#![forbid(unsafe_code)]

//! Grid A* search between two edge anchors.
//!
//! The router rasterizes the neighbourhood of an edge into a uniform
//! grid, marks every cell overlapped by a third-party obstacle box as
//! blocked, and runs A* with Manhattan costs over the free cells. A
//! direction change costs extra, so the search prefers long straight
//! runs. Whenever the search cannot produce an answer (no grid, blocked
//! anchors, exhausted budget) the caller's polyline is returned
//! unchanged; infeasibility is never an error.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tangle_core::{EdgeRouting, ItemId, Point, Rect, RouteStrategy};

#[cfg(feature = "tracing")]
use tangle_core::logging::debug;
#[cfg(not(feature = "tracing"))]
use tangle_core::debug;

use crate::obstacles::ObstacleSet;

/// Fixed-point scale applied to world lengths before integer cost math.
const COST_SCALE: f64 = 1000.0;
/// Smallest permitted grid cell, in world units.
const GRID_CELL_MIN: f64 = 4.0;
/// Free cells kept around the routed area so paths can leave the bounding box.
const GRID_MARGIN_CELLS: f64 = 2.0;
/// Upper bound on grid size; larger areas keep the direct polyline.
const MAX_GRID_CELLS: usize = 65_536;
/// Two waypoints closer than this per axis are considered the same point.
const WAYPOINT_EPS: f64 = 1e-4;

/// Neighbour offsets in expansion order: up, down, left, right.
const DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Search tuning for [`route`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Routing strategy requested for the edge.
    pub strategy: RouteStrategy,
    /// Route around third-party boxes when the strategy is orthogonal.
    pub avoid_obstacles: bool,
    /// Cell size of the search grid, in world units.
    pub grid_size: f64,
    /// Margin added around every obstacle box before cells are blocked.
    pub offset: f64,
    /// Cost of a 90 degree turn, in grid steps.
    pub turn_penalty: f64,
    /// Upper bound on heap expansions before the search gives up.
    pub max_steps: u32,
}

impl RouterConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: RouteStrategy::Direct,
            avoid_obstacles: false,
            grid_size: 10.0,
            offset: 2.0,
            turn_penalty: 0.5,
            max_steps: 10_000,
        }
    }

    /// Per-edge configuration: strategy, avoidance flag, and obstacle
    /// margin come from the edge, search tuning keeps its defaults.
    #[must_use]
    pub fn from_edge_routing(routing: &EdgeRouting) -> Self {
        Self {
            strategy: routing.strategy,
            avoid_obstacles: routing.avoid_obstacles,
            offset: routing.offset,
            ..Self::new()
        }
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: RouteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_avoid_obstacles(mut self, avoid: bool) -> Self {
        self.avoid_obstacles = avoid;
        self
    }

    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub const fn with_turn_penalty(mut self, turn_penalty: f64) -> Self {
        self.turn_penalty = turn_penalty;
        self
    }

    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// True when the configuration actually asks for obstacle avoidance.
    #[must_use]
    pub const fn avoidance_active(&self) -> bool {
        matches!(self.strategy, RouteStrategy::Orthogonal) && self.avoid_obstacles
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform grid with third-party obstacle cells pre-blocked.
struct RoutingGrid {
    cell: f64,
    min_x: f64,
    min_y: f64,
    cols: i32,
    rows: i32,
    blocked: Vec<bool>,
}

impl RoutingGrid {
    /// Build a grid covering the anchors and every obstacle box. Boxes
    /// other than the source's and target's own are inflated by
    /// `config.offset` and baked into the blocked set. Returns `None`
    /// when the area would exceed the cell budget.
    fn build(
        anchors: &[Point],
        source: &ItemId,
        target: &ItemId,
        obstacles: &ObstacleSet,
        config: &RouterConfig,
    ) -> Option<Self> {
        let cell = config.grid_size.max(GRID_CELL_MIN);
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in anchors {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        for obstacle in obstacles.iter() {
            let inflated = obstacle.bounds.inflate(config.offset);
            if !inflated.is_finite() {
                continue;
            }
            min_x = min_x.min(inflated.left());
            min_y = min_y.min(inflated.top());
            max_x = max_x.max(inflated.right());
            max_y = max_y.max(inflated.bottom());
        }
        if min_x > max_x || min_y > max_y {
            return None;
        }
        let margin = cell * GRID_MARGIN_CELLS;
        min_x -= margin;
        min_y -= margin;
        max_x += margin;
        max_y += margin;
        let cols = ((max_x - min_x) / cell).ceil() as i32 + 1;
        let rows = ((max_y - min_y) / cell).ceil() as i32 + 1;
        if cols <= 1 || rows <= 1 {
            return None;
        }
        let total = (cols as usize).checked_mul(rows as usize)?;
        if total > MAX_GRID_CELLS {
            return None;
        }
        let mut grid = Self {
            cell,
            min_x,
            min_y,
            cols,
            rows,
            blocked: vec![false; total],
        };
        for obstacle in obstacles.iter() {
            if obstacle.id == *source || obstacle.id == *target {
                continue;
            }
            let inflated = obstacle.bounds.inflate(config.offset);
            if inflated.is_finite() {
                grid.block(&inflated);
            }
        }
        Some(grid)
    }

    /// Mark every cell whose rect overlaps `area` as blocked.
    fn block(&mut self, area: &Rect) {
        let first_x = ((area.left() - self.min_x) / self.cell).floor().max(0.0) as i32;
        let last_x = (((area.right() - self.min_x) / self.cell).floor())
            .min(f64::from(self.cols - 1)) as i32;
        let first_y = ((area.top() - self.min_y) / self.cell).floor().max(0.0) as i32;
        let last_y = (((area.bottom() - self.min_y) / self.cell).floor())
            .min(f64::from(self.rows - 1)) as i32;
        for iy in first_y..=last_y {
            for ix in first_x..=last_x {
                if area.intersects(&self.cell_rect(ix, iy)) {
                    let idx = self.index(ix, iy);
                    self.blocked[idx] = true;
                }
            }
        }
    }

    fn index(&self, ix: i32, iy: i32) -> usize {
        (iy * self.cols + ix) as usize
    }

    fn cell_for_point(&self, p: Point) -> Option<(i32, i32)> {
        let ix = ((p.x - self.min_x) / self.cell).floor() as i32;
        let iy = ((p.y - self.min_y) / self.cell).floor() as i32;
        if ix < 0 || iy < 0 || ix >= self.cols || iy >= self.rows {
            return None;
        }
        Some((ix, iy))
    }

    fn cell_center(&self, ix: i32, iy: i32) -> Point {
        Point::new(
            self.min_x + (f64::from(ix) + 0.5) * self.cell,
            self.min_y + (f64::from(iy) + 0.5) * self.cell,
        )
    }

    fn cell_rect(&self, ix: i32, iy: i32) -> Rect {
        Rect::new(
            self.min_x + f64::from(ix) * self.cell,
            self.min_y + f64::from(iy) * self.cell,
            self.cell,
            self.cell,
        )
    }

    fn is_blocked(&self, ix: i32, iy: i32) -> bool {
        self.blocked[self.index(ix, iy)]
    }
}

/// One search state: a grid cell entered while traveling `dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridState {
    x: i32,
    y: i32,
    dir: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridEntry {
    est: u32,
    cost: u32,
    state: GridState,
}

impl Ord for GridEntry {
    // BinaryHeap is a max-heap, so the estimate comparison is reversed.
    // The coordinate tie-breaks make pop order fully deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .est
            .cmp(&self.est)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| self.state.y.cmp(&other.state.y))
            .then_with(|| self.state.x.cmp(&other.state.x))
            .then_with(|| self.state.dir.cmp(&other.state.dir))
    }
}

impl PartialOrd for GridEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Route an edge polyline around third-party obstacle boxes.
///
/// `points` is the anchor-to-anchor polyline: source anchor first, any
/// explicit control points in between, target anchor last. When the
/// configuration does not ask for avoidance, or the search cannot
/// produce an answer, the input is returned unchanged. When a path is
/// found the router replaces the interior with its own axis-aligned
/// waypoints, none of which lies inside a third-party box, and keeps
/// the exact anchors at both ends. Identical inputs always produce the
/// identical output.
///
/// ```
/// use tangle_core::{ItemId, Point, Rect, RouteStrategy};
/// use tangle_route::{ObstacleBox, ObstacleSet, RouterConfig, route};
///
/// let obstacles = ObstacleSet::from_boxes(vec![ObstacleBox::new(
///     ItemId::new("wall"),
///     Rect::new(40.0, 40.0, 20.0, 20.0),
/// )]);
/// let config = RouterConfig::new()
///     .with_strategy(RouteStrategy::Orthogonal)
///     .with_avoid_obstacles(true);
/// let out = route(
///     &[Point::new(0.0, 0.0), Point::new(100.0, 100.0)],
///     &ItemId::new("a"),
///     &ItemId::new("b"),
///     &obstacles,
///     &config,
/// );
/// assert_eq!(out.first(), Some(&Point::new(0.0, 0.0)));
/// assert_eq!(out.last(), Some(&Point::new(100.0, 100.0)));
/// assert!(out.len() > 2, "the wall forces interior waypoints");
/// ```
#[must_use]
pub fn route(
    points: &[Point],
    source: &ItemId,
    target: &ItemId,
    obstacles: &ObstacleSet,
    config: &RouterConfig,
) -> Vec<Point> {
    if points.len() < 2
        || !config.avoidance_active()
        || source == target
        || obstacles.is_empty()
        || points.iter().any(|p| !p.is_finite())
    {
        return points.to_vec();
    }
    let start = points[0];
    let goal = points[points.len() - 1];
    match route_avoiding(start, goal, source, target, obstacles, config) {
        Some(path) => path,
        None => {
            debug!(
                source = source.as_str(),
                target = target.as_str(),
                "no grid route, keeping direct polyline"
            );
            points.to_vec()
        }
    }
}

fn route_avoiding(
    start: Point,
    goal: Point,
    source: &ItemId,
    target: &ItemId,
    obstacles: &ObstacleSet,
    config: &RouterConfig,
) -> Option<Vec<Point>> {
    let grid = RoutingGrid::build(&[start, goal], source, target, obstacles, config)?;
    let start_cell = grid.cell_for_point(start)?;
    let goal_cell = grid.cell_for_point(goal)?;
    if start_cell == goal_cell {
        return None;
    }
    // An anchor under a third-party box would force the path to end on
    // a blocked cell, so that query keeps the direct polyline.
    if grid.is_blocked(start_cell.0, start_cell.1) || grid.is_blocked(goal_cell.0, goal_cell.1) {
        return None;
    }
    let cells = search(&grid, start_cell, goal_cell, config)?;
    Some(assemble(&grid, &cells, start, goal))
}

/// A* over the free cells. Returns the cell chain from start to goal,
/// or `None` when the budget runs out before the goal is reached.
fn search(
    grid: &RoutingGrid,
    start: (i32, i32),
    goal: (i32, i32),
    config: &RouterConfig,
) -> Option<Vec<(i32, i32)>> {
    let step_cost = (grid.cell * COST_SCALE).round() as u32;
    let turn_cost = (config.turn_penalty.max(0.0) * grid.cell * COST_SCALE).round() as u32;
    let states = (grid.cols as usize) * (grid.rows as usize) * 4;
    let mut best = vec![u32::MAX; states];
    let mut prev: Vec<Option<GridState>> = vec![None; states];
    let mut heap = BinaryHeap::new();

    for dir in 0..4u8 {
        let idx = grid.index(start.0, start.1) * 4 + dir as usize;
        best[idx] = 0;
        heap.push(GridEntry {
            est: 0,
            cost: 0,
            state: GridState {
                x: start.0,
                y: start.1,
                dir,
            },
        });
    }

    let mut found: Option<GridState> = None;
    let mut steps = 0u32;
    while let Some(GridEntry { cost, state, .. }) = heap.pop() {
        steps += 1;
        if steps > config.max_steps {
            break;
        }
        let state_idx = grid.index(state.x, state.y) * 4 + state.dir as usize;
        if cost != best[state_idx] {
            continue;
        }
        if (state.x, state.y) == goal {
            found = Some(state);
            break;
        }
        // Expand the current heading first, so an equal-cost straight
        // continuation claims the predecessor slot before a turn can.
        for turn in 0..4u8 {
            let dir = (state.dir + turn) % 4;
            let (dx, dy) = DIRS[dir as usize];
            let nx = state.x + dx;
            let ny = state.y + dy;
            if nx < 0 || ny < 0 || nx >= grid.cols || ny >= grid.rows {
                continue;
            }
            if grid.is_blocked(nx, ny) {
                continue;
            }
            let mut next_cost = cost.saturating_add(step_cost);
            if dir != state.dir {
                next_cost = next_cost.saturating_add(turn_cost);
            }
            let next_idx = grid.index(nx, ny) * 4 + dir as usize;
            if next_cost >= best[next_idx] {
                continue;
            }
            best[next_idx] = next_cost;
            prev[next_idx] = Some(state);
            let remaining = (nx - goal.0).unsigned_abs() + (ny - goal.1).unsigned_abs();
            heap.push(GridEntry {
                est: next_cost.saturating_add(remaining.saturating_mul(step_cost)),
                cost: next_cost,
                state: GridState { x: nx, y: ny, dir },
            });
        }
    }

    let mut state = found?;
    let mut cells = Vec::new();
    loop {
        cells.push((state.x, state.y));
        let idx = grid.index(state.x, state.y) * 4 + state.dir as usize;
        match prev[idx] {
            Some(previous) => state = previous,
            None => break,
        }
    }
    cells.reverse();
    Some(cells)
}

/// Stitch the exact anchors onto the cell-center chain and compress the
/// result. The stub between an anchor and its first cell center is split
/// into two axis-aligned legs, longer axis first, so the whole path
/// stays orthogonal.
fn assemble(grid: &RoutingGrid, cells: &[(i32, i32)], start: Point, goal: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(cells.len() + 4);
    out.push(start);
    if let Some(&(ix, iy)) = cells.first() {
        out.push(stub_elbow(start, grid.cell_center(ix, iy)));
    }
    for &(ix, iy) in cells {
        out.push(grid.cell_center(ix, iy));
    }
    if let Some(&(ix, iy)) = cells.last() {
        out.push(stub_elbow(goal, grid.cell_center(ix, iy)));
    }
    out.push(goal);
    compress(&out)
}

fn stub_elbow(anchor: Point, center: Point) -> Point {
    let dx = (center.x - anchor.x).abs();
    let dy = (center.y - anchor.y).abs();
    if dx >= dy {
        Point::new(center.x, anchor.y)
    } else {
        Point::new(anchor.x, center.y)
    }
}

/// Drop near-duplicate and collinear waypoints. Grid paths are
/// axis-aligned, so collinearity is a per-axis comparison.
fn compress(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    out.push(points[0]);
    for idx in 1..points.len() - 1 {
        let prev = out[out.len() - 1];
        let curr = points[idx];
        if (curr.x - prev.x).abs() <= WAYPOINT_EPS && (curr.y - prev.y).abs() <= WAYPOINT_EPS {
            continue;
        }
        let next = points[idx + 1];
        let same_column =
            (curr.x - prev.x).abs() <= WAYPOINT_EPS && (next.x - curr.x).abs() <= WAYPOINT_EPS;
        let same_row =
            (curr.y - prev.y).abs() <= WAYPOINT_EPS && (next.y - curr.y).abs() <= WAYPOINT_EPS;
        if same_column || same_row {
            continue;
        }
        out.push(curr);
    }
    let last = points[points.len() - 1];
    let tail = out[out.len() - 1];
    if (last.x - tail.x).abs() <= WAYPOINT_EPS && (last.y - tail.y).abs() <= WAYPOINT_EPS {
        // Keep the exact anchor rather than a waypoint that merely
        // lands near it.
        let tail_idx = out.len() - 1;
        out[tail_idx] = last;
    } else {
        out.push(last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacles::ObstacleBox;

    fn id(name: &str) -> ItemId {
        ItemId::new(name)
    }

    fn avoiding() -> RouterConfig {
        RouterConfig::new()
            .with_strategy(RouteStrategy::Orthogonal)
            .with_avoid_obstacles(true)
    }

    fn single_box() -> ObstacleSet {
        ObstacleSet::from_boxes(vec![ObstacleBox::new(
            id("blocker"),
            Rect::new(40.0, 40.0, 20.0, 20.0),
        )])
    }

    fn assert_orthogonal(path: &[Point]) {
        for pair in path.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            assert!(
                dx <= WAYPOINT_EPS || dy <= WAYPOINT_EPS,
                "diagonal segment {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn inactive_config_passes_through() {
        let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let direct = RouterConfig::new();
        assert_eq!(
            route(&points, &id("a"), &id("b"), &single_box(), &direct),
            points
        );
        let orthogonal_no_avoid =
            RouterConfig::new().with_strategy(RouteStrategy::Orthogonal);
        assert_eq!(
            route(&points, &id("a"), &id("b"), &single_box(), &orthogonal_no_avoid),
            points
        );
    }

    #[test]
    fn passthrough_keeps_control_points() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 80.0),
            Point::new(100.0, 100.0),
        ];
        let out = route(&points, &id("a"), &id("b"), &single_box(), &RouterConfig::new());
        assert_eq!(out, points);
    }

    #[test]
    fn degenerate_inputs_pass_through() {
        let config = avoiding();
        let obstacles = single_box();
        assert!(route(&[], &id("a"), &id("b"), &obstacles, &config).is_empty());
        let one = vec![Point::new(5.0, 5.0)];
        assert_eq!(route(&one, &id("a"), &id("b"), &obstacles, &config), one);
        let self_edge = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        assert_eq!(
            route(&self_edge, &id("a"), &id("a"), &obstacles, &config),
            self_edge
        );
        let bad = vec![Point::new(f64::NAN, 0.0), Point::new(100.0, 100.0)];
        let out = route(&bad, &id("a"), &id("b"), &obstacles, &config);
        assert!(out[0].x.is_nan());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn no_obstacles_passes_through() {
        let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let empty = ObstacleSet::default();
        assert_eq!(route(&points, &id("a"), &id("b"), &empty, &avoiding()), points);
    }

    #[test]
    fn routes_around_a_box() {
        let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let out = route(&points, &id("a"), &id("b"), &single_box(), &avoiding());

        assert!(out.len() > 2, "expected routed waypoints, got {out:?}");
        assert_eq!(out[0], Point::new(0.0, 0.0));
        assert_eq!(out[out.len() - 1], Point::new(100.0, 100.0));
        assert_orthogonal(&out);
        for p in &out {
            let inside_box =
                p.x >= 40.0 && p.x <= 60.0 && p.y >= 40.0 && p.y <= 60.0;
            assert!(!inside_box, "waypoint {p:?} crosses the obstacle");
        }
    }

    #[test]
    fn routing_is_deterministic() {
        let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let boxes = vec![
            ObstacleBox::new(id("n1"), Rect::new(40.0, 40.0, 20.0, 20.0)),
            ObstacleBox::new(id("n2"), Rect::new(10.0, 60.0, 15.0, 15.0)),
            ObstacleBox::new(id("n3"), Rect::new(70.0, 20.0, 12.0, 12.0)),
        ];
        let forward = ObstacleSet::from_boxes(boxes.clone());
        let reversed = ObstacleSet::from_boxes(boxes.into_iter().rev().collect());
        let config = avoiding();

        let first = route(&points, &id("a"), &id("b"), &forward, &config);
        let second = route(&points, &id("a"), &id("b"), &forward, &config);
        let shuffled = route(&points, &id("a"), &id("b"), &reversed, &config);
        assert_eq!(first, second);
        assert_eq!(first, shuffled);
    }

    #[test]
    fn own_boxes_do_not_block() {
        let boxes = vec![
            ObstacleBox::new(id("a"), Rect::new(0.0, 0.0, 20.0, 20.0)),
            ObstacleBox::new(id("b"), Rect::new(90.0, 90.0, 20.0, 20.0)),
            ObstacleBox::new(id("blocker"), Rect::new(40.0, 40.0, 20.0, 20.0)),
        ];
        let obstacles = ObstacleSet::from_boxes(boxes);
        let points = vec![Point::new(10.0, 10.0), Point::new(100.0, 100.0)];
        let out = route(&points, &id("a"), &id("b"), &obstacles, &avoiding());

        assert!(out.len() > 2, "anchors on own boxes must still route: {out:?}");
        for p in &out[1..out.len() - 1] {
            assert!(
                !Rect::new(40.0, 40.0, 20.0, 20.0).contains(*p),
                "waypoint {p:?} inside third-party box"
            );
        }
    }

    #[test]
    fn anchors_in_same_cell_pass_through() {
        let obstacles = ObstacleSet::from_boxes(vec![ObstacleBox::new(
            id("far"),
            Rect::new(500.0, 500.0, 20.0, 20.0),
        )]);
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 3.0)];
        assert_eq!(
            route(&points, &id("a"), &id("b"), &obstacles, &avoiding()),
            points
        );
    }

    #[test]
    fn blocked_anchor_passes_through() {
        // The goal anchor sits inside a third-party box.
        let points = vec![Point::new(0.0, 0.0), Point::new(50.0, 50.0)];
        assert_eq!(
            route(&points, &id("a"), &id("b"), &single_box(), &avoiding()),
            points
        );
    }

    #[test]
    fn exhausted_budget_passes_through() {
        let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let config = avoiding().with_max_steps(1);
        assert_eq!(
            route(&points, &id("a"), &id("b"), &single_box(), &config),
            points
        );
    }

    #[test]
    fn turn_penalty_keeps_paths_simple() {
        let points = vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let out = route(&points, &id("a"), &id("b"), &single_box(), &avoiding());
        // Going around one box needs a handful of bends, not a staircase.
        assert!(out.len() <= 8, "too many waypoints: {out:?}");
    }

    #[test]
    fn from_edge_routing_maps_fields() {
        let routing = EdgeRouting::orthogonal_avoiding().with_offset(4.0);
        let config = RouterConfig::from_edge_routing(&routing);
        assert_eq!(config.strategy, RouteStrategy::Orthogonal);
        assert!(config.avoid_obstacles);
        assert_eq!(config.offset, 4.0);
        assert_eq!(config.grid_size, 10.0);
        assert!(config.avoidance_active());
    }

    #[test]
    fn grid_blocks_inflated_boxes() {
        let obstacles = single_box();
        let config = avoiding();
        let anchors = [Point::new(0.0, 0.0), Point::new(100.0, 100.0)];
        let grid = RoutingGrid::build(&anchors, &id("a"), &id("b"), &obstacles, &config)
            .expect("grid");

        let blocked_cell = grid.cell_for_point(Point::new(50.0, 50.0)).expect("cell");
        assert!(grid.is_blocked(blocked_cell.0, blocked_cell.1));
        let free_cell = grid.cell_for_point(Point::new(0.0, 0.0)).expect("cell");
        assert!(!grid.is_blocked(free_cell.0, free_cell.1));
        // Inflation by the offset blocks the cell just outside the box.
        let fringe = grid.cell_for_point(Point::new(38.5, 50.0)).expect("cell");
        assert!(grid.is_blocked(fringe.0, fringe.1));
    }

    #[test]
    fn compress_drops_duplicates_and_collinear_runs() {
        let noisy = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 8.0),
        ];
        let out = compress(&noisy);
        assert_eq!(
            out,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 8.0)]
        );
    }

    #[test]
    fn compress_reanchors_the_exact_goal() {
        // A waypoint that merely lands near the goal collapses into it.
        let drifted = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(5.00005, 5.00005),
        ];
        let out = compress(&drifted);
        assert_eq!(
            out,
            vec![Point::new(0.0, 0.0), Point::new(5.00005, 5.00005)]
        );
    }
}
