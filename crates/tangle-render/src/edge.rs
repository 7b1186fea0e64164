#![forbid(unsafe_code)]

//! Edge drawing: routing decision, key path, and sub-shape upkeep.
//!
//! `draw_edge` owns the full redraw of one edge: it decides whether the
//! router runs, builds the rounded path, and then reconciles the edge's
//! sub-shapes against the sink. Optional decorations (halo, arrows,
//! label, icon) are upserted when the model declares them and removed
//! when it no longer does, so redraws never leave orphaned shapes.

use tangle_core::{
    EdgeData, EdgeRouting, Point, ShapeId, ShapePayload, ShapeSink, ShapeSpec, ShapeStyle,
};
use tangle_route::{ObstacleSet, RouterConfig, route};

use crate::path::build_path;

/// Stroke width multiplier for the halo beneath the key path.
const HALO_WIDTH_FACTOR: f64 = 3.0;
const HALO_OPACITY: f64 = 0.25;
/// Icon badge placement relative to the label anchor.
const ICON_OFFSET: f64 = 12.0;
const ICON_RADIUS: f64 = 6.0;
/// Arrow head half-width as a fraction of its length.
const ARROW_WIDTH_RATIO: f64 = 0.5;

/// Draws edges into a [`ShapeSink`].
///
/// The renderer is stateless between calls; per-edge configuration
/// arrives with the [`EdgeData`] model and the styles configured here
/// apply to every edge it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRenderer {
    /// Base style of the key path.
    pub edge_style: ShapeStyle,
    /// Fill color for arrow heads; falls back to the key stroke.
    pub arrow_fill: Option<String>,
}

impl Default for EdgeRenderer {
    fn default() -> Self {
        Self {
            edge_style: ShapeStyle::stroked("#99ADD1", 1.0),
            arrow_fill: None,
        }
    }
}

impl EdgeRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the polyline an edge should follow.
    ///
    /// Explicit control points win over the router unless the edge asks
    /// for the avoidance strategy, in which case the router replaces the
    /// interior with its own waypoints.
    #[must_use]
    pub fn route_points(
        &self,
        edge: &EdgeData,
        source_point: Point,
        target_point: Point,
        routing: &EdgeRouting,
        obstacles: &ObstacleSet,
    ) -> Vec<Point> {
        let mut points = Vec::with_capacity(edge.control_points.len() + 2);
        points.push(source_point);
        points.extend(edge.control_points.iter().copied());
        points.push(target_point);
        if !edge.control_points.is_empty() && !routing.avoidance_active() {
            return points;
        }
        let config = RouterConfig::from_edge_routing(routing);
        route(&points, &edge.source, &edge.target, obstacles, &config)
    }

    /// Redraw one edge into the sink.
    ///
    /// Upserts the key path plus every declared decoration and removes
    /// the decorations the model stopped declaring.
    pub fn draw_edge(
        &self,
        edge: &EdgeData,
        source_point: Point,
        target_point: Point,
        routing: &EdgeRouting,
        obstacles: &ObstacleSet,
        sink: &mut dyn ShapeSink,
    ) {
        let points = self.route_points(edge, source_point, target_point, routing, obstacles);
        let svg = build_path(&points, routing.corner_radius).to_svg();

        if edge.halo {
            let style = ShapeStyle {
                stroke: self.edge_style.stroke.clone(),
                stroke_width: self.edge_style.stroke_width * HALO_WIDTH_FACTOR,
                opacity: HALO_OPACITY,
                ..ShapeStyle::default()
            };
            sink.upsert_shape(
                &edge.id,
                ShapeSpec::new(ShapeId::halo(), ShapePayload::Path(svg.clone())).with_style(style),
            );
        } else {
            sink.remove_shape(&edge.id, &ShapeId::halo());
        }

        sink.upsert_shape(
            &edge.id,
            ShapeSpec::new(ShapeId::key(), ShapePayload::Path(svg))
                .with_style(self.edge_style.clone()),
        );

        self.sync_arrow(edge, &points, true, sink);
        self.sync_arrow(edge, &points, false, sink);

        let anchor = label_anchor(&points);
        match (&edge.label, anchor) {
            (Some(content), Some(position)) => {
                sink.upsert_shape(
                    &edge.id,
                    ShapeSpec::new(
                        ShapeId::label(),
                        ShapePayload::Text {
                            position,
                            content: content.clone(),
                        },
                    ),
                );
            }
            _ => sink.remove_shape(&edge.id, &ShapeId::label()),
        }
        match (edge.icon, anchor) {
            (true, Some(position)) => {
                let style = ShapeStyle::filled(self.arrow_color());
                sink.upsert_shape(
                    &edge.id,
                    ShapeSpec::new(
                        ShapeId::icon(),
                        ShapePayload::Circle {
                            center: position.translate(-ICON_OFFSET, 0.0),
                            radius: ICON_RADIUS,
                        },
                    )
                    .with_style(style),
                );
            }
            _ => sink.remove_shape(&edge.id, &ShapeId::icon()),
        }
    }

    fn sync_arrow(&self, edge: &EdgeData, points: &[Point], at_source: bool, sink: &mut dyn ShapeSink) {
        let (shape, wanted) = if at_source {
            (ShapeId::arrow_source(), edge.arrows.source)
        } else {
            (ShapeId::arrow_target(), edge.arrows.target)
        };
        let triangle = wanted
            .then(|| arrow_path(points, at_source, edge.arrows.size))
            .flatten();
        match triangle {
            Some(svg) => {
                let style = ShapeStyle::filled(self.arrow_color());
                sink.upsert_shape(
                    &edge.id,
                    ShapeSpec::new(shape, ShapePayload::Path(svg)).with_style(style),
                );
            }
            None => sink.remove_shape(&edge.id, &shape),
        }
    }

    fn arrow_color(&self) -> &str {
        self.arrow_fill
            .as_deref()
            .or(self.edge_style.stroke.as_deref())
            .unwrap_or("#99ADD1")
    }
}

/// Anchor for the label and icon: midpoint of the middle segment.
fn label_anchor(points: &[Point]) -> Option<Point> {
    if points.len() < 2 {
        return None;
    }
    let mid = (points.len() - 1) / 2;
    Some(points[mid].midpoint(points[mid + 1]))
}

/// Filled triangle at one path end, oriented along the terminal segment.
/// `None` when the path is too degenerate to orient an arrow.
fn arrow_path(points: &[Point], at_source: bool, size: f64) -> Option<String> {
    if points.len() < 2 || size <= 0.0 {
        return None;
    }
    let (tip, inward) = if at_source {
        (points[0], points.iter().skip(1).copied().find(|p| *p != points[0])?)
    } else {
        let last = points[points.len() - 1];
        (
            last,
            points.iter().rev().skip(1).copied().find(|p| *p != last)?,
        )
    };
    let length = tip.distance(inward);
    if length <= f64::EPSILON {
        return None;
    }
    let dx = (inward.x - tip.x) / length;
    let dy = (inward.y - tip.y) / length;
    let base = Point::new(tip.x + dx * size, tip.y + dy * size);
    let half = size * ARROW_WIDTH_RATIO;
    let left = Point::new(base.x - dy * half, base.y + dx * half);
    let right = Point::new(base.x + dy * half, base.y - dx * half);
    Some(format!(
        "M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} Z",
        tip.x, tip.y, left.x, left.y, right.x, right.y
    ))
}
