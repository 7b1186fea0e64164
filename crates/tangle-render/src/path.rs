#![forbid(unsafe_code)]

//! Polyline to path-primitive conversion with corner rounding.

use std::fmt::Write as _;

use tangle_core::Point;

/// Corners sharper than this cross product are treated as straight runs.
const COLLINEAR_EPS: f64 = 1e-9;

/// One drawing instruction of a [`PathPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic bezier used for rounded corners; `ctrl` is the original
    /// waypoint the corner cuts.
    QuadTo { ctrl: Point, to: Point },
}

/// Device-independent path geometry for one edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathPrimitive {
    segments: Vec<PathSegment>,
}

impl PathPrimitive {
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Encode as an SVG path string, two decimals per coordinate.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            match segment {
                PathSegment::MoveTo(p) => {
                    let _ = write!(out, "M {:.2} {:.2}", p.x, p.y);
                }
                PathSegment::LineTo(p) => {
                    let _ = write!(out, "L {:.2} {:.2}", p.x, p.y);
                }
                PathSegment::QuadTo { ctrl, to } => {
                    let _ = write!(out, "Q {:.2} {:.2} {:.2} {:.2}", ctrl.x, ctrl.y, to.x, to.y);
                }
            }
        }
        out
    }
}

/// Build path geometry for a polyline, rounding every interior corner by
/// `corner_radius`. The radius is clamped per corner so the rounded arc
/// never consumes more than half of either adjacent segment, which keeps
/// neighbouring corners from overlapping.
///
/// ```
/// use tangle_core::Point;
/// use tangle_render::build_path;
///
/// let path = build_path(
///     &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
///     4.0,
/// );
/// assert_eq!(
///     path.to_svg(),
///     "M 0.00 0.00 L 6.00 0.00 Q 10.00 0.00 10.00 4.00 L 10.00 10.00"
/// );
/// ```
#[must_use]
pub fn build_path(points: &[Point], corner_radius: f64) -> PathPrimitive {
    let mut segments = Vec::with_capacity(points.len() + 2);
    let Some(first) = points.first() else {
        return PathPrimitive { segments };
    };
    segments.push(PathSegment::MoveTo(*first));

    if corner_radius <= 0.0 || points.len() < 3 {
        for p in &points[1..] {
            segments.push(PathSegment::LineTo(*p));
        }
        return PathPrimitive { segments };
    }

    for idx in 1..points.len() - 1 {
        let before = points[idx - 1];
        let corner = points[idx];
        let after = points[idx + 1];
        let len_in = before.distance(corner);
        let len_out = corner.distance(after);
        let cross = (corner.x - before.x) * (after.y - corner.y)
            - (corner.y - before.y) * (after.x - corner.x);
        let radius = corner_radius.min(len_in / 2.0).min(len_out / 2.0);
        if radius <= 0.0 || cross.abs() <= COLLINEAR_EPS {
            segments.push(PathSegment::LineTo(corner));
            continue;
        }
        let entry = Point::new(
            corner.x + (before.x - corner.x) * (radius / len_in),
            corner.y + (before.y - corner.y) * (radius / len_in),
        );
        let exit = Point::new(
            corner.x + (after.x - corner.x) * (radius / len_out),
            corner.y + (after.y - corner.y) * (radius / len_out),
        );
        segments.push(PathSegment::LineTo(entry));
        segments.push(PathSegment::QuadTo {
            ctrl: corner,
            to: exit,
        });
    }
    segments.push(PathSegment::LineTo(points[points.len() - 1]));
    PathPrimitive { segments }
}
