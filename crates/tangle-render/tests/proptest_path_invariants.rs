//! Property-based invariant tests for the path builder.
//!
//! 1. The path starts at the first input point and ends at the last
//! 2. Rounded corners never consume more than the requested radius
//! 3. Finite inputs never produce non-finite geometry

use proptest::prelude::*;
use tangle_core::Point;
use tangle_render::{PathSegment, build_path};

fn polyline() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(
        (-200i32..200, -200i32..200).prop_map(|(x, y)| Point::new(f64::from(x), f64::from(y))),
        2..10,
    )
}

fn radius() -> impl Strategy<Value = f64> {
    (0u32..30).prop_map(f64::from)
}

fn segment_end(segment: &PathSegment) -> Point {
    match segment {
        PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
        PathSegment::QuadTo { to, .. } => *to,
    }
}

proptest! {
    #[test]
    fn endpoints_are_preserved(points in polyline(), r in radius()) {
        let path = build_path(&points, r);
        let segments = path.segments();
        prop_assert_eq!(segments[0], PathSegment::MoveTo(points[0]));
        let end = segment_end(&segments[segments.len() - 1]);
        prop_assert_eq!(end, points[points.len() - 1]);
    }

    #[test]
    fn corners_respect_the_radius(points in polyline(), r in radius()) {
        let path = build_path(&points, r);
        let segments = path.segments();
        for idx in 0..segments.len() {
            if let PathSegment::QuadTo { ctrl, to } = segments[idx] {
                // The entry point is always the preceding segment's end.
                let entry = segment_end(&segments[idx - 1]);
                prop_assert!(entry.distance(ctrl) <= r + 1e-9);
                prop_assert!(to.distance(ctrl) <= r + 1e-9);
            }
        }
    }

    #[test]
    fn finite_inputs_build_finite_paths(points in polyline(), r in radius()) {
        let path = build_path(&points, r);
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                    prop_assert!(p.is_finite());
                }
                PathSegment::QuadTo { ctrl, to } => {
                    prop_assert!(ctrl.is_finite());
                    prop_assert!(to.is_finite());
                }
            }
        }
    }
}
