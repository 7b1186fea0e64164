#![no_main]

use libfuzzer_sys::fuzz_target;
use tangle_core::Point;
use tangle_render::{PathSegment, build_path};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let radius = f64::from(data[0] % 64);

    // Remaining bytes become waypoints, four bytes each.
    let mut points = Vec::new();
    for chunk in data[1..].chunks_exact(4).take(32) {
        let x = f64::from(i16::from_le_bytes([chunk[0], chunk[1]]) % 1000);
        let y = f64::from(i16::from_le_bytes([chunk[2], chunk[3]]) % 1000);
        points.push(Point::new(x, y));
    }

    let path = build_path(&points, radius);

    if points.is_empty() {
        assert!(path.is_empty(), "empty input must build an empty path");
        return;
    }

    // The path anchors at the first input point.
    match path.segments().first() {
        Some(PathSegment::MoveTo(p)) => {
            assert_eq!(*p, points[0], "path must start at the first point");
        }
        other => panic!("path must start with a move, got {other:?}"),
    }

    // Finite input stays finite through corner rounding.
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                assert!(p.is_finite(), "non-finite point {p:?}");
            }
            PathSegment::QuadTo { ctrl, to } => {
                assert!(ctrl.is_finite(), "non-finite control {ctrl:?}");
                assert!(to.is_finite(), "non-finite endpoint {to:?}");
            }
        }
    }

    // Serialization must never panic.
    let svg = path.to_svg();
    assert!(!svg.is_empty(), "non-empty path serialized to nothing");
});
