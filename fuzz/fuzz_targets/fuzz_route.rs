#![no_main]

use libfuzzer_sys::fuzz_target;
use tangle_core::{ItemId, Point, Rect, RouteStrategy};
use tangle_route::{ObstacleBox, ObstacleSet, RouterConfig, route};

// Map two bytes onto a small signed grid so queries stay tractable.
fn coord(lo: u8, hi: u8) -> f64 {
    f64::from(i16::from_le_bytes([lo, hi]) % 500)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let start = Point::new(coord(data[0], data[1]), coord(data[2], data[3]));
    let goal = Point::new(coord(data[4], data[5]), coord(data[6], data[7]));

    // Remaining bytes become obstacle boxes, six bytes each.
    let mut boxes = Vec::new();
    for (n, chunk) in data[8..].chunks_exact(6).take(12).enumerate() {
        let x = coord(chunk[0], chunk[1]);
        let y = coord(chunk[2], chunk[3]);
        let w = f64::from(chunk[4] % 80) + 1.0;
        let h = f64::from(chunk[5] % 80) + 1.0;
        boxes.push(ObstacleBox::new(
            ItemId::new(format!("n{n}")),
            Rect::new(x, y, w, h),
        ));
    }
    let obstacles = ObstacleSet::from_boxes(boxes);

    let config = RouterConfig::new()
        .with_strategy(RouteStrategy::Orthogonal)
        .with_avoid_obstacles(true);
    let points = vec![start, goal];
    let src = ItemId::new("src");
    let dst = ItemId::new("dst");

    let out = route(&points, &src, &dst, &obstacles, &config);

    // Post-conditions that must always hold:
    assert!(out.len() >= 2, "route dropped below two points");
    assert_eq!(out[0], start, "start anchor rewritten");
    assert_eq!(out[out.len() - 1], goal, "goal anchor rewritten");
    for p in &out {
        assert!(p.is_finite(), "non-finite waypoint {p:?}");
    }

    // Identical queries must agree.
    let again = route(&points, &src, &dst, &obstacles, &config);
    assert_eq!(out, again, "routing is not deterministic");
});
