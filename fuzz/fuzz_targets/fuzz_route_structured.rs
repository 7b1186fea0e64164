#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tangle_core::{ItemId, Point, Rect, RouteStrategy};
use tangle_render::build_path;
use tangle_route::{ObstacleBox, ObstacleSet, RouterConfig, route};

#[derive(Debug, Arbitrary)]
struct Query {
    start: (i16, i16),
    goal: (i16, i16),
    controls: Vec<(i16, i16)>,
    boxes: Vec<(i16, i16, u8, u8)>,
    corner_radius: u8,
    avoid: bool,
}

fn point((x, y): (i16, i16)) -> Point {
    Point::new(f64::from(x % 600), f64::from(y % 600))
}

fuzz_target!(|query: Query| {
    // Cap sizes to keep fuzzing fast.
    if query.controls.len() > 6 || query.boxes.len() > 12 {
        return;
    }
    let mut points = Vec::with_capacity(query.controls.len() + 2);
    points.push(point(query.start));
    points.extend(query.controls.iter().copied().map(point));
    points.push(point(query.goal));

    let boxes = query
        .boxes
        .iter()
        .enumerate()
        .map(|(n, &(x, y, w, h))| {
            ObstacleBox::new(
                ItemId::new(format!("n{n}")),
                Rect::new(
                    f64::from(x % 600),
                    f64::from(y % 600),
                    f64::from(w % 80) + 1.0,
                    f64::from(h % 80) + 1.0,
                ),
            )
        })
        .collect();
    let obstacles = ObstacleSet::from_boxes(boxes);

    let config = RouterConfig::new()
        .with_strategy(RouteStrategy::Orthogonal)
        .with_avoid_obstacles(query.avoid);
    let src = ItemId::new("src");
    let dst = ItemId::new("dst");
    let out = route(&points, &src, &dst, &obstacles, &config);

    assert!(out.len() >= 2, "route dropped below two points");
    assert_eq!(out[0], points[0], "start anchor rewritten");
    assert_eq!(
        out[out.len() - 1],
        points[points.len() - 1],
        "goal anchor rewritten"
    );

    // The routed polyline must survive the path builder whole.
    let path = build_path(&out, f64::from(query.corner_radius));
    let svg = path.to_svg();
    assert!(svg.starts_with('M'), "path must start with a move: {svg}");
});
