use rect_finder::image::BitGrid;

/// Axis-aligned block of valid pixels covering columns `x0..=x1` and rows `y0..=y1`.
pub fn axis_rect_mask(w: usize, h: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> BitGrid {
    assert!(x0 <= x1 && x1 < w && y0 <= y1 && y1 < h, "rectangle must lie inside the mask");
    BitGrid::from_fn(w, h, |x, y| (x0..=x1).contains(&x) && (y0..=y1).contains(&y))
}

/// Rectangle centred at `(cx, cy)` with half extents `(hw, hh)`, rotated by
/// `angle_deg` (clockwise on screen). A pixel is valid when its index lies
/// inside the rectangle.
pub fn rotated_rect_mask(
    w: usize,
    h: usize,
    centre: (f64, f64),
    half: (f64, f64),
    angle_deg: f64,
) -> BitGrid {
    let (s, c) = angle_deg.to_radians().sin_cos();
    BitGrid::from_fn(w, h, |x, y| {
        let (dx, dy) = (x as f64 - centre.0, y as f64 - centre.1);
        let u = c * dx + s * dy;
        let v = -s * dx + c * dy;
        u.abs() <= half.0 && v.abs() <= half.1
    })
}

/// Corners of the rectangle produced by [`rotated_rect_mask`].
pub fn rotated_rect_corners(centre: (f64, f64), half: (f64, f64), angle_deg: f64) -> [(f64, f64); 4] {
    let (s, c) = angle_deg.to_radians().sin_cos();
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)].map(|(su, sv)| {
        let (u, v) = (su * half.0, sv * half.1);
        (centre.0 + c * u - s * v, centre.1 + s * u + c * v)
    })
}

/// Filled triangle with a horizontal top edge.
pub fn triangle_mask(w: usize, h: usize, top_left: (f64, f64), top_right: (f64, f64), apex: (f64, f64)) -> BitGrid {
    let side = |a: (f64, f64), b: (f64, f64), x: f64, y: f64| {
        (b.0 - a.0) * (y - a.1) - (b.1 - a.1) * (x - a.0)
    };
    BitGrid::from_fn(w, h, |x, y| {
        let (x, y) = (x as f64, y as f64);
        let d0 = side(top_left, top_right, x, y);
        let d1 = side(top_right, apex, x, y);
        let d2 = side(apex, top_left, x, y);
        (d0 >= 0.0 && d1 >= 0.0 && d2 >= 0.0) || (d0 <= 0.0 && d1 <= 0.0 && d2 <= 0.0)
    })
}
