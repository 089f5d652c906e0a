mod common;

use common::init_logging;
use common::synthetic_mask::{axis_rect_mask, rotated_rect_corners, rotated_rect_mask, triangle_mask};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rect_finder::diagnostics::plot::YELLOW;
use rect_finder::diagnostics::RgbPlot;
use rect_finder::geometry::polygon_area;
use rect_finder::image::BitGrid;
use rect_finder::{FinderError, FinderParams, NotFoundReason, Rect4Outcome, RectFinder};

fn finder() -> RectFinder {
    RectFinder::new(FinderParams::default())
}

#[test]
fn axis_aligned_rectangle_corners_within_one_pixel() {
    init_logging();
    let mask = axis_rect_mask(200, 120, 20, 10, 179, 99);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let outcome = finder().process(&mask, &mut rng).expect("finder");
    let ring = outcome.ring().expect("quadrilateral");
    assert_eq!(ring.len(), 4);

    let expected = [(20.0, 10.0), (179.0, 10.0), (179.0, 99.0), (20.0, 99.0)];
    for (v, (x, y)) in ring.pts.iter().zip(expected) {
        assert!(
            (v.x - x).abs() <= 1.0 && (v.y - y).abs() <= 1.0,
            "vertex {v:?} too far from ({x}, {y}); ring={ring:?}"
        );
    }
}

#[test]
fn rotated_rectangles_recover_area() {
    init_logging();
    let centre = (250.0, 250.0);
    let half = (150.0, 90.0);
    let true_area = 4.0 * half.0 * half.1;
    for angle in [5.0, 20.0, 45.0, 70.0, 85.0] {
        let mask = rotated_rect_mask(500, 500, centre, half, angle);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = finder().process(&mask, &mut rng).expect("finder");
        let ring = outcome
            .ring()
            .unwrap_or_else(|| panic!("angle {angle}: {outcome:?}"));
        let area = polygon_area(ring);
        let rel = (area - true_area).abs() / true_area;
        assert!(rel < 0.02, "angle {angle}: area {area:.1} vs {true_area:.1}");

        let corners = rotated_rect_corners(centre, half, angle);
        for v in &ring.pts {
            let nearest = corners
                .iter()
                .map(|&(x, y)| (v.x - x).hypot(v.y - y))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 3.0, "angle {angle}: vertex {v:?} is {nearest:.2}px from a corner");
        }
    }
}

#[test]
fn triangle_has_no_quadrilateral() {
    init_logging();
    let mask = triangle_mask(500, 500, (50.0, 50.0), (450.0, 50.0), (250.0, 420.0));
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let outcome = finder().process(&mask, &mut rng).expect("finder");
    assert_eq!(
        outcome,
        Rect4Outcome::NotFound(NotFoundReason::WrongSideCount { sides: 3 })
    );
    assert!(outcome.into_ring().is_empty());
}

#[test]
fn empty_mask_is_an_error() {
    let mask = BitGrid::new(64, 64);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(finder().process(&mask, &mut rng), Err(FinderError::EmptyMask));
}

#[test]
fn point_and_line_masks_are_degenerate() {
    let point = axis_rect_mask(64, 64, 10, 10, 10, 10);
    let row = axis_rect_mask(64, 64, 5, 30, 60, 30);
    let column = axis_rect_mask(64, 64, 40, 2, 40, 60);
    for mask in [point, row, column] {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(matches!(
            finder().process(&mask, &mut rng),
            Err(FinderError::DegenerateHull { .. })
        ));
    }
}

#[test]
fn report_lists_stages_and_groups() {
    init_logging();
    let mask = axis_rect_mask(200, 120, 20, 10, 179, 99);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut plot = RgbPlot::from_mask(&mask);
    let report = finder()
        .process_with_diagnostics(&mask, &mut rng, &mut plot)
        .expect("finder");

    assert_eq!(report.input.width, 200);
    assert_eq!(report.input.valid_pixels, 160 * 90);
    assert_eq!(report.hull_edges, 4);
    assert_eq!(report.groups.iter().filter(|g| g.kept).count(), 4);
    assert!(report.groups.iter().all(|g| g.best_edge_angle_deg.is_some()));
    assert!(report.anneal.is_none());
    assert_eq!(report.initial.as_ref(), report.outcome.ring());
    for label in ["hull", "cluster", "quad"] {
        assert!(report.timings.stage_ms(label).is_some(), "missing stage {label}");
    }
    assert!(report.timings.stage_ms("anneal").is_none());

    // corner markers are 3x3; the centre pixel is overdrawn by the closing side
    assert_eq!(plot.canvas().get_pixel(21, 11).0, YELLOW);

    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["outcome"]["status"], "found");
    assert_eq!(json["hullEdges"], 4u64);
}
