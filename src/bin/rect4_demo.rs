use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rect_finder::config::rect4::{load_config, RuntimeConfig};
use rect_finder::diagnostics::{DebugPlot, FinderReport, NoopPlot, RgbPlot};
use rect_finder::geometry::polygon_area;
use rect_finder::image::io::{load_bands, save_mask_png, save_rgb_png, write_json_file};
use rect_finder::image::{BitGrid, ImageU8};
use rect_finder::raster::mask_from_mpoly;
use rect_finder::types::Mpoly;
use rect_finder::RectFinder;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let bands = load_bands(&config.input)?;
    let views: Vec<ImageU8> = bands.iter().map(|b| b.as_view()).collect();
    let ndv = config.ndv.to_def().map_err(|e| e.to_string())?;
    let mask = ndv.build_mask(&views).map_err(|e| e.to_string())?;

    let mut rng = match config.finder.anneal.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let finder = RectFinder::new(config.finder.clone());
    let mut canvas = config.output.debug_png.as_ref().map(|_| RgbPlot::from_mask(&mask));
    let mut noop = NoopPlot;
    let plot: &mut dyn DebugPlot = match canvas.as_mut() {
        Some(rgb) => rgb,
        None => &mut noop,
    };
    let report = finder
        .process_with_diagnostics(&mask, &mut rng, plot)
        .map_err(|e| format!("Rectangle search failed: {e}"))?;

    print_text_summary(&report);
    write_outputs(&config, &mask, &report, canvas)?;
    Ok(())
}

fn print_text_summary(report: &FinderReport) {
    let input = &report.input;
    println!("Rectangle search summary");
    println!(
        "  input: {}x{} valid_pixels={}",
        input.width, input.height, input.valid_pixels
    );
    println!(
        "  hull_edges={} groups={} kept={}",
        report.hull_edges,
        report.groups.len(),
        report.groups.iter().filter(|g| g.kept).count()
    );
    match report.outcome.ring() {
        Some(ring) => {
            println!("  found: true area={:.1}", polygon_area(ring));
            for (i, v) in ring.pts.iter().enumerate() {
                println!("    v{}: ({:.2}, {:.2})", i, v.x, v.y);
            }
        }
        None => {
            if let rect_finder::Rect4Outcome::NotFound(reason) = &report.outcome {
                println!("  found: false ({reason})");
            }
        }
    }
    if let Some(stats) = &report.anneal {
        println!(
            "  refine: iterations={} accepted={} gain={} stop={:?} elapsed_ms={:.3}",
            stats.iterations, stats.accepted, stats.total_gain, stats.stop_reason, stats.elapsed_ms
        );
    }
    let stages = report
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  timings (ms): {} total={:.3}", stages, report.timings.total_ms);
}

fn write_outputs(
    config: &RuntimeConfig,
    mask: &BitGrid,
    report: &FinderReport,
    canvas: Option<RgbPlot>,
) -> Result<(), String> {
    write_json_file(&config.output.json_out, report)?;
    println!("JSON report written to {}", config.output.json_out.display());

    if let (Some(path), Some(rgb)) = (&config.output.debug_png, canvas) {
        save_rgb_png(&rgb.into_canvas(), path)?;
        println!("Debug plot written to {}", path.display());
    }

    if let (Some(path), Some(ring)) = (&config.output.mask_png, report.outcome.ring()) {
        let poly = Mpoly::from_ring(ring.clone());
        save_mask_png(&mask_from_mpoly(&poly, mask.width(), mask.height()), path)?;
        println!("Polygon mask written to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: rect4_demo <config.json>".to_string()
}
