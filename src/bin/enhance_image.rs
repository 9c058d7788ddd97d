use boundary_enhancer::config::enhance_image::load_config;
use boundary_enhancer::image::{load_feature_map, save_plane_png, write_json_file};
use boundary_enhancer::ops::{boundary_response, pointwise};
use boundary_enhancer::BoundaryEnhancer;
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

    let enhancer = BoundaryEnhancer::from_config(&config.enhancer).map_err(|e| e.to_string())?;
    let input = load_feature_map(&config.input, enhancer.in_channels())?;
    let (output, report) = enhancer
        .apply_with_report(&input)
        .map_err(|e| e.to_string())?;

    save_plane_png(output.plane(0, 0), 1.0, &config.output.enhanced_image)?;
    if let Some(path) = &config.output.boundary_image {
        let feat = pointwise(&input, enhancer.channel_mix()).map_err(|e| e.to_string())?;
        let mut boundary = boundary_response(&feat);
        for v in boundary.data_mut() {
            *v = v.abs();
        }
        let max = boundary.max_abs();
        let scale = if max > 0.0 { 1.0 / max } else { 1.0 };
        save_plane_png(boundary.plane(0, 0), scale, path)?;
        println!("Saved boundary response to {}", path.display());
    }
    write_json_file(&config.output.report_json, &report)?;

    println!(
        "Saved enhanced image to {} ({}x{}, {} channels)",
        config.output.enhanced_image.display(),
        report.input.width,
        report.input.height,
        report.input.channels
    );
    println!(
        "Saved report to {} (total {:.3} ms)",
        config.output.report_json.display(),
        report.timings.total_ms
    );

    Ok(())
}

fn usage() -> String {
    "Usage: enhance_image <config.json>".to_string()
}
