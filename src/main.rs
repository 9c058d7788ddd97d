use boundary_enhancer::image::feature_map_from_gray;
use boundary_enhancer::BoundaryEnhancer;
use std::env;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Demo stub: enhances a synthetic 8-bit checkerboard
    let channels = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|e| format!("Invalid channel count {arg:?}: {e}"))?,
        None => 4,
    };
    let (w, h, cell) = (128usize, 96usize, 16usize);
    let mut gray = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            gray[y * w + x] = if (x / cell + y / cell) % 2 == 0 { 32 } else { 220 };
        }
    }

    let input = feature_map_from_gray(w, h, &gray, channels)?;
    let enhancer = BoundaryEnhancer::new(channels).map_err(|e| e.to_string())?;
    let (output, report) = enhancer
        .apply_with_report(&input)
        .map_err(|e| e.to_string())?;

    println!(
        "shape={} boundary_max={:.3} refined_mean={:.4} latency_ms={:.3}",
        output.shape(),
        report.boundary.max_abs,
        report.refined.mean_abs,
        report.timings.total_ms
    );
    for stage in &report.timings.stages {
        println!("  {:<12} {:.3} ms", stage.label, stage.elapsed_ms);
    }
    Ok(())
}
