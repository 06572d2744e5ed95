//! # Rebar Placer CLI
//!
//! Terminal front end for the bar layout engine.
//!
//! ```text
//! rebar_cli                 # prompt for a section, defaults in brackets
//! rebar_cli section.json    # run a BarLayoutInput JSON file
//! rebar_cli beams.rbp       # run every section check in a project file
//! ```
//!
//! Set `RUST_LOG=rebar_core=debug` to trace each bar as it is placed.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use rebar_core::calculations::{
    calculate, BarLayer, BarLayoutInput, BarLayoutResult, CalculationItem,
};
use rebar_core::file_io::{load_project, PROJECT_EXTENSION};
use rebar_core::project::DetailingSettings;
use rebar_core::report::{narrative_markdown, Legend};
use rebar_core::CalcError;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_input(settings: &DetailingSettings) -> BarLayoutInput {
    let mut section = settings.default_section();

    println!("Concrete Section Properties");
    section.width_mm = prompt_f64(
        &format!("  Width (mm) [{}]: ", section.width_mm),
        section.width_mm,
    );
    section.depth_mm = prompt_f64(
        &format!("  Depth (mm) [{}]: ", section.depth_mm),
        section.depth_mm,
    );
    section.cover_mm = prompt_f64(
        &format!("  Concrete cover (mm) [{}]: ", section.cover_mm),
        section.cover_mm,
    );
    section.aggregate_size_mm = prompt_f64(
        &format!("  Aggregate size (mm) [{}]: ", section.aggregate_size_mm),
        section.aggregate_size_mm,
    );
    section.link_diameter_mm = prompt_f64(
        &format!("  Link diameter (mm) [{}]: ", section.link_diameter_mm),
        section.link_diameter_mm,
    );

    println!();
    println!("Rebar Layer Properties");
    let layer_count = prompt_u32("  Number of layers [1]: ", 1).max(1);
    let layers = (1..=layer_count)
        .map(|n| {
            let diameter = prompt_f64(&format!("  Layer {n} bar size (mm) [20]: "), 20.0);
            let count = prompt_u32(&format!("  Layer {n} number of bars [4]: "), 4);
            BarLayer::new(n, diameter, count)
        })
        .collect();

    BarLayoutInput {
        label: "CLI".to_string(),
        section,
        layers,
    }
}

fn read_input_file(path: &Path) -> Result<Vec<BarLayoutInput>, CalcError> {
    if path.extension().is_some_and(|ext| ext == PROJECT_EXTENSION) {
        let project = load_project(path)?;
        return Ok(project
            .items_by_label()
            .into_iter()
            .map(|(_, item)| match item {
                CalculationItem::BarLayout(input) => input.clone(),
            })
            .collect());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let input = serde_json::from_str(&contents).map_err(CalcError::serialization)?;
    Ok(vec![input])
}

fn print_result(input: &BarLayoutInput, result: &BarLayoutResult) {
    println!("═══════════════════════════════════════");
    println!("  BAR LAYOUT: {}", input.label);
    println!("═══════════════════════════════════════");
    println!();

    for layer in &result.layout.layers {
        let xs: Vec<String> = layer.x_coords.iter().map(|x| format!("{x:.1}")).collect();
        println!(
            "  Layer {}: {} x {} mm at d = {:.1} mm, x = [{}]",
            layer.layer_number,
            layer.bar_count,
            layer.bar_diameter_mm,
            layer.effective_depth_mm(),
            xs.join(", ")
        );
    }
    println!();

    match Legend::for_layout(&input.section, &result.layout) {
        Ok(Some(legend)) => {
            println!("Legend (layer {}):", result.governing_layer_number);
            for line in legend.lines() {
                println!("  {line}");
            }
        }
        Ok(None) => {}
        Err(e) => eprintln!("Legend unavailable: {e}"),
    }

    for warning in &result.warnings {
        println!("  [WARN] {warning}");
    }

    println!();
    println!("{}", narrative_markdown(input, result));

    println!("JSON Output (for LLM/API use):");
    if let Ok(json) = serde_json::to_string_pretty(result) {
        println!("{}", json);
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() -> ExitCode {
    init_logging();

    println!("Rebar Placer - Bar Layout and Spacing Check");
    println!("===========================================");
    println!();

    let inputs = match std::env::args_os().nth(1) {
        Some(path) => match read_input_file(Path::new(&path)) {
            Ok(inputs) => inputs,
            Err(e) => {
                report_error(&e);
                return ExitCode::FAILURE;
            }
        },
        None => vec![prompt_input(&DetailingSettings::default())],
    };

    let mut failed = false;
    for input in &inputs {
        match calculate(input) {
            Ok(result) => print_result(input, &result),
            Err(e) => {
                eprintln!("[{}]", input.label);
                report_error(&e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
