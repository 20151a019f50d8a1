//! Chart generator binary.
//!
//! Renders the two paper figures into the current directory as PNG
//! (2.0x oversampled) and PDF.

use std::process::ExitCode;

use paperfig::figures::{quality_noise_figure, strategy_figure};
use paperfig::output::Exporter;
use paperfig::Result;

/// PNG oversampling factor for print-quality raster output.
const PNG_SCALE: f64 = 2.0;

fn run() -> Result<()> {
    println!("Saving Quality x Noise chart...");
    let fig = quality_noise_figure()?;
    Exporter::export(&fig, "quality-x-noise.png", "quality-x-noise.pdf", PNG_SCALE)?;

    println!("Saving Strategy Comparison chart...");
    let fig = strategy_figure()?;
    Exporter::export(
        &fig,
        "strategy-comparison.png",
        "strategy-comparison.pdf",
        PNG_SCALE,
    )?;

    println!("Done! Charts saved.");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
