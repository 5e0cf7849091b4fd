use anyhow::{Context, Result};
use clap::Parser;
use image_palette_wasm::normalize::{DEFAULT_MAX_DIMENSION, ResizeFilter};
use image_palette_wasm::{
    DEFAULT_PALETTE_SIZE, NormalizeOptions, PaletteEntry, extract_palette_bytes, upload,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};

/// Print the most frequent colors of PNG/JPEG images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths (.png, .jpg, .jpeg)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors to report
    #[arg(short = 'k', long = "colors", default_value_t = DEFAULT_PALETTE_SIZE)]
    n_colors: usize,

    /// Longest side allowed before the image is scaled down
    #[arg(short, long, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Count every pixel of the original image
    #[arg(long, conflicts_with = "max_dimension")]
    no_resize: bool,

    /// Resampling filter used when scaling down
    #[arg(short, long, value_enum, default_value_t = ResizeFilter::Lanczos3)]
    filter: ResizeFilter,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn normalize_options(&self) -> NormalizeOptions {
        let limit = if self.no_resize { None } else { Some(self.max_dimension) };
        NormalizeOptions::default()
            .with_max_dimension(limit)
            .with_filter(self.filter)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_table(input: &Path, palette: &[PaletteEntry]) {
    println!("{}", input.display());
    for entry in palette {
        let [r, g, b] = entry.rgb;
        let tone = if entry.is_light { "light" } else { "dark" };
        println!("  {}  rgb({r}, {g}, {b})  {tone}", entry.hex);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = args.normalize_options();
    debug!(?options, k = args.n_colors, "normalize options");

    let mut reports = Vec::new();
    for input in &args.inputs {
        upload::check_path(input).with_context(|| format!("rejected {}", input.display()))?;

        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let palette = extract_palette_bytes(&bytes, args.n_colors, &options)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;
        info!(file = %input.display(), colors = palette.len(), "extracted palette");

        if args.json {
            reports.push(json!({ "file": input.display().to_string(), "palette": palette }));
        } else {
            print_table(input, &palette);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
