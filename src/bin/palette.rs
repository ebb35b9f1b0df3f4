use anyhow::{Context, Result};
use clap::Parser;
use image_palette_wasm::{
    ColorQuantizer, DEFAULT_COLORS, DEFAULT_MAX_ITERATIONS, EmptyClusterPolicy,
    extract_palette_bytes, quantize_bytes,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract k-means color palettes from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors
    #[arg(short = 'k', long, default_value_t = DEFAULT_COLORS)]
    n_colors: usize,

    /// Shrink images so the longest side is at most this many pixels before clustering.
    /// Not available with --out-dir, which quantizes at full resolution.
    #[arg(short, long, conflicts_with = "out_dir")]
    downscale: Option<u32>,

    /// Upper bound on k-means iterations
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// What to do with clusters that lose all their pixels
    #[arg(long, value_enum, default_value_t = EmptyClusterPolicy::Retain)]
    empty_cluster: EmptyClusterPolicy,

    /// Seed for reproducible palettes
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON object per input instead of plain text
    #[arg(long)]
    json: bool,

    /// Also write each image recolored with its palette into this directory
    #[arg(short = 'o', long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_palette_wasm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let quantizer = ColorQuantizer::new()
        .with_max_iterations(args.max_iterations)
        .with_empty_cluster_policy(args.empty_cluster);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

        let palette = if let Some(dir) = &args.out_dir {
            let (png, palette) = quantize_bytes(&bytes, args.n_colors, &quantizer, &mut rng)
                .with_context(|| format!("quantizing {}", input.display()))?;
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let out_path = dir.join(format!("{stem}.png"));
            fs::create_dir_all(dir)?;
            fs::write(&out_path, png)?;
            tracing::info!(path = %out_path.display(), "Wrote quantized image");
            palette
        } else {
            extract_palette_bytes(&bytes, args.n_colors, args.downscale, &quantizer, &mut rng)
                .with_context(|| format!("extracting palette from {}", input.display()))?
        };

        if args.json {
            let line = serde_json::json!({
                "input": input.display().to_string(),
                "palette": palette,
            });
            println!("{line}");
        } else {
            println!("{}: {}", input.display(), palette.join(" "));
        }
    }

    Ok(())
}
