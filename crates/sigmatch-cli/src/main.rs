//! sigmatch CLI - verify handwritten signatures from image files.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sigmatch_core::Raster;
use sigmatch_io::{ImageFormat, read_image, write_image, write_mask};
use sigmatch_verify::{
    DEFAULT_THRESHOLD, FeatureVector, MatchPolicy, ReferenceEntry, TracingSink, Verifier,
    VerifyConfig, find_best_match,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

/// Extensions picked up when scanning a reference directory
const REFERENCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pgm", "ppm"];

#[derive(Parser)]
#[command(name = "sigmatch")]
#[command(about = "Verify handwritten signatures against reference images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare an input signature with one reference image.
    Verify(VerifyArgs),

    /// Print the feature vector of one image.
    Features(FeaturesArgs),

    /// Find the closest reference in a directory of images.
    BestMatch(BestMatchArgs),
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// JSON configuration file; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum feature distance for a match (overrides the config policy).
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(Debug, Clone, Args)]
struct VerifyArgs {
    /// Path to the signature being verified.
    #[arg(long)]
    input: PathBuf,

    /// Path to the reference signature.
    #[arg(long)]
    reference: PathBuf,

    /// Directory to write the intermediate images of both signatures.
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Clone, Args)]
struct FeaturesArgs {
    /// Path to the signature image.
    #[arg(long)]
    image: PathBuf,

    /// Print the features as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, Clone, Args)]
struct BestMatchArgs {
    /// Path to the signature being verified.
    #[arg(long)]
    input: PathBuf,

    /// Directory of reference images (png, jpg, jpeg, pgm, ppm).
    #[arg(long)]
    references: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ConfigArgs {
    fn load(&self) -> CliResult<VerifyConfig> {
        let config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
                let config: VerifyConfig = serde_json::from_str(&text)
                    .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
                tracing::info!("Loaded config: {}", path.display());
                config
            }
            None => VerifyConfig::default(),
        };
        Ok(match self.threshold {
            Some(threshold) => config.with_threshold(threshold),
            None => config,
        })
    }
}

#[derive(Serialize)]
struct VerifyReport {
    matched: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<FeatureVector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<FeatureVector>,
}

#[derive(Serialize)]
struct BestMatchReport {
    matched: bool,
    name: Option<String>,
    distance: Option<f64>,
    threshold: f64,
    candidates: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Verify(args) => run_verify(&args),
        Commands::Features(args) => run_features(&args),
        Commands::BestMatch(args) => run_best_match(&args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_image(path: &Path) -> CliResult<Raster> {
    tracing::info!("Loading image: {}", path.display());
    let raster = read_image(path)
        .map_err(|e| -> CliError { format!("failed to open image {}: {}", path.display(), e).into() })?;
    tracing::info!("Image size: {}x{}", raster.width(), raster.height());
    Ok(raster)
}

// ── verify ─────────────────────────────────────────────────────────────

fn run_verify(args: &VerifyArgs) -> CliResult<bool> {
    let verifier = Verifier::new(args.config.load()?)?;
    let input = load_image(&args.input)?;
    let reference = load_image(&args.reference)?;

    if let Some(dir) = &args.dump_dir {
        dump_stages(&verifier, &input, &dir.join("input"))?;
        dump_stages(&verifier, &reference, &dir.join("reference"))?;
    }

    let verification = verifier.verify(&input, &reference, &mut TracingSink);
    let matched = verification.is_match();

    if args.json {
        let report = VerifyReport {
            matched,
            message: verification.message(),
            distance: verification.match_result.as_ref().map(|r| r.distance),
            input: verification.input,
            reference: verification.reference,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", verification.message());
    }

    Ok(matched)
}

/// Write every intermediate of one image as `step1_denoised.png` through
/// `step5_roi.png`.
fn dump_stages(verifier: &Verifier, raster: &Raster, dir: &Path) -> CliResult<()> {
    std::fs::create_dir_all(dir)?;
    let processed = verifier.process(raster)?;

    write_image(&processed.denoised, dir.join("step1_denoised.png"), ImageFormat::Png)?;
    write_image(&processed.gray, dir.join("step2_gray.png"), ImageFormat::Png)?;
    write_mask(&processed.binary, dir.join("step3_binary.png"), ImageFormat::Png)?;
    write_mask(&processed.skeleton, dir.join("step4_skeleton.png"), ImageFormat::Png)?;
    match &processed.roi {
        Some(roi) => write_mask(roi.mask(), dir.join("step5_roi.png"), ImageFormat::Png)?,
        None => tracing::warn!("No ink in {}; skipping step5_roi.png", dir.display()),
    }

    tracing::info!("Intermediate images written to {}", dir.display());
    Ok(())
}

// ── features ───────────────────────────────────────────────────────────

fn run_features(args: &FeaturesArgs) -> CliResult<bool> {
    let verifier = Verifier::new(args.config.load()?)?;
    let raster = load_image(&args.image)?;
    let processed = verifier.process(&raster)?;

    let Some(features) = processed.features else {
        return Err(format!("no signature found in {}", args.image.display()).into());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        println!("width:        {}", features.width());
        println!("height:       {}", features.height());
        println!("black_pixels: {}", features.black_pixels());
        println!("aspect_ratio: {:.3}", features.aspect_ratio());
        println!("density:      {:.4}", features.density());
        if let Some(length) = features.stroke_length() {
            println!("stroke_length: {:.2}", length);
        }
        println!("thin_iterations: {}", processed.thin_stats.iterations);
    }

    Ok(true)
}

// ── best-match ─────────────────────────────────────────────────────────

/// Image files in `dir` with a known extension, sorted by name.
fn reference_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let known = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| REFERENCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if path.is_file() && known {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn run_best_match(args: &BestMatchArgs) -> CliResult<bool> {
    let config = args.config.load()?;
    let threshold = match config.policy {
        MatchPolicy::Euclidean { threshold } => threshold,
        MatchPolicy::RelativeTolerance { .. } => {
            tracing::warn!("best-match ranks by distance; using threshold {}", DEFAULT_THRESHOLD);
            DEFAULT_THRESHOLD
        }
    };
    let verifier = Verifier::new(config)?;

    let input = load_image(&args.input)?;
    let Some(features) = verifier.process(&input)?.features else {
        return Err(format!("no signature found in {}", args.input.display()).into());
    };

    let mut entries: Vec<ReferenceEntry> = Vec::new();
    for path in reference_files(&args.references)? {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raster = load_image(&path)?;
        match verifier.enroll(name, &raster) {
            Ok(entry) => entries.push(entry),
            Err(reason) => tracing::warn!("Skipping {}: {}", path.display(), reason),
        }
    }
    tracing::info!("{} usable references", entries.len());

    let best = find_best_match(&features, &entries, threshold);
    let name = best.entry.as_ref().map(|e| e.name.clone());

    if args.json {
        let report = BestMatchReport {
            matched: best.is_match,
            name,
            distance: best.distance.is_finite().then_some(best.distance),
            threshold,
            candidates: entries.len(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match name {
            Some(name) if best.is_match => println!(
                "Best match: {} (distance {:.2} <= {:.2})",
                name, best.distance, threshold
            ),
            Some(name) => println!(
                "No match: closest is {} (distance {:.2} > {:.2})",
                name, best.distance, threshold
            ),
            None => println!("No usable references in {}", args.references.display()),
        }
    }

    Ok(best.is_match)
}
