use bliffoscope::debug::init_logging;
use bliffoscope::tools::{RenderKind, Rendered, load_scan, load_target, parse_target_spec, render, samples};
use bliffoscope::utils::color::RandomColors;
use bliffoscope::{Result, SearchConfig, SearchEngine, SparseImage, TargetCatalog};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bliftool", version, about = "Bliffoscope pattern search tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a scan file for one or more target patterns
    Search {
        /// Scan as a text grid or raster image
        #[arg(long)]
        scan: PathBuf,
        /// Target as NAME=PATH, may be repeated
        #[arg(long = "target", required = true)]
        targets: Vec<String>,
        /// Minimum match ratio (defaults to BLIFF_THRESHOLD or 0.65)
        #[arg(long)]
        threshold: Option<f64>,
        /// Search rows in parallel
        #[arg(long)]
        parallel: bool,
        /// Report renderer: list or canvas
        #[arg(long, default_value = "list")]
        render: RenderKind,
        /// Output path (required for canvas)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Seed for match colors
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the built-in demo scan against Slime Torpedo and Star Ship
    Demo {
        /// Minimum match ratio (defaults to BLIFF_THRESHOLD or 0.65)
        #[arg(long)]
        threshold: Option<f64>,
        /// Search rows in parallel
        #[arg(long)]
        parallel: bool,
        /// Report renderer: list or canvas
        #[arg(long, default_value = "list")]
        render: RenderKind,
        /// Output path (required for canvas)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Seed for match colors
        #[arg(long)]
        seed: Option<u64>,
    },
}

struct RunOptions {
    threshold: Option<f64>,
    parallel: bool,
    render: RenderKind,
    out: Option<PathBuf>,
    seed: Option<u64>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Search {
            scan,
            targets,
            threshold,
            parallel,
            render,
            out,
            seed,
        } => search_cmd(
            &scan,
            &targets,
            RunOptions {
                threshold,
                parallel,
                render,
                out,
                seed,
            },
        ),
        Command::Demo {
            threshold,
            parallel,
            render,
            out,
            seed,
        } => demo_cmd(RunOptions {
            threshold,
            parallel,
            render,
            out,
            seed,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bliftool: {err}");
            ExitCode::FAILURE
        }
    }
}

fn config_for(options: &RunOptions) -> SearchConfig {
    let mut config = SearchConfig::from_env();
    if let Some(threshold) = options.threshold {
        config = config.with_threshold(threshold);
    }
    if options.parallel {
        config = config.with_parallel(true);
    }
    config
}

fn search_cmd(scan_path: &Path, target_specs: &[String], options: RunOptions) -> Result<()> {
    let config = config_for(&options);
    let scan = load_scan(scan_path, config.marker)?;

    let mut catalog = TargetCatalog::new();
    for spec in target_specs {
        let (name, path) = parse_target_spec(spec)?;
        catalog.add(load_target(&name, &path, config.marker)?);
    }

    println!(
        "Scan: {} ({} on-pixels, bounds {:?})",
        scan_path.display(),
        scan.len(),
        scan.size()
    );
    run(&scan, &catalog, config, &options)
}

fn demo_cmd(options: RunOptions) -> Result<()> {
    let config = config_for(&options);
    let scan = samples::scan();
    let catalog = samples::catalog()?;
    run(&scan, &catalog, config, &options)
}

fn run(scan: &SparseImage, catalog: &TargetCatalog, config: SearchConfig, options: &RunOptions) -> Result<()> {
    let colors = match options.seed {
        Some(seed) => RandomColors::seeded(seed),
        None => RandomColors::new(),
    };
    let mut engine = SearchEngine::with_colors(config, colors)?;
    let outcome = engine.find_targets(scan, catalog);

    match render(options.render, scan, &outcome)? {
        Rendered::Text(text) => match &options.out {
            Some(path) => std::fs::write(path, text)?,
            None => print!("{text}"),
        },
        Rendered::Canvas(canvas) => {
            let path = options.out.as_ref().ok_or(bliffoscope::Error::MissingOutput)?;
            canvas.save(path)?;
            println!(
                "Targets found: {} in {:.3}s, canvas written to {}",
                outcome.len(),
                outcome.elapsed.as_secs_f64(),
                path.display()
            );
        }
    }
    Ok(())
}
