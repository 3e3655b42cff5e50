use apklens::cli::commands::{ClassifyArgs, CliArgs, Commands, ConfigArgs, InspectArgs, ScanArgs};
use apklens::cli::output::{OutputFormat, OutputFormatter};
use apklens::util::logging::{init_logging, parse_level, LoggingConfig};
use apklens::{
    discover_packages, ApklensConfig, BatchScanner, PackageAnalyzer, ScanSummary, NAME, VERSION,
};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error, info, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let result = match &args.command {
        Commands::Classify(classify_args) => handle_classify(classify_args),
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args),
        Commands::Scan(scan_args) => handle_scan(scan_args, args.quiet).await,
        Commands::Config(config_args) => handle_config(config_args),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&ApklensConfig::default().log_level)
    };

    let use_json = env::var("APKLENS_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        use_json,
        ..LoggingConfig::with_level(level)
    });
}

fn load_config(threshold: Option<u32>, no_manifest: bool) -> Result<ApklensConfig> {
    let default_config = ApklensConfig::default();
    let config = ApklensConfig {
        score_threshold: threshold.unwrap_or(default_config.score_threshold),
        inspect_manifest: !no_manifest && default_config.inspect_manifest,
        ..default_config
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn write_output(output: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn handle_classify(args: &ClassifyArgs) -> Result<()> {
    let config = load_config(args.threshold, args.no_manifest)?;
    let analyzer = PackageAnalyzer::new(&config);

    let analyses: Vec<_> = args.packages.iter().map(|p| analyzer.analyze(p)).collect();

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let output = formatter.format_classifications(&analyses)?;
    write_output(&output, args.output.as_deref())
}

fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let config = load_config(args.threshold, args.no_manifest)?;
    let analysis = PackageAnalyzer::new(&config).analyze(&args.package);

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let output = formatter.format_analysis(&analysis)?;
    write_output(&output, args.output.as_deref())
}

async fn handle_scan(args: &ScanArgs, quiet: bool) -> Result<()> {
    let mut config = load_config(args.threshold, args.no_manifest)?;
    if let Some(concurrency) = args.concurrency {
        config.max_concurrency = concurrency;
        config.validate().context("Invalid configuration")?;
    }

    let root = match &args.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let packages: Vec<PathBuf> = discover_packages(&root, !args.no_recursive)?;
    info!(root = %root.display(), packages = packages.len(), "Scanning packages");

    let format = OutputFormat::from(args.format);
    let progress = if format == OutputFormat::Human && !quiet && !packages.is_empty() {
        let bar = ProgressBar::new(packages.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let scanner = BatchScanner::new(PackageAnalyzer::new(&config), config.max_concurrency);
    let analyses = scanner
        .scan_with_progress(packages, |analysis| {
            if let Some(bar) = &progress {
                bar.set_message(analysis.file_name.clone());
                bar.inc(1);
            }
        })
        .await;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let summary = ScanSummary::from_results(&analyses);
    let output = OutputFormatter::new(format).format_scan(&summary, &analyses)?;
    write_output(&output, args.output.as_deref())
}

fn handle_config(args: &ConfigArgs) -> Result<()> {
    let config = ApklensConfig::default();
    let output = OutputFormatter::new(OutputFormat::from(args.format)).format_config(&config)?;
    write_output(&output, None)
}
