use anyhow::{Context, Result};
use box_office_networks::data::loader::load_film_records;
use box_office_networks::{run_analysis, storage, Config};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "box-office-networks",
    about = "Co-occurrence network analysis of top box-office films"
)]
struct Cli {
    /// Path to input CSV or Parquet file of film records
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "network_results")]
    output_dir: String,

    /// JSON configuration file; missing fields keep their defaults
    #[clap(long)]
    config: Option<String>,

    /// Seed for community detection and random graph generation
    #[clap(long)]
    seed: Option<u64>,

    /// Bin count for sliced and comparison degree distributions
    #[clap(long)]
    bins: Option<usize>,

    /// Skip the random graph comparison
    #[clap(long)]
    skip_comparison: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    /// File configuration with command-line overrides applied
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("failed to read config file {}", path))?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(bins) = self.bins {
            config.comparison_bins = bins;
        }
        if self.skip_comparison {
            config.compare_random_models = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = args.resolve_config()?;
    log::info!("Starting film network analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);
    log::debug!("Configuration: {:?}", config);

    // 1. Load data
    let records = load_film_records(&args.input)
        .with_context(|| format!("failed to load film records from {}", args.input))?;
    log::info!("Loaded {} film records", records.len());

    // 2. Analyse
    let report = run_analysis(records, &config)?;

    // 3. Save results
    storage::save_results(&report, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
