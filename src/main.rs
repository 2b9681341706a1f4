use clap::{Args, Parser, Subcommand};
use qrent_core::{create_record_table, CrawlConfig, CsvSink, Result};
use qrent_scrapers::{
    CrawlOrchestrator, Document, FieldExtractor, HttpFetcher, ListingDiscoverer, PageCounter,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output (-v, --verbose). RUST_LOG takes precedence.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl rental listings into CSV
    #[command(about = "Crawl rental listings into CSV")]
    #[command(long_about = "Walk every search-results page, extract each listing and write checkpoint and final CSV files.")]
    Crawl(CrawlCommand),

    /// Extract one listing from a saved detail page
    #[command(about = "Extract one listing from a saved detail page")]
    Extract(ExtractCommand),

    /// Count results and pages from a saved search-results page
    #[command(about = "Count results and pages from a saved search-results page")]
    Count(CountCommand),
}

#[derive(Args)]
struct CrawlCommand {
    /// Site origin (--origin)
    #[arg(long, default_value = qrent_core::DEFAULT_ORIGIN)]
    origin: String,

    /// Write a checkpoint every N pages, 0 to disable (-i, --checkpoint-every)
    #[arg(short = 'i', long, default_value_t = 5)]
    checkpoint_every: u32,

    /// Detail pages fetched at once (-j, --concurrency)
    #[arg(short = 'j', long, default_value_t = 1)]
    concurrency: usize,

    /// Per-request timeout in seconds (-t, --timeout)
    #[arg(short = 't', long, default_value_t = 30)]
    timeout: u64,

    /// Pause before each detail fetch in milliseconds (--delay-ms)
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Maximum number of results pages to crawl (-c, --max-pages)
    #[arg(short = 'c', long)]
    max_pages: Option<u32>,

    /// Directory for checkpoint and final CSV files (-o, --output-dir)
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Final CSV file name (-f, --final-name)
    #[arg(short = 'f', long, default_value = "final.csv")]
    final_name: String,

    /// Also write the crawl report as JSON (-r, --report)
    #[arg(short = 'r', long)]
    report: Option<PathBuf>,

    /// Print the first N records as a table when done (-p, --preview)
    #[arg(short = 'p', long, default_value_t = 0)]
    preview: usize,
}

impl CrawlCommand {
    fn config(&self) -> CrawlConfig {
        CrawlConfig {
            origin: self.origin.clone(),
            checkpoint_interval: self.checkpoint_every,
            detail_concurrency: self.concurrency,
            request_timeout_secs: self.timeout,
            politeness_delay_ms: self.delay_ms,
            max_pages: self.max_pages,
            output_dir: self.output_dir.clone(),
            final_file_name: self.final_name.clone(),
            ..CrawlConfig::default()
        }
    }
}

#[derive(Args)]
struct ExtractCommand {
    /// Saved listing detail page (--file)
    #[arg(long)]
    file: PathBuf,

    /// Location text of the listing's card, e.g. "Tower 1, The Pearl, Doha" (-l, --location)
    #[arg(short = 'l', long)]
    location: String,

    /// Print the record as JSON (--json)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CountCommand {
    /// Saved search-results page (--file)
    #[arg(long)]
    file: PathBuf,

    /// Site origin used to resolve listing links (--origin)
    #[arg(long, default_value = qrent_core::DEFAULT_ORIGIN)]
    origin: String,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Crawl(cmd) => {
            let config = cmd.config();
            config.validate()?;
            info!("Crawling {} into {}", config.origin, config.output_dir.display());

            let fetcher = HttpFetcher::new(&config)?;
            let sink = CsvSink::new(&config.output_dir, &config.final_file_name);
            let orchestrator = CrawlOrchestrator::new(fetcher, sink, config)?;
            let outcome = orchestrator.run().await?;

            print!("{}", outcome.report.format());
            if let Some(path) = &cmd.report {
                fs::write(path, serde_json::to_string_pretty(&outcome.report)?)?;
                info!("Report written to {}", path.display());
            }
            if cmd.preview > 0 {
                println!("{}", create_record_table(outcome.dataset.records(), cmd.preview));
            }
        }
        Commands::Extract(cmd) => {
            let html = fs::read_to_string(&cmd.file)?;
            let record = FieldExtractor::new().extract_html(&html, &cmd.location)?;

            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", create_record_table(std::slice::from_ref(&record), 1));
            }
            if record.is_excluded() {
                println!("Excluded: {} listings are not collected", record.property_type);
            }
        }
        Commands::Count(cmd) => {
            let config = CrawlConfig {
                origin: cmd.origin,
                ..CrawlConfig::default()
            };
            let discoverer = ListingDiscoverer::new(&config.origin_url()?);

            let html = fs::read_to_string(&cmd.file)?;
            let document = Document::parse(&html);
            let cards = discoverer.card_count(&document)?;
            let summaries = discoverer.discover(&document)?;
            let count = PageCounter::new().count_pages(&document, cards)?;

            println!(
                "{} results, {} cards ({} linked), {} pages",
                count.total_results,
                cards,
                summaries.len(),
                count.total_pages
            );
            for summary in summaries {
                println!("{}  {}", summary.detail_url, summary.raw_location.trim());
            }
        }
    }

    Ok(())
}
