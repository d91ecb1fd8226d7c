use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use vestio_core::{
    BASE_URL, CollectConfig, FetchConfig, Harvest, NormalizeConfig, PageFetcher, PostgresConfig, Product,
    SheetsConfig, collect_catalog, transform_records, write_csv, write_postgres, write_sheet,
};

mod echo;

use echo::{print_banner, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scrape the fashion catalog, normalize the products and persist them
#[derive(Parser, Debug)]
#[command(name = "vestio")]
#[command(author = "Vestio Contributors")]
#[command(version)]
#[command(about = "ETL pipeline for fashion-catalog products", long_about = None)]
struct Args {
    /// Number of listing pages to scrape
    #[arg(long, default_value = "50", value_name = "NUM")]
    pages: u32,

    /// Delay between page requests, in seconds
    #[arg(long, default_value = "0.5", value_name = "SECS")]
    delay: f64,

    /// Output CSV path
    #[arg(short, long, default_value = "products.csv", value_name = "FILE")]
    output: PathBuf,

    /// Skip the CSV sink
    #[arg(long)]
    no_csv: bool,

    /// Catalog root URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds, per attempt
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Source-currency to target-currency conversion rate
    #[arg(long, default_value = "16000", value_name = "RATE")]
    exchange_rate: f64,

    /// Target spreadsheet key (falls back to GOOGLE_SHEET_ID)
    #[arg(long, value_name = "ID")]
    sheet_id: Option<String>,

    /// Worksheet receiving the rows
    #[arg(long, default_value = "products", value_name = "NAME")]
    worksheet: String,

    /// Postgres connection string (falls back to DATABASE_URL)
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,

    /// Postgres table receiving the rows
    #[arg(long, default_value = "products", value_name = "NAME")]
    table: String,

    /// Enable verbose progress output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    print_step(1, 4, &format!("Scraping {} pages", args.pages));
    let harvest = scrape(&args)?;
    for failure in &harvest.failures {
        print_warning(&format!("Page {} failed: {}", failure.page, failure.error));
    }
    print_success(&format!(
        "Scraped {} raw records ({} of {} pages failed)",
        harvest.records.len(),
        harvest.failed_pages(),
        args.pages
    ));

    print_step(2, 4, "Transforming records");
    let config = NormalizeConfig { exchange_rate: args.exchange_rate };
    let products = transform_records(&harvest.records, &config).context("Transform failed")?;
    print_success(&format!("{} valid records after filtering", products.len()));

    print_step(3, 4, &format!("Saving CSV to {}", args.output.display()));
    if args.no_csv {
        print_info("CSV sink disabled");
    } else {
        match write_csv(&products, &args.output) {
            Ok(path) => print_success(&format!("Saved CSV: {}", path.display())),
            Err(e) => print_warning(&format!("CSV save failed: {}", e)),
        }
    }

    print_step(4, 4, "Uploading to optional sinks");
    upload_sheet(&args, &products);
    upload_postgres(&args, &products);

    Ok(())
}

fn scrape(args: &Args) -> anyhow::Result<Harvest> {
    let fetch_config = FetchConfig {
        base_url: args.base_url.clone().unwrap_or_else(|| BASE_URL.to_string()),
        timeout: args.timeout,
        user_agent: args
            .user_agent
            .clone()
            .unwrap_or_else(|| FetchConfig::default().user_agent),
        ..FetchConfig::default()
    };
    let fetcher = PageFetcher::new(fetch_config).context("Failed to build HTTP client")?;

    let collect_config = CollectConfig { pages: args.pages, delay: Duration::from_secs_f64(args.delay) };
    Ok(collect_catalog(&fetcher, &collect_config))
}

/// Pushes to Google Sheets when a token is configured; missing
/// configuration skips the sink, a sink error warns and moves on.
fn upload_sheet(args: &Args, products: &[Product]) {
    let token = match non_empty_env("GOOGLE_SHEETS_TOKEN") {
        Some(token) => token,
        None => {
            if args.verbose {
                print_info("GOOGLE_SHEETS_TOKEN not set; skipping spreadsheet sink");
            }
            return;
        }
    };

    let sheet_id = match args.sheet_id.clone().or_else(|| non_empty_env("GOOGLE_SHEET_ID")) {
        Some(id) => id,
        None => {
            print_warning("Spreadsheet token set but no sheet id; skipping spreadsheet sink");
            return;
        }
    };

    let mut config = SheetsConfig::new(token, sheet_id);
    config.worksheet = args.worksheet.clone();

    match write_sheet(products, &config) {
        Ok(url) => print_success(&format!("Saved Google Sheet: {}", url)),
        Err(e) => print_warning(&format!("Google Sheets save failed: {}", e)),
    }
}

/// Pushes to Postgres when a connection string is configured.
fn upload_postgres(args: &Args, products: &[Product]) {
    let url = match args.database_url.clone().or_else(|| non_empty_env("DATABASE_URL")) {
        Some(url) => url,
        None => {
            if args.verbose {
                print_info("DATABASE_URL not set; skipping Postgres sink");
            }
            return;
        }
    };

    let mut config = PostgresConfig::new(url);
    config.table = args.table.clone();

    match write_postgres(products, &config) {
        Ok(()) => print_success("Saved to Postgres"),
        Err(e) => print_warning(&format!("Postgres save failed: {}", e)),
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
