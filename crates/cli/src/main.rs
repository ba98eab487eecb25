// ABOUTME: CLI binary for prodex: fetch or load product pages, extract records, emit JSON or CSV.
// ABOUTME: Supports online batch scraping by ASIN and offline extraction of saved HTML files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use prodex_extract::scraper::Html;
use prodex_extract::{
    extract_product, ordered_header, record_row, ProductRecord, RecordIdentity, SelectorProfile,
};
use serde_json::json;

mod batch;
mod error;
mod fetch;

use crate::fetch::{FetchOptions, Fetcher};

#[derive(Parser, Debug)]
#[command(name = "prodex")]
#[command(about = "Extract normalized product records from product pages")]
struct Args {
    /// ASINs to fetch and extract
    #[arg()]
    asins: Vec<String>,

    /// Saved HTML file to extract offline (requires --asin)
    #[arg(long)]
    html: Option<PathBuf>,

    /// ASIN identity for --html mode
    #[arg(long)]
    asin: Option<String>,

    /// Storefront base URL
    #[arg(long, default_value = "https://www.amazon.in")]
    base_url: String,

    /// Politeness delay between fetches, in milliseconds
    #[arg(long, default_value_t = 3000)]
    delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Write records to a CSV file instead of JSON on stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Output compact JSON instead of pretty
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.html.is_some() && args.asin.is_none() {
        eprintln!("error: --asin is required when using --html");
        return ExitCode::from(1);
    }
    if args.html.is_some() && !args.asins.is_empty() {
        eprintln!("error: cannot use both --html and positional ASINs");
        return ExitCode::from(1);
    }
    if args.html.is_none() && args.asins.is_empty() {
        eprintln!("error: at least one ASIN is required, or use --html with --asin");
        return ExitCode::from(1);
    }

    let profile = SelectorProfile::builtin();
    let base_url = args.base_url.trim_end_matches('/').to_string();

    // Ordered (asin, record-or-absent) pairs; absent marks a failed item.
    let results: Vec<(String, Option<ProductRecord>)> = if let Some(html_path) = &args.html {
        let asin = args.asin.clone().unwrap_or_default();
        let record = match fs::read_to_string(html_path) {
            Ok(html) => {
                let doc = Html::parse_document(&html);
                let identity = RecordIdentity::now(&asin, format!("{}/dp/{}", base_url, asin));
                Some(extract_product(&doc, &profile, &identity))
            }
            Err(e) => {
                eprintln!("error reading {:?}: {}", html_path, e);
                None
            }
        };
        vec![(asin, record)]
    } else {
        let fetcher = match Fetcher::new(FetchOptions {
            base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            ..Default::default()
        }) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(1);
            }
        };
        let records = batch::scrape_batch(
            &fetcher,
            &profile,
            &args.asins,
            Duration::from_millis(args.delay_ms),
        )
        .await;
        args.asins.iter().cloned().zip(records).collect()
    };

    let failed = results.iter().filter(|(_, r)| r.is_none()).count();

    let output_result = if let Some(path) = &args.out {
        write_csv(path, &results)
    } else {
        print_json(&results, args.compact)
    };
    if let Err(e) = output_result {
        eprintln!("error writing output: {:#}", e);
        return ExitCode::from(1);
    }

    if failed == results.len() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints results as JSON: a lone successful record for the single-item
/// case, otherwise an envelope preserving input order with nulls for
/// failed items.
fn print_json(results: &[(String, Option<ProductRecord>)], compact: bool) -> anyhow::Result<()> {
    let output = if results.len() == 1 && results[0].1.is_some() {
        serde_json::to_value(results[0].1.as_ref())?
    } else {
        let items: Vec<serde_json::Value> = results
            .iter()
            .map(|(asin, record)| {
                json!({
                    "asin": asin,
                    "ok": record.is_some(),
                    "record": record,
                })
            })
            .collect();
        let extracted = results.iter().filter(|(_, r)| r.is_some()).count();
        json!({
            "products": items,
            "total": results.len(),
            "extracted": extracted,
            "failed": results.len() - extracted,
        })
    };

    if compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

/// Writes successful records to a CSV file in the fixed export column
/// order; failed items carry no record and are skipped.
fn write_csv(path: &Path, results: &[(String, Option<ProductRecord>)]) -> anyhow::Result<()> {
    let records: Vec<ProductRecord> = results
        .iter()
        .filter_map(|(_, record)| record.clone())
        .collect();
    if records.is_empty() {
        fs::write(path, "").with_context(|| format!("create {:?}", path))?;
        return Ok(());
    }
    let header = ordered_header(&records);

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {:?}", path))?;
    writer.write_record(&header)?;
    for record in &records {
        writer.write_record(record_row(record, &header))?;
    }
    writer.flush()?;
    Ok(())
}
