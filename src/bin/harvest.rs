//! Lead harvester: walks search result pages for `<term> companies` and
//! writes the leads to a timestamped CSV snapshot.
//! Run with: cargo run --bin lead-scout-harvest -- "software houses"

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use lead_scout::leads::{self, HarvestOptions};
use lead_scout::scraping::ScrapingService;
use lead_scout::start_lead_scout::init_tracing;

/// Characters of description shown per previewed lead.
const PREVIEW_CHARS: usize = 100;

/// Leads previewed after a run.
const PREVIEW_LEADS: usize = 5;

/// Harvester arguments.
#[derive(Parser, Debug)]
#[command(name = "lead-scout-harvest")]
#[command(about = "Harvest company leads from search result pages")]
struct Args {
    /// Industry or type of companies to search for (prompted when omitted)
    search_term: Option<String>,

    /// Number of result pages to walk
    #[arg(short, long, default_value_t = 2)]
    pages: usize,

    /// Directory receiving the CSV snapshot
    #[arg(short, long, env = "LEAD_SCOUT_OUTPUT_DIR", default_value = ".")]
    output: PathBuf,
}

fn prompt_search_term() -> Result<String> {
    print!("Enter industry or company type to search (e.g., 'software companies in karachi'): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read search term")?;
    Ok(line)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let search_term = match args.search_term {
        Some(term) => term,
        None => prompt_search_term()?,
    };
    let search_term = search_term.trim();
    if search_term.is_empty() {
        bail!("search term must not be empty");
    }

    let service = ScrapingService::with_defaults().context("failed to create scraping service")?;
    let options = HarvestOptions::new(search_term)
        .with_pages(args.pages)
        .with_output_dir(args.output);

    println!("Scraping leads for: {search_term}");
    let report = leads::harvest(&service, &options)
        .await
        .context("failed to write lead snapshot")?;

    let Some(snapshot) = &report.snapshot else {
        println!("No leads found.");
        return Ok(());
    };

    println!(
        "Successfully scraped {} leads and saved to {}",
        report.leads.len(),
        snapshot.display()
    );
    if report.pages_failed > 0 {
        println!("{} page(s) failed and were skipped", report.pages_failed);
    }

    println!("\nPreview of scraped leads:");
    for (rank, lead) in report.leads.iter().take(PREVIEW_LEADS).enumerate() {
        println!("\n{}. Company: {}", rank + 1, lead.company_name);
        println!("Website: {}", lead.website);
        println!("Description: {}", lead.preview(PREVIEW_CHARS));
    }

    Ok(())
}
