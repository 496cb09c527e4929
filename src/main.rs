mod cli;

use airdrop_checker::{
    checker::{BatchChecker, CheckSummary},
    config::Config,
    error::{self, CheckerError},
    provider::HttpEligibilityClient,
    report::{self, aggregate, Report},
    server, utils,
};
use clap::Parser;
use cli::{Cli, Commands};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("airdrop_checker=debug,info")
        .init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Check {
            addresses,
            file,
            format,
            csv,
        } => check_addresses(&config, addresses, file, &format, csv).await,

        Commands::Serve { listen } => {
            info!("Starting checking service...");
            server::serve(&config, listen).await
        }
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn check_addresses(
    config: &Config,
    addresses: Vec<String>,
    file: Option<String>,
    format: &str,
    csv: Option<String>,
) -> error::Result<()> {
    let mut lines = addresses;
    if let Some(path) = file {
        let contents = std::fs::read_to_string(&path)?;
        lines.extend(contents.lines().map(str::to_string));
    }

    let deduped = BatchChecker::dedup_addresses(&lines);
    if deduped.is_empty() {
        return Err(CheckerError::InvalidInput(
            "no addresses provided".to_string(),
        ));
    }

    println!(
        "{}",
        format!("Checking {} addresses...", deduped.len()).cyan()
    );

    let provider = Arc::new(HttpEligibilityClient::new(config.provider.clone())?);
    let checker = BatchChecker::new(provider, &config.checker);

    let bar = ProgressBar::new(checker.batch_count(deduped.len()) as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} batch {pos}/{len}")
            .expect("progress template"),
    );

    let records = checker
        .check_addresses_with(&deduped, |done, _total| bar.set_position(done as u64))
        .await;
    bar.finish_and_clear();

    let summary = CheckSummary::of(&records);
    let aggregated = aggregate(&records);

    if format == "json" {
        let output = serde_json::json!({
            "summary": &summary,
            "report": &aggregated,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&aggregated, &summary);
    }

    if let Some(path) = csv {
        report::write_csv(&aggregated, &path)?;
        println!("{}", format!("✓ Report written to {}", path).green());
    }

    Ok(())
}

fn print_report(report: &Report, summary: &CheckSummary) {
    println!("\n{}", "=== Allocation Report ===".cyan().bold());
    println!("Addresses Checked: {}", summary.total);
    println!("Succeeded:         {} ✓", summary.succeeded.to_string().green());
    println!("Failed:            {} ✗", summary.failed.to_string().yellow());

    if report.is_empty() {
        return;
    }

    let mut widths = vec![20usize];
    widths.extend(report.categories.iter().map(|c| c.len().max(12)));
    widths.push(16);
    let total_width = widths.iter().sum::<usize>() + widths.len() * 2;

    println!();
    utils::print_table_border(total_width);
    let mut header: Vec<&str> = vec!["Address"];
    header.extend(report.categories.iter().map(String::as_str));
    header.push("Total Allocation");
    utils::print_table_row(&header, &widths);
    utils::print_table_border(total_width);

    for row in &report.rows {
        let address = utils::format_address(&row.address);
        let cells: Vec<String> = report
            .categories
            .iter()
            .map(|category| match row.categories.get(category) {
                Some(amount) => utils::format_amount(*amount),
                None => "-".to_string(),
            })
            .collect();
        let total = utils::format_total(row.total);

        let mut columns: Vec<&str> = vec![&address];
        columns.extend(cells.iter().map(String::as_str));
        columns.push(&total);
        utils::print_table_row(&columns, &widths);
    }
    utils::print_table_border(total_width);
}
