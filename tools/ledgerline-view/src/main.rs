//! Render a wallet's payment list from JSON exports.
//!
//! Reads an lnd-style payment list and, optionally, a node list (either a
//! bare array or a graph dump with a `nodes` field), and prints one activity
//! row per payment:
//!
//! ```text
//! ledgerline-view --payments payments.json --nodes graph.json --unit bits
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ledgerline_common::activity::{ActivityRow, Subtitle};
use ledgerline_common::currency::{CryptoUnit, FiatRate, UnitFormatter};
use ledgerline_common::directory::{NodeDirectory, NodeDirectoryEntry};
use ledgerline_common::payment::PaymentRecord;
use ledgerline_common::presentation::PresentationKind;
use ledgerline_common::IdentityResolver;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ledgerline-view", about = "Render a Lightning payment list")]
struct Cli {
    /// JSON file holding an array of payments.
    #[arg(long)]
    payments: PathBuf,

    /// JSON file holding known nodes (array, or object with a `nodes` array).
    #[arg(long)]
    nodes: Option<PathBuf>,

    /// Label shown when a payment's counterparty cannot be determined.
    #[arg(long, default_value = "Unknown")]
    unknown_label: String,

    /// Crypto display unit: sats, bits or btc.
    #[arg(long, default_value = "sats")]
    unit: CryptoUnit,

    /// Fiat price of one BTC, used for the fiat column.
    #[arg(long, value_parser = parse_fiat_rate)]
    fiat_rate: Option<f64>,

    /// ISO 4217 code for --fiat-rate.
    #[arg(long, default_value = "USD")]
    fiat_code: String,

    /// Emit rows as a JSON array instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_fiat_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(format!("'{raw}' is not a usable price (must be finite and >= 0)"));
    }
    Ok(rate)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeList {
    Bare(Vec<NodeDirectoryEntry>),
    Graph { nodes: Vec<NodeDirectoryEntry> },
}

impl NodeList {
    fn into_directory(self) -> NodeDirectory {
        match self {
            NodeList::Bare(nodes) | NodeList::Graph { nodes } => nodes.into_iter().collect(),
        }
    }
}

fn load_directory(path: &Path) -> Result<NodeDirectory> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading node list {}", path.display()))?;
    let list: NodeList = serde_json::from_str(&raw)
        .with_context(|| format!("parsing node list {}", path.display()))?;
    Ok(list.into_directory())
}

fn load_payments(path: &Path) -> Result<Vec<PaymentRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading payments {}", path.display()))?;
    PaymentRecord::list_from_json(&raw)
        .with_context(|| format!("parsing payments {}", path.display()))
}

fn status_label(kind: PresentationKind) -> &'static str {
    match kind {
        PresentationKind::Historical => "",
        PresentationKind::Processing => "processing",
        PresentationKind::Success => "success",
        PresentationKind::Failure => "error",
        PresentationKind::Unknown => "unknown status",
    }
}

fn render_text(row: &ActivityRow) -> String {
    let detail = match &row.subtitle {
        Some(Subtitle::Timestamp { at }) => at.format("%b %-d, %H:%M").to_string(),
        Some(Subtitle::Status {
            kind,
            message: Some(message),
        }) if !message.is_empty() => format!("{} {message}", status_label(*kind)),
        Some(Subtitle::Status { kind, .. }) => status_label(*kind).to_string(),
        None => String::new(),
    };
    let fiat = row.amount.fiat.as_deref().unwrap_or("");
    let dim = if row.state.de_emphasized { " (dimmed)" } else { "" };
    format!(
        "{:<24} {:<28} {:>20} {:>14}{dim}",
        row.title, detail, row.amount.crypto, fiat
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let directory = match &cli.nodes {
        Some(path) => load_directory(path)?,
        None => {
            warn!("no node list given; counterparties will show as truncated keys");
            NodeDirectory::default()
        }
    };
    let payments = load_payments(&cli.payments)?;
    info!(
        payments = payments.len(),
        nodes = directory.len(),
        "loaded activity"
    );

    let formatter = UnitFormatter {
        unit: cli.unit,
        rate: cli.fiat_rate.map(|per_btc| FiatRate {
            code: cli.fiat_code.clone(),
            per_btc,
        }),
    };
    let resolver = IdentityResolver::new();

    let rows: Vec<ActivityRow> = payments
        .iter()
        .map(|payment| {
            ActivityRow::build(payment, &resolver, &directory, &cli.unknown_label, &formatter)
        })
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{}", render_text(row));
        }
    }
    Ok(())
}
