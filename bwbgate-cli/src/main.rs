//! bwbgate CLI — weekly entry evaluation commands.
//!
//! Commands:
//! - `evaluate` — run the full decision pipeline from a TOML run file
//! - `propose` — build a candidate broken wing butterfly from a chain CSV

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use bwbgate_core::builder::build_structure;
use bwbgate_core::domain::{BwbStructure, StructureKind};
use bwbgate_core::{Decision, Engine, Verdict};

mod config;

use config::{load_chain, RunConfig};

#[derive(Parser)]
#[command(name = "bwbgate", about = "bwbgate CLI — weekly BWB entry gate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full decision pipeline from a TOML run file.
    Evaluate {
        /// Path to a TOML run file.
        #[arg(long)]
        config: PathBuf,

        /// Write the full decision as JSON to this path.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Build a candidate broken wing butterfly from an option chain CSV.
    Propose {
        /// Option-chain CSV with `type,strike,delta,bid,ask` columns.
        #[arg(long)]
        chain: PathBuf,

        /// Structure kind: put_credit_bwb or call_debit_bwb.
        #[arg(long, default_value = "put_credit_bwb")]
        kind: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { config, json } => run_evaluate(&config, json.as_deref()),
        Commands::Propose { chain, kind } => run_propose(&chain, &kind),
    }
}

fn run_evaluate(config_path: &Path, json_path: Option<&Path>) -> Result<()> {
    let run_config = RunConfig::from_file(config_path)?;
    let context = run_config.build_context()?;
    let engine = Engine::new(run_config.engine_config());
    let decision = engine.evaluate(&context);

    print_decision(&decision);

    if let Some(path) = json_path {
        let json = serde_json::to_string_pretty(&decision)?;
        std::fs::write(path, json)?;
        println!("Decision written to: {}", path.display());
    }

    if decision.verdict == Verdict::NoTrade {
        std::process::exit(1);
    }
    Ok(())
}

fn run_propose(chain_path: &Path, kind_name: &str) -> Result<()> {
    let kind = parse_kind(kind_name)?;
    let chain = load_chain(chain_path)?;
    let structure = build_structure(&chain, kind)?;
    print_structure(&structure);
    Ok(())
}

fn parse_kind(name: &str) -> Result<StructureKind> {
    match name {
        "put_credit_bwb" => Ok(StructureKind::PutCreditBwb),
        "call_debit_bwb" => Ok(StructureKind::CallDebitBwb),
        other => bail!("unknown structure kind: {other} (expected put_credit_bwb or call_debit_bwb)"),
    }
}

fn print_decision(decision: &Decision) {
    println!("{:<28} {:<12} {:<6} reason", "rule", "category", "result");
    for result in decision.record.results() {
        let outcome = if result.passed { "PASS" } else { "FAIL" };
        if result.reason.is_empty() {
            println!(
                "{:<28} {:<12} {:<6}",
                result.rule_id.as_str(),
                result.category.as_str(),
                outcome
            );
        } else {
            println!(
                "{:<28} {:<12} {:<6} {}",
                result.rule_id.as_str(),
                result.category.as_str(),
                outcome,
                result.reason
            );
        }
    }
    println!();
    match decision.verdict {
        Verdict::TradeAllowed => println!("verdict: TRADE_ALLOWED"),
        Verdict::NoTrade => println!("verdict: NO_TRADE"),
    }
    if let Some(structure) = &decision.structure {
        print_structure(structure);
    }
    println!("fingerprint: {}", decision.context_fingerprint);
}

fn print_structure(structure: &BwbStructure) {
    println!("structure: {:?}", structure.kind);
    for leg in &structure.legs {
        let price = leg
            .price
            .map(|p| format!(" @ {p:.2}"))
            .unwrap_or_default();
        println!(
            "  {:?} {} x {:?} {}{}",
            leg.action, leg.quantity, leg.option_type, leg.strike, price
        );
    }
    if let Some(premium) = structure.net_premium() {
        println!("  net premium: {premium:.2}");
    }
    if let Some(max_loss) = structure.max_loss() {
        println!("  max loss: {max_loss:.2}");
    }
}
