// src/lib.rs

pub mod balances;
pub mod calc;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod node;

use serde::Serialize;
use tracing::debug;

use crate::balances::{NodeData, balance_graph, get_balance, get_liquidity, liquidity_graph};
use crate::cli::{CliArgs, Command};
use crate::config::{default_config_path, load_and_validate};
use crate::dag::TaskGraph;
use crate::errors::Result;
use crate::node::{NodeAccess, SnapshotConnector};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (credentials for the selected node)
/// - the snapshot connector
/// - the balance or liquidity task graph
/// - JSON output on stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let cfg = load_and_validate(&config_path)?;
    debug!(config = %config_path.display(), nodes = cfg.node.len(), "loaded config");

    let access = NodeAccess::new(cfg, SnapshotConnector);

    match args.command {
        Command::Balance(balance_args) => {
            let options = balance_args.into();
            if args.dry_run {
                print_dry_run("balance", &balance_graph(&options, &access));
                return Ok(());
            }
            let report = get_balance(&options, &access).await?;
            print_json(&report)
        }
        Command::Liquidity(liquidity_args) => {
            let options = liquidity_args.into();
            if args.dry_run {
                print_dry_run("liquidity", &liquidity_graph(&options, &access));
                return Ok(());
            }
            let report = get_liquidity(&options, &access).await?;
            print_json(&report)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Simple dry-run output: print tasks and their dependencies.
fn print_dry_run(output: &str, graph: &TaskGraph<NodeData>) {
    println!("balancedag dry-run");
    println!("  output task = {output}");
    println!();

    println!("tasks ({}):", graph.len());
    for (name, deps) in graph.describe() {
        println!("  - {name}");
        if !deps.is_empty() {
            println!("      after: {:?}", deps);
        }
    }

    debug!("dry-run complete (no execution)");
}
