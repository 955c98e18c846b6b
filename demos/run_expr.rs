//! Example: Evaluate one expression from the command line
//!
//! Usage: cargo run --example run_expr [--json] [--config <config.json>] '<expression>'
//!
//! Set `RUST_LOG=fuselisp=trace` to watch frames open and close.

use anyhow::Context;
use fuselisp::{EvalConfig, Evaluator};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut config = EvalConfig::default();
    let mut source = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading config file '{}'", path))?;
                config = EvalConfig::from_json(&text)?;
            }
            _ => source = Some(arg),
        }
    }

    let Some(source) = source else {
        eprintln!("Usage: cargo run --example run_expr [--json] [--config <config.json>] '<expression>'");
        eprintln!("\nExample expressions:");
        eprintln!("  (plus 1 (plus 2 3))");
        eprintln!("  (def a \"hello \" (def b \"world!\" (concat a b)))");
        process::exit(2);
    };

    let evaluator = Evaluator::new()?.with_config(config);

    match evaluator.evaluate(&source) {
        Ok(value) if json => println!("{}", serde_json::to_string(&value)?),
        Ok(value) => println!("{}", value),
        Err(err) => {
            eprintln!("{}: {}", err.kind(), err);
            process::exit(1);
        }
    }

    Ok(())
}
