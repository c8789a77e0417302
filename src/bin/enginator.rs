//! enginator -- build connection targets from JSON payloads.
//!
//! Usage:
//!   enginator spec
//!   echo '{"engine": "postgresql", "host": "localhost"}' | enginator url --catalog examples
//!   echo '{"engine": "sqlite", "path": "app.db"}' | enginator namespaces

use std::io::Read;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};

#[derive(Parser)]
#[command(name = "enginator", version, about = "Build database connection targets from JSON payloads")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the OpenAPI document describing every schema
    Spec,
    /// Read a payload on stdin and print its connection target
    Url(Overrides),
    /// Read a payload on stdin and list the catalogs it can see
    Catalogs(Overrides),
    /// Read a payload on stdin and list the namespaces it can see
    Namespaces(Overrides),
}

#[derive(Args)]
struct Overrides {
    /// Catalog to connect to instead of the payload's
    #[arg(long)]
    catalog: Option<String>,

    /// Namespace to connect to instead of the payload's
    #[arg(long)]
    namespace: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Spec => {
            println!("{}", serde_json::to_string_pretty(&enginator::build_spec())?);
        }
        Command::Url(overrides) => {
            let data = read_payload()?;
            let output = url_output(&data, &overrides)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Catalogs(overrides) => {
            for catalog in list(overrides, Level::Catalogs)? {
                println!("{catalog}");
            }
        }
        Command::Namespaces(overrides) => {
            for namespace in list(overrides, Level::Namespaces)? {
                println!("{namespace}");
            }
        }
    }

    Ok(())
}

enum Level {
    Catalogs,
    Namespaces,
}

fn list(overrides: Overrides, level: Level) -> Result<Vec<String>> {
    let data = read_payload()?;

    smol::block_on(async {
        let engine = enginator::get_engine(
            &data,
            overrides.catalog.as_deref(),
            overrides.namespace.as_deref(),
        )?;
        let result = match level {
            Level::Catalogs => enginator::get_catalogs(engine.as_ref()).await,
            Level::Namespaces => enginator::get_namespaces(engine.as_ref()).await,
        };
        engine.close().await;
        result.with_context(|| format!("Failed to list from {}", engine.display_name()))
    })
}

fn read_payload() -> Result<Map<String, Value>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read payload from stdin")?;
    parse_payload(&input)
}

fn parse_payload(input: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(input).context("Payload is not valid JSON")? {
        Value::Object(data) => Ok(data),
        other => bail!("Payload must be a JSON object, got {other}"),
    }
}

/// Connection target of a payload, password masked.
fn url_output(data: &Map<String, Value>, overrides: &Overrides) -> Result<Value> {
    let target = enginator::get_target(
        data,
        overrides.catalog.as_deref(),
        overrides.namespace.as_deref(),
    )?;
    Ok(json!({
        "url": target.url.to_masked_string(),
        "backend": target.url.backend_name(),
        "driver": target.url.driver_name(),
        "connect_args": target.connect_args,
        "search_path": target.search_path,
    }))
}
