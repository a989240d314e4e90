use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use pkgtable::config::{config_path, load_config};
use pkgtable::logging::init_logging;
use pkgtable::parser::{PackageInfo, TabularDecoder};
use pkgtable::version::compare_versions;

#[derive(Parser)]
#[command(name = "pkgtable")]
#[command(version, about = "Decode package manager tables into JSON")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/pkgtable/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a package table into a JSON array
    Decode {
        /// Read the table from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
        /// Only keep packages whose available version is newer
        #[arg(long)]
        upgradable: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the columns found in the header line
    Columns {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Compare an installed version against the latest one
    Compare { current: String, latest: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(config_path);
    let config = load_config(&path)?;
    let _guard = init_logging(&config.log)?;
    debug!("Loaded config from {}", path.display());

    match cli.command {
        Command::Decode {
            input,
            upgradable,
            pretty,
        } => {
            let text = read_input(input.as_deref())?;
            let decoder = TabularDecoder::from_config(&config.decoder);
            let packages: Vec<PackageInfo> = decoder
                .decode::<PackageInfo>(&text)
                .filter(|package| !upgradable || package.has_upgrade())
                .collect();
            info!("Decoded {} packages", packages.len());

            let json = if pretty {
                serde_json::to_string_pretty(&packages)?
            } else {
                serde_json::to_string(&packages)?
            };
            println!("{}", json);
        }
        Command::Columns { input } => {
            let text = read_input(input.as_deref())?;
            let decoder = TabularDecoder::from_config(&config.decoder);
            let rows = decoder.decode::<PackageInfo>(&text);
            for field in rows.headers().fields() {
                println!("{}\t{}", field.name, field.offset);
            }
        }
        Command::Compare { current, latest } => {
            println!("{}", compare_versions(&current, &latest).as_str());
        }
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
