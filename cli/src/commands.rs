use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use keypath::cast::parse_duration;
use keypath::Config;

#[derive(Parser)]
#[command(name = "keypath", about = "Inspect resolved configuration values")]
pub struct Cli {
    /// Explicit config file (skips candidate discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only absorb environment variables carrying this prefix
    #[arg(long, global = true)]
    pub env_prefix: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved value at a dotted key
    Get {
        /// Dotted key, e.g. database.port
        key: String,

        /// Fallback when the key is missing or unconvertible
        #[arg(long)]
        default: Option<String>,

        /// Coerce to this type before printing
        #[arg(long = "as", value_enum, default_value_t = Output::String)]
        output: Output,
    },
    /// Print the whole resolved tree as JSON
    Dump,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Output {
    String,
    Int,
    Float,
    Bool,
    Duration,
    Time,
    Json,
}

pub fn handle_get(config: &Config, key: &str, output: Output, default: Option<&str>) -> Result<()> {
    match output {
        Output::String => {
            let default = default.unwrap_or_default().to_string();
            println!("{}", config.get_or(key, default));
        }
        Output::Int => {
            let default = default.and_then(|d| d.parse().ok()).unwrap_or(0i64);
            println!("{}", config.get_or(key, default));
        }
        Output::Float => {
            let default = default.and_then(|d| d.parse().ok()).unwrap_or(0f64);
            println!("{}", config.get_or(key, default));
        }
        Output::Bool => {
            let default = default.and_then(|d| d.parse().ok()).unwrap_or(false);
            println!("{}", config.get_or(key, default));
        }
        Output::Duration => {
            let default = default.and_then(parse_duration).unwrap_or(Duration::ZERO);
            println!("{:?}", config.get_or(key, default));
        }
        Output::Time => {
            println!("{}", config.get_time(key).to_rfc3339());
        }
        Output::Json => match config.get(key) {
            Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
            None => bail!("key not found: {key}"),
        },
    }
    Ok(())
}

pub fn handle_dump(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config.as_value())?);
    Ok(())
}
