//! Server configuration
//!
//! Every setting can be given as a command-line flag or through an
//! `EVENTHUB_*` environment variable; flags win.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::ConfigError;
use crate::notify::DEFAULT_CAPACITY;
use crate::types::{default_regions, Region};

/// Range of bcrypt costs the hasher accepts
pub const MIN_PASSWORD_COST: u32 = 4;
pub const MAX_PASSWORD_COST: u32 = 31;

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "event-hub-server")]
#[command(version, about = "Event discovery and registration server", long_about = None)]
pub struct Args {
    /// IP address to bind
    #[arg(long, env = "EVENTHUB_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "EVENTHUB_PORT", default_value_t = 3030)]
    pub port: u16,

    /// JSONL file holding events, users, notifications and regions
    #[arg(long, env = "EVENTHUB_DATA_FILE", default_value = "eventhub.jsonl")]
    pub data_file: PathBuf,

    /// Buffered push messages before slow listeners lag
    #[arg(long, env = "EVENTHUB_BROADCAST_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub broadcast_capacity: usize,

    /// Region names to seed, separated by ';' (defaults to the built-in list)
    #[arg(long, env = "EVENTHUB_REGIONS", value_delimiter = ';')]
    pub regions: Vec<String>,

    /// bcrypt cost for password hashing
    #[arg(long, env = "EVENTHUB_PASSWORD_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub password_cost: u32,

    /// Emit logs as JSON
    #[arg(long, env = "EVENTHUB_LOG_JSON")]
    pub log_json: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub broadcast_capacity: usize,
    pub regions: Vec<Region>,
    pub password_cost: u32,
}

impl Config {
    /// Build and validate configuration from parsed arguments
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        if args.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }
        if args.broadcast_capacity == 0 {
            return Err(ConfigError::Invalid(
                "broadcast capacity must be at least 1".to_string(),
            ));
        }
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&args.password_cost) {
            return Err(ConfigError::Invalid(format!(
                "password cost must be between {MIN_PASSWORD_COST} and {MAX_PASSWORD_COST}"
            )));
        }

        let bind_addr: SocketAddr = format!("{}:{}", args.host, args.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad bind address '{}': {e}", args.host)))?;

        let names: Vec<&str> = args
            .regions
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();
        let regions: Vec<Region> = if names.is_empty() {
            default_regions()
        } else {
            names.into_iter().map(Region::new).collect()
        };
        // Region ids are slugs, so "NCR" and "ncr" would collapse into one
        for (i, region) in regions.iter().enumerate() {
            if let Some(clash) = regions[..i].iter().find(|r| r.id == region.id) {
                return Err(ConfigError::Invalid(format!(
                    "regions '{}' and '{}' share the id '{}'",
                    clash.name, region.name, region.id
                )));
            }
        }

        Ok(Self {
            bind_addr,
            data_file: resolve_path(&args.data_file),
            broadcast_capacity: args.broadcast_capacity,
            regions,
            password_cost: args.password_cost,
        })
    }
}

/// Relative paths resolve against the current directory
fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}
