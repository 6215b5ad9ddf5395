pub mod analyze;
pub mod config;

use clap::{Parser, Subcommand};

/// Phoenix Scout: scouting-document analysis for the coaching staff.
#[derive(Debug, Parser)]
#[command(name = "phoenix-scout", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Run the analysis workflow once and print the latest summaries.
    Analyze {
        /// Analyze only this match id instead of every dataset.
        #[arg(long = "match")]
        match_id: Option<String>,
        /// Print the full report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the most recent stored summaries.
    Recent {
        #[arg(long, default_value_t = 3)]
        limit: usize,
        /// Print the raw rows as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load `.env.local` then `.env`; variables already set in the process
/// environment win over both.
pub fn load_env_files() {
    for file in [".env.local", ".env"] {
        if let Err(e) = dotenvy::from_filename(file) {
            if !e.not_found() {
                eprintln!("WARNING: failed to load {file}: {e}");
            }
        }
    }
}

/// Load the configuration from the path in `PS_CONFIG` (or `config.toml`
/// by default).  A missing file yields the defaults.  Returns the parsed
/// [`Config`](ps_domain::config::Config) and the path that was used.
pub fn load_config() -> anyhow::Result<(ps_domain::config::Config, String)> {
    let config_path = std::env::var("PS_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        ps_domain::config::Config::default()
    };

    Ok((config, config_path))
}
