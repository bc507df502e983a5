//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::service::http::DEFAULT_USER_AGENT;
use crate::service::HISTORY_LIMIT;

/// SEO Optimizer: score a page's on-page SEO and keep a short history
#[derive(Parser, Debug)]
#[command(name = "seo-optimizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Print the most recent analyses
    History {
        /// How many records to show
        #[arg(long, short, default_value_t = HISTORY_LIMIT)]
        limit: u32,
    },
    /// Delete every stored analysis
    Clear,
}

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Address the HTTP service listens on
    #[arg(long, env = "SEO_BIND", default_value = "127.0.0.1:5000", global = true)]
    pub bind: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "SEO_DATABASE", default_value = "seo_analysis.db", global = true)]
    pub database: PathBuf,

    /// Time limit for fetching a page, in seconds
    #[arg(long, env = "SEO_FETCH_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub fetch_timeout_secs: u64,

    /// User-Agent sent with page fetches
    #[arg(long, env = "SEO_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,
}

impl Settings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database: PathBuf::from("seo_analysis.db"),
            fetch_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
