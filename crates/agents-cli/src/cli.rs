//! CLI argument definitions using clap.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Agent Platform CLI - run agents and chat completions
#[derive(Parser, Debug)]
#[command(name = "agents")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Platform base URL
    #[arg(short = 'u', long, env = "AGENTS_ENDPOINT", global = true)]
    pub base_url: Option<String>,

    /// API token for authentication
    #[arg(short = 't', long, env = "AGENTS_API_TOKEN", global = true)]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an agent custom model as an asynchronous job
    #[command(visible_alias = "run")]
    Execute(commands::execute::ExecuteArgs),

    /// Send a chat completion request
    Chat(commands::chat::ChatArgs),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("no base URL configured (set --base-url or AGENTS_ENDPOINT)"))?;

        match self.command {
            Commands::Execute(args) => {
                commands::execute::execute(args, base_url, self.api_token.as_deref(), self.json)
                    .await
            }
            Commands::Chat(args) => {
                commands::chat::execute(args, base_url, self.api_token.as_deref(), self.json).await
            }
        }
    }
}
