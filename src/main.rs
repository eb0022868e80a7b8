// src/main.rs
// TestRail MCP server

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use testrail_mcp::{
    TestRailClient,
    config::{self, EnvConfig},
    mcp::TestRailServer,
    sections::{DiscoveryOutcome, discover, suite_prompt},
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "testrail-mcp")]
#[command(about = "MCP server for the TestRail REST API")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server over stdio (default)
    Serve,

    /// Discover the section tree of a project and print it
    Discover {
        /// Project ID
        #[arg(short, long)]
        project: u64,

        /// Suite ID (required for multi-suite projects)
        #[arg(short, long)]
        suite: Option<u64>,

        /// Print the full JSON report instead of the ASCII tree
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration and print a report
    Config,
}

async fn run_mcp_server(config: &EnvConfig) -> Result<()> {
    let validation = config.validate();
    if !validation.is_valid() {
        eprintln!("{}", validation.report());
        bail!("invalid configuration");
    }
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }

    let client = Arc::new(TestRailClient::from_config(config)?);
    info!(base_url = client.base_url(), "Starting TestRail MCP server");

    let server = TestRailServer::new(client);

    // Run with stdio transport
    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

async fn run_discover(config: &EnvConfig, project: u64, suite: Option<u64>, json: bool) -> Result<()> {
    let client = TestRailClient::from_config(config)?;

    match discover(&client, project, suite).await? {
        DiscoveryOutcome::Discovered(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} ({}) / suite {}: {} sections",
                    report.project.name,
                    report.project.id,
                    report.suite.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                    report.total_sections
                );
                println!("{}", report.tree);
            }
            Ok(())
        }
        DiscoveryOutcome::SuiteRequired { suites, .. } => bail!(suite_prompt(&suites)),
    }
}

fn run_config(config: &EnvConfig) -> Result<()> {
    let validation = config.validate();
    println!("{}", validation.report());
    if !validation.is_valid() {
        bail!("invalid configuration");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();

    let cli = Cli::parse();

    // Set up logging based on command
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        match &cli.command {
            Some(Commands::Serve) | None => Level::WARN, // Quiet for MCP stdio
            Some(Commands::Discover { .. }) | Some(Commands::Config) => Level::INFO,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let env_config = EnvConfig::load();

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_server(&env_config).await,
        Some(Commands::Discover {
            project,
            suite,
            json,
        }) => run_discover(&env_config, project, suite, json).await,
        Some(Commands::Config) => run_config(&env_config),
    }
}
