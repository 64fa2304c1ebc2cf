use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use maps_tools::{MapsClient, McpServer, ToolCall, ToolExecutor, ToolRegistry};

#[derive(Parser)]
#[command(name = "maps-tools")]
#[command(about = "Google Maps tools for agent hosts")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the Google Maps API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over MCP on stdin/stdout
    Serve,
    /// Print the tool definitions as JSON
    List,
    /// Run a single tool and print its result
    Call {
        /// Tool name, e.g. geocode
        tool: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // stdout carries MCP frames, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut builder = MapsClient::builder();
    if let Some(base_url) = cli.base_url {
        builder = builder.with_base_url(base_url);
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.with_timeout(Duration::from_secs(timeout));
    }
    let client = Arc::new(builder.build().context("failed to create HTTP client")?);

    let registry = ToolRegistry::with_maps_tools(client);
    let executor = ToolExecutor::new(Arc::new(Mutex::new(registry)));

    match cli.command {
        Commands::Serve => {
            tracing::info!("Serving Google Maps tools over stdio");
            McpServer::new(executor).serve_stdio().await?;
        }
        Commands::List => {
            let definitions = executor.get_tool_definitions().await;
            println!("{}", serde_json::to_string_pretty(&definitions)?);
        }
        Commands::Call { tool, args } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;
            if !arguments.is_object() {
                bail!("--args must be a JSON object");
            }
            let result = executor.execute(&ToolCall::new(tool, arguments)).await?;
            println!("{}", serde_json::to_string_pretty(&result.output)?);
        }
    }

    Ok(())
}
