//! Unusual Whales MCP server
//!
//! Serves the Unusual Whales tools over the stdio MCP transport. The `list`
//! and `call` subcommands run the same tools from the terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rmcp::ServiceExt;
use tracing::info;
use uw_api::{ApiConfig, ApiConfigBuilder, ToolSet, UnusualWhalesClient};
use uw_mcp::UnusualWhalesServer;
use uw_mcp::render::{records_json, table_json, text_table};
use uw_tools::Tool;
use uw_utils::{LogFormat, init_tracing_with};

#[derive(Parser, Debug)]
#[command(name = "uw-mcp", version)]
#[command(about = "MCP server for the Unusual Whales market data API", long_about = None)]
struct Cli {
    /// API base URL (overrides UNUSUAL_WHALES_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides UNUSUAL_WHALES_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log format written to stderr: pretty or json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the tools over stdio (default)
    Serve,
    /// List available tools
    List,
    /// Call one tool and print its result
    Call {
        /// Tool name, e.g. get_flow_alerts
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Columns, rows and row count
    Json,
    /// One JSON object per row
    Records,
    /// Text table
    Table,
}

fn load_config(cli: &Cli) -> anyhow::Result<ApiConfig> {
    let mut builder = ApiConfigBuilder::from_env().context("Failed to load configuration")?;
    if let Some(url) = &cli.base_url {
        builder = builder.base_url(url.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    builder.build().context("Invalid configuration")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with("info", cli.log_format);

    let config = load_config(&cli)?;
    info!(base_url = %config.base_url, "Configuration loaded");

    let client = Arc::new(UnusualWhalesClient::new(&config)?);
    let tools = Arc::new(ToolSet::new(client));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("uw-mcp starting (stdio transport)");
            let server = UnusualWhalesServer::new(tools);
            let service = server.serve(rmcp::transport::io::stdio()).await?;
            service.waiting().await?;
        }
        Command::List => {
            for tool in tools.registry().list_tools() {
                println!("{:<28} {}", tool.name(), tool.description());
            }
        }
        Command::Call {
            tool,
            params,
            format,
        } => {
            let params: serde_json::Value =
                serde_json::from_str(&params).context("--params must be valid JSON")?;
            let table = tools.registry().execute(&tool, params).await?;
            let output = match format {
                OutputFormat::Json => table_json(&table),
                OutputFormat::Records => records_json(&table),
                OutputFormat::Table => text_table(&table),
            };
            println!("{output}");
        }
    }

    Ok(())
}
