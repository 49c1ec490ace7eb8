use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use toulmin_core::EngineConfig;

/// Toulmin CLI - Phase-sequenced argument validation over MCP
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

mod mcp;
mod prompts;

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server (Model Context Protocol) over stdio
    Mcp,

    /// Print the effective engine configuration as JSON
    Config,

    /// Check that the server is runnable with the current environment
    Verify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays a clean JSON-RPC channel.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            let config = EngineConfig::from_env();
            mcp::run_server(config).await?;
        }
        Commands::Config => {
            let config = EngineConfig::from_env();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Verify => {
            let config = EngineConfig::from_env();
            println!("✅ configuration loaded: {}", serde_json::to_string(&config)?);

            let mut failed = false;
            for name in mcp::TOOL_NAMES {
                if config.enable_council || *name != "consult_field_experts" {
                    println!("✅ tool registered: {name}");
                } else {
                    println!("⚠️  tool disabled by TOULMIN_ENABLE_COUNCIL: {name}");
                }
            }
            if mcp::TOOL_NAMES.len() != 6 {
                println!("❌ unexpected tool registry size: {}", mcp::TOOL_NAMES.len());
                failed = true;
            }

            if failed {
                std::process::exit(1);
            }
            println!("✅ toulmin server is ready");
        }
    }

    Ok(())
}
