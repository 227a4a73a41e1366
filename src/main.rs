use anyhow::Result;
use clap::{Parser, Subcommand};
use sourcerer::chunker::Language;
use sourcerer::config;
use sourcerer::mcp_server::SourcererServer;
use tracing_subscriber::EnvFilter;

/// Sourcerer: semantic codebase navigation MCP server
#[derive(Parser)]
#[command(name = "sourcerer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for semantic code search and navigation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server over stdio (default mode)
    Serve,

    /// Show version and system information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the JSON-RPC stream, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            show_version_info();
        }
        Some(Commands::Serve) | None => {
            if let Err(e) = SourcererServer::serve_stdio().await {
                tracing::error!("Fatal error in MCP server: {:#}", e);
                eprintln!("Fatal error: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn show_version_info() {
    println!("sourcerer v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Configuration:");
    println!("  Workspace Root:  ${} (default: .)", config::WORKSPACE_ROOT_ENV);
    println!("  Persisted State: <workspace>/{}", config::DB_DIR);
    println!();

    println!("Embedding Model:");
    println!("  Model:           all-MiniLM-L6-v2");
    println!("  Dimensions:      384");
    println!("  Provider:        FastEmbed (local, no API calls)");
    println!();

    println!("Supported Languages:");
    println!("  Go, Python, JavaScript, TypeScript, Markdown");
    println!(
        "  Extensions:      {}",
        Language::supported_extensions().join(", ")
    );
}
