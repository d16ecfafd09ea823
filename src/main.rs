//! ragchat CLI - session and message-persistence core for an embeddable
//! RAG chat widget.

use clap::{Parser, Subcommand};
use ragchat::cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
/// - Dirty working directory: "0.1.0-dev (abc1234-dirty)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("RAGCHAT_GIT_HASH");
    const IS_RELEASE: &str = env!("RAGCHAT_IS_RELEASE");

    // Use a static to avoid repeated allocations
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "ragchat")]
#[command(author, version = version(), about = "Chat session core with RAG retrieval", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively (demo mode unless endpoints are configured).
    Chat,

    /// Show the locally persisted conversation.
    History,

    /// Print the stable session identifier.
    Session,

    /// Reset the conversation to the welcome message.
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ragchat=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat => cli::chat::run().await,
        Commands::History => cli::history::run(),
        Commands::Session => cli::session::run(),
        Commands::Reset => cli::reset::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ragchat: error: {e}");
            ExitCode::FAILURE
        }
    }
}
