//! gitissue - command line client for GitHub issues
//!
//! Create, edit, get and search issues on github.com, authenticated
//! with a bearer token stored by `gitissue auth`.

mod commands;
mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{AuthArgs, CreateArgs, EditArgs, GetArgs, SearchArgs};
use token::TokenStore;

/// gitissue: create, edit, get and search GitHub issues
#[derive(Parser, Debug)]
#[command(name = "gitissue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the token file (overrides the default location)
    #[arg(long, global = true, env = "GITISSUE_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an OAuth token and store it for later calls
    Auth(AuthArgs),

    /// Create an issue
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Edit an issue's state or label
    #[command(visible_alias = "e")]
    Edit(EditArgs),

    /// Show a single issue
    #[command(visible_alias = "g")]
    Get(GetArgs),

    /// Search a repository's issues
    #[command(visible_alias = "s")]
    Search(SearchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let store = TokenStore::new(cli.token_file.clone());

    match cli.command {
        Commands::Auth(args) => args.execute(&store).await,
        Commands::Create(args) => args.execute(&store).await,
        Commands::Edit(args) => args.execute(&store).await,
        Commands::Get(args) => args.execute(&store, cli.verbose).await,
        Commands::Search(args) => args.execute(&store, cli.verbose).await,
    }
}
