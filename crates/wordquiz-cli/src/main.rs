//! wordquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wordquiz_core::SessionMode;

mod commands;

use commands::ProviderArgs;

#[derive(Parser)]
#[command(name = "wordquiz", version, about = "LLM-backed English vocabulary quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take an interactive quiz in the terminal
    Quiz {
        /// Your name (prompted if omitted)
        #[arg(long)]
        name: Option<String>,

        /// English level, e.g. 初級, 中級, 上級 (prompted if omitted)
        #[arg(long)]
        level: Option<String>,

        /// Learning goal, e.g. "TOEIC 800" (prompted if omitted)
        #[arg(long)]
        goal: Option<String>,

        /// Session mode: learning or test
        #[arg(long, default_value = "learning")]
        mode: SessionMode,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Generate one batch of words and print it as a table
    Words {
        #[arg(long, default_value = "guest")]
        name: String,

        #[arg(long, default_value = "中級")]
        level: String,

        #[arg(long, default_value = "日常会話")]
        goal: String,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Check that a file holds a valid word-list payload
    Check {
        /// Path to the payload file
        #[arg(long)]
        file: PathBuf,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Start the HTTP API server
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        bind: Option<String>,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "wordquiz=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            name,
            level,
            goal,
            mode,
            provider,
        } => commands::quiz::execute(name, level, goal, mode, provider).await,
        Commands::Words {
            name,
            level,
            goal,
            provider,
        } => commands::words::execute(name, level, goal, provider).await,
        Commands::Check { file } => commands::check::execute(file),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config).await
        }
        Commands::Serve { bind, provider } => commands::serve::execute(bind, provider).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
