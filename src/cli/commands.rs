//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "faqrag")]
#[command(about = "FAQ answering service with hybrid retrieval and grounded generation")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS
        #[arg(long)]
        cors: bool,
    },
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: String,
        /// Retrieval strategy (fusion, semantic, lexical, inject)
        #[arg(short, long, default_value = "fusion")]
        strategy: String,
        /// Show the retrieved records alongside the answer
        #[arg(long)]
        verbose: bool,
    },
    /// Retrieve records without generation
    Search {
        /// Search query
        query: String,
        /// Retrieval strategy (fusion, semantic, lexical)
        #[arg(short, long, default_value = "fusion")]
        strategy: String,
    },
    /// Run one question through every strategy and compare answers/latency
    Compare {
        /// The question to compare strategies on
        question: String,
    },
    /// Show recent logged interactions
    History {
        /// Maximum number of interactions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show current configuration
    Config,
}
