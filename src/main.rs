//! FAQ-RAG service binary

use clap::Parser;
use faqrag::cli::handlers;
use faqrag::cli::Cli;
use faqrag::cli::Commands;
use faqrag::config::AppConfig;
use faqrag::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let log_result = if cli.verbose {
        logging::init_logging_with_level("debug")
    } else {
        logging::init_logging(Some(&config))
    };
    if let Err(e) = log_result {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Serve { host, port, cors } => {
            handlers::handle_serve(&config, host, port, cors).await
        }
        Commands::Ask {
            question,
            strategy,
            verbose,
        } => handlers::handle_ask(&config, &question, &strategy, verbose).await,
        Commands::Search { query, strategy } => {
            handlers::handle_search(&config, &query, &strategy).await
        }
        Commands::Compare { question } => handlers::handle_compare(&config, &question).await,
        Commands::History { limit } => handlers::handle_history(&config, limit),
        Commands::Config => handlers::handle_config(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
