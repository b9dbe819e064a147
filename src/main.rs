mod cli;

use bookscout::{config, render, SearchPipeline};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn search(
    query: String,
    max_results: Option<u32>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let max_results = cli::resolve_max_results(max_results, config.search.default_max_results);

    let (pipeline, mut deliveries) = SearchPipeline::from_config(&config)?;
    let handle = pipeline.run(&query, max_results)?;
    tracing::debug!("Search started as generation {}", handle.generation());

    let delivery = deliveries
        .recv()
        .await
        .context("Search pipeline stopped without delivering a result")?;

    if json {
        let summary = render::SearchSummary::new(delivery.generation, &delivery.outcome);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::render_text(&delivery.outcome));
    }

    if let Err(e) = delivery.outcome {
        anyhow::bail!("Search failed: {}", e);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "bookscout=debug,bookscout_common=debug".to_string()
        } else {
            "bookscout=info,bookscout_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            query,
            max_results,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search(
                query.join(" "),
                max_results,
                json,
                cli.config.as_deref(),
            ))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("bookscout {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Catalog endpoint: {}", config.catalog.endpoint);
    println!(
        "  Timeouts: connect {}s, read {}s, image {}s",
        config.catalog.connect_timeout_secs,
        config.catalog.read_timeout_secs,
        config.images.timeout_secs
    );
    match config.images.max_concurrent {
        Some(n) => println!("  Concurrent thumbnails: {}", n),
        None => println!("  Concurrent thumbnails: unbounded"),
    }
    println!("  Default max results: {}", config.search.default_max_results);

    Ok(())
}
