//! Flashgate - HTTP gateway to Gemini
//!
#![doc = "Main entry point for the Flashgate gateway and client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flashgate::cli::{Cli, Commands};
use flashgate::commands;
use flashgate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting gateway");
            commands::serve::run_serve(config).await?;
            Ok(())
        }
        Commands::Chat { html, .. } => {
            tracing::info!("Starting chat with {}", config.client.base_url);
            commands::chat::run_chat(config, html).await?;
            Ok(())
        }
        Commands::Generate {
            prompt, file, mime, ..
        } => {
            if let Some(path) = &file {
                tracing::debug!("Attaching file: {}", path.display());
            }
            commands::generate::run_generate(config, prompt, file, mime).await?;
            Ok(())
        }
        Commands::Render { input } => {
            commands::render::run_render(input)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so `render` and `generate` output stays pipeable.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "flashgate=debug,tower_http=debug"
    } else {
        "flashgate=info,tower_http=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
