//! Command-line interface definition for Flashgate
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to run the gateway, talk to it, and render replies.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flashgate - HTTP gateway to Gemini
///
/// Relays prompts, uploaded files, and chat history to a hosted model and
/// renders its replies as HTML.
#[derive(Parser, Debug, Clone)]
#[command(name = "flashgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Flashgate
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with a running gateway
    Chat {
        /// Gateway base URL (overrides config)
        #[arg(short, long)]
        url: Option<String>,

        /// Print replies as rendered HTML instead of raw text
        #[arg(long)]
        html: bool,
    },

    /// Send a single prompt, optionally with a file, to a running gateway
    Generate {
        /// Prompt text
        #[arg(long)]
        prompt: String,

        /// File to upload alongside the prompt
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// MIME type of the uploaded file
        #[arg(long, default_value = "application/octet-stream")]
        mime: String,

        /// Gateway base URL (overrides config)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Render model text as HTML
    Render {
        /// File to read, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
