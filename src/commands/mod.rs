/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `serve`: run the HTTP gateway
- `chat`: interactive chat against a running gateway
- `generate`: one-shot prompt (optionally with a file)
- `render`: render model text as HTML

Each handler delegates to the library's server, client or formatter.
*/

use crate::client::{ChatSession, GatewayClient};
use crate::config::Config;
use crate::error::{FlashgateError, Result};
use crate::formatter::format_reply;
use crate::request::Attachment;
use std::path::PathBuf;

// Special commands parser for the chat loop
pub mod special_commands;

// Gateway command handler
pub mod serve {
    //! Runs the HTTP gateway with the configured provider.

    use super::*;

    /// Validate configuration and run the gateway until Ctrl-C
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured or the server fails
    pub async fn run_serve(config: Config) -> Result<()> {
        config.validate_for_serving()?;
        crate::server::serve(config).await
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop. Every line is appended to the session history
    //! and the whole history is sent to the gateway's chat route. The next
    //! line is read only after the reply arrives.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::client::ConversationStore;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `html` - Start with rendered HTML output
    pub async fn run_chat(config: Config, html: bool) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let client = GatewayClient::new(config.client.base_url.clone())?;
        let mut session = ChatSession::new(client);
        let mut render_html = html;

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&config.client.base_url);

        loop {
            match rl.readline(&format!("{} ", "you>".cyan())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        SpecialCommand::History => {
                            print_history(session.history());
                            continue;
                        }
                        SpecialCommand::ToggleHtml => {
                            render_html = !render_html;
                            println!(
                                "HTML rendering {}\n",
                                if render_html { "on" } else { "off" }
                            );
                            continue;
                        }
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::Unknown(command) => {
                            eprintln!(
                                "{}",
                                format!("Unknown command: {} (type /help)", command).yellow()
                            );
                            continue;
                        }
                        SpecialCommand::None => {}
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "Thinking...".dimmed());
                    match session.send(trimmed).await {
                        Ok(reply) => print_reply(&reply, render_html),
                        Err(e) => {
                            tracing::error!("Chat request failed: {:#}", e);
                            let message = match e.downcast_ref::<FlashgateError>() {
                                Some(FlashgateError::EmptyReply) => "Sorry, no response received.",
                                _ => "Failed to get response from server.",
                            };
                            eprintln!("{}\n", message.red());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome_banner(base_url: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              Flashgate Chat - Welcome!                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Gateway: {}", base_url.green());
        println!("Type '/help' for available commands, '/exit' to quit\n");
    }

    fn print_reply(reply: &str, render_html: bool) {
        let body = if render_html {
            format_reply(reply)
        } else {
            reply.to_string()
        };
        println!("{}\n{}\n", "model>".magenta(), body);
    }

    fn print_history(history: &ConversationStore) {
        if history.is_empty() {
            println!("No messages yet\n");
            return;
        }
        for (index, turn) in history.turns().iter().enumerate() {
            println!("{:>3}. [{}] {}", index + 1, turn.role, turn.text);
        }
        println!();
    }
}

// One-shot generate handler
pub mod generate {
    //! Sends a single prompt, with an optional file, to a running gateway.

    use super::*;

    /// Send one prompt and print the reply
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `prompt` - Prompt text
    /// * `file` - Optional file to upload with the prompt
    /// * `mime` - MIME type declared for the file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the request fails
    pub async fn run_generate(
        config: Config,
        prompt: String,
        file: Option<PathBuf>,
        mime: String,
    ) -> Result<()> {
        let client = GatewayClient::new(config.client.base_url.clone())?;

        let reply = match file {
            Some(path) => {
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    FlashgateError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| "upload".to_string());
                tracing::debug!("Uploading {} ({} bytes, {})", file_name, bytes.len(), mime);
                client
                    .process_file(&prompt, Attachment::new(mime, bytes), &file_name)
                    .await?
            }
            None => client.generate_text(&prompt).await?,
        };

        println!("{}", reply);
        Ok(())
    }
}

// Render handler
pub mod render {
    //! Renders model text as HTML.

    use super::*;
    use std::io::Read;

    /// Read text from a file or stdin and print the rendered HTML
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be read
    pub fn run_render(input: Option<PathBuf>) -> Result<()> {
        let text = match input {
            Some(path) => std::fs::read_to_string(&path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        println!("{}", format_reply(&text));
        Ok(())
    }
}
