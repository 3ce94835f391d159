//! Command-line interface and interactive prompts.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;

use crate::config::{Config, RedditConfig};
use crate::pipeline::{PipelineContext, report_html_files};
use crate::reddit::normalize_handles;

/// Generate user personas from public Reddit activity.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "redpersona", version, about)]
pub struct Cli {
    /// Comma-separated Reddit handles (e.g. "kojied,spez"); prompted for when absent
    #[arg(long)]
    pub handles: Option<String>,

    /// Directory for the generated .txt and .html files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Let command-line flags override values from the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(handles) = &self.handles {
            config.output.handles = Some(handles.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.json_log {
            config.output.json_log = true;
        }
    }
}

/// Print `prompt` and read one line from stdin, trimmed.
pub fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read a line of input with hidden characters.
pub fn read_hidden_line(prompt: &str) -> anyhow::Result<String> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    let _raw = RawModeGuard::enable()?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Release {
                continue;
            }
            match key_event.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    if !input.is_empty() {
                        input.pop();
                        print!("\x08 \x08");
                        std::io::stdout().flush()?;
                    }
                }
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(anyhow::anyhow!("Interrupted"));
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    print!("*");
                    std::io::stdout().flush()?;
                }
                _ => {}
            }
        }
    }

    Ok(input.trim().to_string())
}

/// Raw terminal mode for the lifetime of the guard, restored on every exit path.
struct RawModeGuard {
    restore: fn(),
}

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self {
            restore: restore_terminal,
        })
    }
}

fn restore_terminal() {
    let _ = crossterm::terminal::disable_raw_mode();
    println!();
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Prompt for any Reddit credential missing from the environment.
///
/// Does nothing when stdin is not a terminal; the missing values then
/// surface as a configuration error.
pub fn prompt_missing_credentials(reddit: &mut RedditConfig) -> anyhow::Result<()> {
    if reddit.has_credentials() || !std::io::stdin().is_terminal() {
        return Ok(());
    }

    if reddit.client_id.is_none() {
        let id = read_hidden_line("Enter your Reddit client ID: ")?;
        reddit.client_id = (!id.is_empty()).then(|| SecretString::from(id));
    }
    if reddit.client_secret.is_none() {
        let secret = read_hidden_line("Enter your Reddit client secret: ")?;
        reddit.client_secret = (!secret.is_empty()).then(|| SecretString::from(secret));
    }
    if reddit.user_agent.is_none() {
        let agent = prompt_line("Enter your Reddit user agent (e.g. 'script:persona:v1.0 (by /u/you)'): ")?;
        reddit.user_agent = (!agent.is_empty()).then_some(agent);
    }
    Ok(())
}

/// Handles from flags or env, or prompted for.
pub fn resolve_handles(configured: Option<&str>) -> anyhow::Result<Vec<String>> {
    let raw = match configured {
        Some(list) => list.to_string(),
        None if std::io::stdin().is_terminal() => {
            prompt_line("Enter Reddit usernames (comma-separated, e.g. kojied,Hungry-Move-6603): ")?
        }
        None => String::new(),
    };
    let handles = normalize_handles(&raw);
    if handles.is_empty() {
        anyhow::bail!("No valid Reddit usernames provided");
    }
    Ok(handles)
}

/// Build every collaborator from `config` and run the pipeline over all handles.
pub async fn run(mut config: Config) -> anyhow::Result<()> {
    prompt_missing_credentials(&mut config.reddit)?;
    let context =
        PipelineContext::from_config(&config).context("Could not set up the persona pipeline")?;
    let handles = resolve_handles(config.output.handles.as_deref())?;

    let summary = context.run(&handles).await;
    tracing::info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        "Run complete"
    );
    report_html_files(&context.output_dir, &handles);
    Ok(())
}
