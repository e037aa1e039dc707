//! Code Mentor CLI
//!
//! Drives an editing session from the command line: request a hint for a
//! source file, run it in the remote sandbox, or check service status.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mentor_gateway::{ApiClient, Language};
use mentor_session::{Config, Session};
use tracing_subscriber::EnvFilter;

/// Code Mentor - AI-assisted code learning
///
/// Sends your source file to the mentor service for a short AI hint, or
/// runs it in the remote sandbox and prints the outcome.
#[derive(Parser, Debug)]
#[command(name = "mentor")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (default: mentor.json in current directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Base address of the mentor service (overrides the config file)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request an AI hint for a source file
    Hint {
        /// Path to the source file (.py or .js)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Cursor line to report to the hint service
        #[arg(long, value_name = "N", default_value_t = 0)]
        line: u32,
    },
    /// Run a source file in the remote sandbox
    Run {
        /// Path to the source file (.py or .js)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Show sandbox status and supported languages
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing subscriber with appropriate filter
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Dispatches the selected subcommand.
async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    // Apply CLI argument overrides
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    // Re-validate after overrides
    config.validate()?;

    tracing::debug!(api_url = %config.api_url, timeout = config.request_timeout, "Configuration loaded");

    let client = ApiClient::with_timeout(
        &config.api_url,
        Duration::from_secs(config.request_timeout),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    match args.command {
        Command::Hint { file, line } => cmd_hint(client, &config, &file, line).await,
        Command::Run { file } => cmd_run(client, &config, &file).await,
        Command::Status => cmd_status(&client).await,
    }
}

/// Requests a hint for the given file and prints it.
async fn cmd_hint(client: ApiClient, config: &Config, file: &Path, line: u32) -> anyhow::Result<()> {
    let (content, language) = load_source(file)?;

    let session = Session::with_hint_limit(client, config.hint_max_length);
    session.set_language(language).await;
    session.update_code(content).await;
    session.set_cursor_position(line).await;

    println!("Requesting hint for {} ({language})...", file.display());
    session.request_hint().await;

    let state = session.state().await;
    for hint in &state.hints {
        println!();
        println!("Hint ({}):", hint.level);
        println!("  {}", hint.content);
    }

    Ok(())
}

/// Runs the given file remotely and prints the outcome.
async fn cmd_run(client: ApiClient, config: &Config, file: &Path) -> anyhow::Result<()> {
    let (content, language) = load_source(file)?;

    let session = Session::with_hint_limit(client, config.hint_max_length);
    session.set_language(language).await;
    session.update_code(content).await;

    println!("Running {} ({language})...", file.display());
    if !session.request_execution().await {
        anyhow::bail!(
            "Nothing to run: '{}' is empty\n\nSuggestion: Add some code to the file first",
            file.display()
        );
    }

    let Some(result) = session.execution_result().await else {
        anyhow::bail!("Execution finished without a result");
    };

    println!();
    if !result.output.is_empty() {
        println!("Output:");
        for line in result.output.lines() {
            println!("  {line}");
        }
    }
    for warning in &result.warnings {
        println!("Warning: {warning}");
    }
    for error in &result.errors {
        println!("Error: {error}");
    }

    println!();
    println!("Status: {}", result.status);
    println!("Time: {:.1}ms", result.execution_time_ms);
    if let Some(memory) = result.memory_used_mb {
        println!("Memory: {memory:.1}MB");
    }
    if let Some(code) = result.exit_code {
        println!("Exit code: {code}");
    }

    Ok(())
}

/// Prints sandbox status and the supported languages.
async fn cmd_status(client: &ApiClient) -> anyhow::Result<()> {
    let status = client
        .sandbox_status()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("Sandbox: {}", status.status);
    println!("  Timeout: {}s", status.limits.timeout);
    println!("  Memory limit: {}MB", status.limits.memory_mb);
    println!("  Max processes: {}", status.limits.max_processes);
    println!("  Isolated: {}", status.security.isolated);
    println!("  Network disabled: {}", status.security.network_disabled);
    println!(
        "  Read-only filesystem: {}",
        status.security.filesystem_readonly
    );

    let languages = client.languages().await.map_err(|e| anyhow::anyhow!("{e}"))?;
    println!();
    println!("Languages:");
    for lang in &languages {
        let marker = if lang.supported { "" } else { " (unsupported)" };
        println!("  {} {} {}{marker}", lang.id, lang.name, lang.version);
    }

    Ok(())
}

/// Loads configuration from the specified path or default location.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

/// Reads a source file and infers its language from the extension.
fn load_source(file: &Path) -> anyhow::Result<(String, Language)> {
    let language = language_for(file)?;
    let content = std::fs::read_to_string(file).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read '{}': {e}\n\nSuggestion: Check the path and file permissions",
            file.display()
        )
    })?;
    Ok((content, language))
}

/// Maps a file extension to a language.
fn language_for(file: &Path) -> anyhow::Result<Language> {
    match file.extension().and_then(|e| e.to_str()) {
        Some("py") => Ok(Language::Python),
        Some("js") => Ok(Language::Javascript),
        _ => anyhow::bail!(
            "Cannot determine language for '{}'\n\nSuggestion: Use a .py or .js file",
            file.display()
        ),
    }
}
