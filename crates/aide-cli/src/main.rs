mod browser;
mod config;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use aide_assistant::{run_console, Assistant};
use aide_store::{default_data_path, JsonFileStore};

use crate::browser::SystemBrowser;
use crate::config::{describe_config_path, Config};

#[derive(Parser)]
#[command(
    name = "aide",
    version,
    about = "Personal assistant for tasks, notes and preferences"
)]
struct Cli {
    /// Path to the JSON state file
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Name the assistant introduces itself with
    #[arg(long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Chat,

    /// Process a single input and print the reply
    Run {
        /// Input text, e.g. `add_task buy milk`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show current configuration
    Config,
}

fn data_path(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.store.path.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_data_path)
}

fn build_assistant(name: &str, path: PathBuf, config: &Config) -> Assistant {
    debug!("state file: {}", path.display());
    let mut assistant = Assistant::new(
        name,
        Box::new(JsonFileStore::new(path)),
        Box::new(SystemBrowser),
    )
    .with_search_url(config.search.url.clone());
    config.apply_aliases(&mut assistant);
    assistant
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let path = data_path(cli.data, &config);
    let name = cli.name.unwrap_or_else(|| config.assistant.name.clone());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cmd_chat(&name, path, &config),
        Commands::Run { text } => cmd_run(&name, path, &config, &text.join(" ")),
        Commands::Config => cmd_config(&path, &config),
    }
}

fn cmd_chat(name: &str, path: PathBuf, config: &Config) -> Result<()> {
    let mut assistant = build_assistant(name, path, config);
    let stdin = io::stdin();
    run_console(&mut assistant, stdin.lock(), io::stdout())
}

fn cmd_run(name: &str, path: PathBuf, config: &Config, input: &str) -> Result<()> {
    let mut assistant = build_assistant(name, path, config);
    println!("{}", assistant.process_input(input));
    Ok(())
}

fn cmd_config(path: &std::path::Path, config: &Config) -> Result<()> {
    println!("Config:     {}", describe_config_path());
    println!("State file: {}", path.display());
    println!("Name:       {}", config.assistant.name);
    println!("Search URL: {}", config.search.url);
    if !config.aliases.is_empty() {
        println!("Aliases:");
        for (alias, target) in &config.aliases {
            println!("  {alias} -> {target}");
        }
    }
    Ok(())
}
