mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, check, init, new, publish, revert, save_version, versions, ApplyArgs, CheckArgs, InitArgs, NewArgs,
    RemoteArgs, RevertArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - page documents and site drafts from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a pagecraft.config.json
    Init(InitArgs),

    /// Print the default node(s) for an element kind
    New(NewArgs),

    /// Validate a page document
    Check(CheckArgs),

    /// Apply a JSON list of editor actions to a document
    Apply(ApplyArgs),

    /// List a site's saved versions
    Versions(RemoteArgs),

    /// Save the site's current draft as a version
    SaveVersion(RemoteArgs),

    /// Restore a saved version into the site's draft
    Revert(RevertArgs),

    /// Publish the site's current draft
    Publish(RemoteArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args),
        Command::Check(args) => check(args),
        Command::Apply(args) => apply(args, &cwd),
        Command::Versions(args) => versions(args, &cwd).await,
        Command::SaveVersion(args) => save_version(args, &cwd).await,
        Command::Revert(args) => revert(args, &cwd).await,
        Command::Publish(args) => publish(args, &cwd).await,
    }
}
