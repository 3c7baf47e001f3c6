//! ghmirror CLI - mirror repositories into GitHub Enterprise
//!
//! Clones from GitHub, Bitbucket or GitLab and mirror-pushes into a GitHub
//! Enterprise organization, creating the target repository when needed.

mod commands;

use clap::{Parser, Subcommand};
use ghmirror_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::MirrorArgs;

/// ghmirror: mirror git repositories into GitHub Enterprise
#[derive(Parser, Debug)]
#[command(name = "ghmirror")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    mirror: MirrorArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Some(Commands::Version) => {
            println!("ghmirror {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Config) => {
            let config = Config::load_with_overrides(cli.mirror.overrides())?;
            println!("ghmirror Configuration");
            println!("======================");
            println!();
            println!("Mirror Settings:");
            println!("  git_path: {}", config.mirror.git_path);
            println!(
                "  workspace_dir: {}",
                config
                    .mirror
                    .workspace_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(system temp dir)".to_string())
            );
            println!("  strict_existence: {}", config.mirror.strict_existence);
            println!("  strict_create: {}", config.mirror.strict_create);
            println!("  keep_going: {}", config.mirror.keep_going);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            cli.mirror.execute(cli.verbose).await?;
        }
    }

    Ok(())
}
