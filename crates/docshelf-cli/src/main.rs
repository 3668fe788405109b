//! Command line front end for the docshelf content registry.
//!
//! # Usage
//!
//! ```bash
//! docshelf --root ./docs sidebar --json
//! docshelf --root ./docs nav architecture
//! docshelf --root ./docs open /docs/getting-started
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use docshelf::{LoadOutcome, Pagination, Registry, RegistryConfig, Resolver, Route};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "docshelf")]
#[command(about = "Browse a directory of documentation content", long_about = None)]
#[command(version)]
struct Args {
    /// Directory holding the content files
    #[arg(long, default_value = "docs")]
    root: PathBuf,

    /// JSON registry config; built-in defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category mapping
    Sidebar {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the pagination order, one id per line
    Sequence,

    /// Print previous/next for a document id
    Nav {
        /// Document id
        id: String,
    },

    /// Resolve a route address and print the document body
    Open {
        /// Route address, e.g. /docs/getting-started
        #[arg(default_value = "/")]
        address: String,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<RegistryConfig> {
    match path {
        Some(path) => RegistryConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(RegistryConfig::default()),
    }
}

fn format_pagination(nav: &Pagination<'_>) -> String {
    let previous = nav.previous.map_or("-".to_string(), |e| format!("← {}", e.title));
    let next = nav.next.map_or("-".to_string(), |e| format!("{} →", e.title));
    format!("{}    {}", previous, next)
}

fn print_sidebar(registry: &Registry, json: bool) -> anyhow::Result<()> {
    let sidebar = registry.sidebar();
    if json {
        println!("{}", sidebar.to_json().context("serializing sidebar")?);
        return Ok(());
    }
    for section in &sidebar.sections {
        println!("{}", section.name);
        for link in &section.links {
            println!("  {:<28} {}", link.label, link.path);
        }
    }
    Ok(())
}

async fn open(registry: Arc<Registry>, address: &str) -> anyhow::Result<()> {
    let route = match registry.route(address) {
        Route::Redirect(target) => {
            debug!(from = address, to = %target, "following redirect");
            registry.route(&target)
        }
        other => other,
    };

    let entry = match route {
        Route::Document(entry) => entry.clone(),
        Route::DocumentNotFound(slug) => bail!("404 – Document not found: {}", slug),
        Route::PageNotFound | Route::Redirect(_) => bail!("Page Not Found: {}", address),
    };

    let resolver = Resolver::new(Arc::clone(&registry));
    match resolver.load(&entry.id).await {
        LoadOutcome::Ready(content) => {
            println!("{}", content);
            println!();
            println!("{}", format_pagination(&registry.navigate(&entry.id)));
            Ok(())
        }
        LoadOutcome::Failed(err) => Err(err).context("document failed to load"),
        LoadOutcome::NotFound | LoadOutcome::Pending => {
            bail!("404 – Document not found: {}", entry.id)
        }
    }
}

fn build_registry(config: RegistryConfig, root: &Path) -> anyhow::Result<Registry> {
    let registry = Registry::from_dir(config, root)
        .with_context(|| format!("building registry from {}", root.display()))?;
    for duplicate in registry.duplicates() {
        eprintln!(
            "warning: '{}' shadowed by earlier {}",
            duplicate.shadowed, duplicate.kept
        );
    }
    Ok(registry)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Config => {
            println!(
                "{}",
                serde_json::to_string_pretty(&config).context("serializing config")?
            );
        }
        Command::Sidebar { json } => print_sidebar(&build_registry(config, &args.root)?, json)?,
        Command::Sequence => {
            let registry = build_registry(config, &args.root)?;
            for entry in registry.linear() {
                println!("{}", entry.id);
            }
        }
        Command::Nav { id } => {
            let registry = build_registry(config, &args.root)?;
            if registry.resolve(&id).is_none() {
                bail!("unknown document id: {}", id);
            }
            println!("{}", format_pagination(&registry.navigate(&id)));
        }
        Command::Open { address } => {
            let registry = build_registry(config, &args.root)?;
            open(Arc::new(registry), &address).await?
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_open_defaults_to_root() {
        let args = Args::try_parse_from(["docshelf", "open"]).unwrap();
        assert!(matches!(args.command, Command::Open { ref address } if address == "/"));
    }

    #[test]
    fn test_verbose_counts() {
        let args = Args::try_parse_from(["docshelf", "-vv", "sequence"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
