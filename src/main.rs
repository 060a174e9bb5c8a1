// pinpage: static profile page generator.
// Loads pinned GitHub repositories through a local cache and renders them to HTML.

mod cache;
mod config;
mod error;
mod github;
mod output;
mod pipeline;
mod record;
mod render;

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, load_env_map};
use crate::error::Result;
use crate::github::{GraphQlClient, PinnedRepositories};
use crate::output::generate;

/// Render pinned GitHub repositories into a static page.
///
/// Without arguments the built-in page is written to the output file
/// (public/index.html by default). With a template path the rendered
/// template is printed to stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Template file to render to stdout
    template: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout is reserved for rendered output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinpage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_fetch_error() {
                error!("No repository data available, nothing was written");
            }
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let vars = env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
    let config = Config::from_map(&load_env_map(vars, Path::new(".env"))?)?;
    info!(
        "Loaded configuration: login={}, cache={}, token={}",
        config.login,
        config.cache_path.display(),
        if config.token.is_some() { "set" } else { "missing" }
    );

    let client = GraphQlClient::new(&config.graphql_url, config.token.as_deref())?;
    let source = PinnedRepositories::new(
        client,
        &config.login,
        config.pinned_limit,
        config.language_limit,
    );

    let mut stdout = io::stdout().lock();
    let generated = generate(&config, args.template.as_deref(), source, &mut stdout).await?;
    report(generated.action(), generated.target());

    Ok(())
}

/// Completion line on stderr, independent of the log filter.
fn report(action: &str, target: &Path) {
    eprintln!(
        "[{}] {} {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        action,
        target.display()
    );
}
