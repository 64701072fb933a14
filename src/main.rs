mod cli;
mod collect;
mod error;
mod format;
mod github;
mod readme;
mod stats;
mod svg;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::Args;
use github::GithubClient;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let client = GithubClient::new(args.token.as_str(), &args.api_url)?;
    let now = Utc::now();

    let stats = collect::collect(&client, &args.username, &args.profile_defaults(), now)
        .await
        .with_context(|| format!("Failed to collect GitHub stats for {}", args.username))?;

    let svg = svg::generate_svg(&stats, args.theme);
    write_output(&args.svg_out, &svg)?;
    info!(path = %args.svg_out.display(), "profile card written");

    let image_path = args
        .svg_out
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile.svg".to_string());
    let readme = readme::generate_readme(&stats, &image_path, now.date_naive());
    write_output(&args.readme_out, &readme)?;
    info!(path = %args.readme_out.display(), "README written");

    println!("Stats summary:");
    println!("   Repositories: {}", stats.repository_count);
    println!("   Followers: {}", stats.followers);
    println!("   Stars: {}", stats.star_total);
    println!("   Commits (est.): {}", stats.commit_estimate);

    Ok(())
}

/// Logs go to stderr so the summary on stdout stays clean. `RUST_LOG` wins
/// over `-v`/`-q` when set.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(args.log_level()).into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
