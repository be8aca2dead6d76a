mod config;
mod export;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use config::ReportConfig;
use export::Exporter;
use gitup_core::{GitCommand, GitQuery};
use graph::GitWalker;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "gitup-report")]
#[command(about = "Changelogs and mermaid diagrams from a Git history", long_about = None)]
struct Cli {
    /// Path to the repository
    #[arg(long, default_value = ".")]
    repo: PathBuf,
    /// Directory receiving the reports (defaults to the config value)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Ignore commits authored before this day (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,
    /// Configuration file (defaults to gitup-report.toml in the repository)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// More logging, repeat for trace output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    if let Err(err) = load_config(&cli).and_then(|config| run(&cli.repo, &config)) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = ReportConfig::load(cli.config.as_deref(), &cli.repo)?;
    if let Some(since) = cli.since {
        config.since = since;
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    Ok(config)
}

fn run(repo: &Path, config: &ReportConfig) -> Result<()> {
    let mut query = GitQuery::new(GitCommand::new(repo));

    info!("Git tree extraction");
    match query.head() {
        Ok(head) => info!(head = %head.short(), since = %config.since, "walking branches and tags"),
        Err(err) => warn!(error = %err, "HEAD does not point to a commit, walking branches and tags anyway"),
    }

    let commits = GitWalker::new(&mut query, config.extract_options()?)
        .extract()
        .context("Could not extract git commits")?;
    let stats = commits.stats();
    info!(
        commits = stats.total_commits,
        merges = stats.merge_commits,
        branches = stats.branch_tips,
        tags = stats.tag_targets,
        "commit graph ready"
    );

    let exporter = Exporter::new(&config.output_dir, config.render_options()?);

    info!("Generate changelogs");
    let changelogs = exporter.write_changelogs(&commits)?;
    info!(count = changelogs.len(), "changelogs written");

    info!("Generate branches and tags diagram");
    exporter.write_branches_diagram(&commits)?;

    info!("Generate all tree diagram");
    exporter.write_graph_diagram(&commits)?;

    Ok(())
}
