use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pushshift_client::{After, PushshiftClient, SearchKind};
use reddit_client::{RedditClient, TimeWindow};
use redditalyzer_collector::{attribute, correct_users, harvest, store, RedditSource, RunOptions};
use redditalyzer_common::{CommunityAggregate, Config};

#[derive(Parser)]
#[command(name = "redditalyzer")]
#[command(about = "Per-community activity and spillover from a reference community")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect the authors active in a community into an identity file
    Harvest {
        #[arg(long)]
        community: String,

        /// Relative window ("30d") or epoch-seconds cursor
        #[arg(long, default_value = "30d")]
        after: String,

        #[arg(long, default_value = "comment")]
        kind: SearchKind,

        /// Overrides MAX_PAGES
        #[arg(long)]
        max_pages: Option<u32>,

        /// Merged with existing contents if present
        #[arg(long)]
        out: PathBuf,
    },

    /// Attribute each identity's activity to communities
    Attribute {
        #[arg(long)]
        identities: PathBuf,

        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value = "month")]
        window: TimeWindow,

        /// Overrides REFERENCE_COMMUNITY
        #[arg(long)]
        reference: Option<String>,

        /// Continue from the aggregate already in --out
        #[arg(long)]
        resume: bool,
    },

    /// Recount users on an existing aggregate (not idempotent)
    PatchUsers {
        #[arg(long)]
        identities: PathBuf,

        #[arg(long)]
        aggregate: PathBuf,

        #[arg(long, default_value = "month")]
        window: TimeWindow,

        /// Overrides REFERENCE_COMMUNITY
        #[arg(long)]
        reference: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("redditalyzer=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.log_redacted();

    match cli.command {
        Commands::Harvest {
            community,
            after,
            kind,
            max_pages,
            out,
        } => {
            let client =
                PushshiftClient::new(&config.pushshift_base_url, config.pushshift_token.as_deref())?;
            let existing = store::load_identity_set(&out)?;
            let (identities, stats) = harvest(
                &client,
                &community,
                After::from(after.as_str()),
                kind,
                max_pages.unwrap_or(config.max_pages),
                Some(&existing),
            )
            .await?;
            store::save_identities(&out, &identities)?;
            info!(
                pages = stats.pages,
                records = stats.records,
                identities = stats.identities,
                stop = ?stats.stop,
                resume_after = ?stats.resume_after,
                path = %out.display(),
                "Harvest complete"
            );
        }
        Commands::Attribute {
            identities,
            out,
            window,
            reference,
            resume,
        } => {
            let source = reddit_source(&config)?;
            let names = store::load_identities(&identities)?;
            let mut aggregate = if resume && out.exists() {
                store::load_aggregate(&out)?
            } else {
                CommunityAggregate::new()
            };
            let options = run_options(&config, window, reference);

            let outcome = attribute(&source, &names, &mut aggregate, &options).await;
            let stats = store::save_after_run(&out, &aggregate, outcome)?;
            println!("{stats}");
        }
        Commands::PatchUsers {
            identities,
            aggregate: path,
            window,
            reference,
        } => {
            let source = reddit_source(&config)?;
            let names = store::load_identities(&identities)?;
            let mut aggregate = store::load_aggregate(&path)?;
            let options = run_options(&config, window, reference);

            let outcome = correct_users(&source, &names, &mut aggregate, &options).await;
            let stats = store::save_after_run(&path, &aggregate, outcome)?;
            println!("{stats}");
        }
    }

    Ok(())
}

fn reddit_source(config: &Config) -> Result<RedditSource> {
    let client = RedditClient::new(&config.reddit_base_url, &config.reddit_user_agent)?;
    Ok(RedditSource::new(client, config.contribution_limit))
}

fn run_options(config: &Config, window: TimeWindow, reference: Option<String>) -> RunOptions {
    RunOptions::new(reference.unwrap_or_else(|| config.reference_community.clone()))
        .window(window)
        .concurrency(config.fetch_concurrency)
}
