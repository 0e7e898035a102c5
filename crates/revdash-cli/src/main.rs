mod charts;
mod public;
mod reviews;
mod stats;

use anyhow::Context;
use clap::{Parser, Subcommand};
use revdash_client::{Dashboard, ReviewsClient};
use revdash_core::ReviewFlag;
use tracing_subscriber::EnvFilter;

use crate::public::{PublicSortArg, RatingFilterArg};
use crate::reviews::{ReviewsCommands, Source};

#[derive(Debug, Parser)]
#[command(name = "revdash")]
#[command(about = "Property review dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and moderate guest reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommands,
    },
    /// Show dashboard statistics and per-property performance
    Stats,
    /// Print rating and volume charts for the review set
    Charts {
        #[arg(long, value_enum, default_value_t)]
        source: Source,
    },
    /// Pull new reviews from the channel source into the backend
    Sync,
    /// Render the public review page of one property
    Public {
        /// Property identifier (defaults to the first reported property)
        #[arg(long)]
        property: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        filter: RatingFilterArg,
        #[arg(long, value_enum, default_value_t)]
        sort: PublicSortArg,
        /// Extra batches of reviews to reveal
        #[arg(long, default_value_t = 0)]
        load_more: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = revdash_core::load_app_config()
        .context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("revdash: no command given; see `revdash --help`");
        return Ok(());
    };

    let client = ReviewsClient::from_config(&config)
        .context("failed to build reviews client")?;
    tracing::debug!(api_url = %client.base_url(), env = %config.env, "reviews client ready");
    let mut dashboard = Dashboard::new(client);

    match command {
        Commands::Reviews { command } => match command {
            ReviewsCommands::List(args) => {
                reviews::run_reviews_list(&mut dashboard, args, config.page_size)
                    .await?;
            }
            ReviewsCommands::Options { source } => {
                reviews::run_reviews_options(&mut dashboard, source).await?;
            }
            ReviewsCommands::Approve { id } => {
                reviews::run_reviews_flag(&mut dashboard, &id, ReviewFlag::Approved, true)
                    .await?;
            }
            ReviewsCommands::Unapprove { id } => {
                reviews::run_reviews_flag(&mut dashboard, &id, ReviewFlag::Approved, false)
                    .await?;
            }
            ReviewsCommands::Feature { id } => {
                reviews::run_reviews_flag(&mut dashboard, &id, ReviewFlag::Featured, true)
                    .await?;
            }
            ReviewsCommands::Unfeature { id } => {
                reviews::run_reviews_flag(&mut dashboard, &id, ReviewFlag::Featured, false)
                    .await?;
            }
            ReviewsCommands::Save {
                id,
                approved,
                featured,
            } => {
                reviews::run_reviews_save(&mut dashboard, &id, approved, featured)
                    .await?;
            }
        },
        Commands::Stats => stats::run_stats(&mut dashboard).await?,
        Commands::Charts { source } => charts::run_charts(&mut dashboard, source).await?,
        Commands::Sync => {
            let summary = dashboard.sync().await?;
            println!("{}", summary.message);
        }
        Commands::Public {
            property,
            filter,
            sort,
            load_more,
        } => {
            public::run_public(&mut dashboard, property.as_deref(), filter, sort, load_more)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
