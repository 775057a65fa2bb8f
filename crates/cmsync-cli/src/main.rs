//! Operator CLI for the commerce → content-store sync bridge.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmsync_content::{ContentStoreClient, DocumentKind, SyncService};
use cmsync_engine::{compensate, BatchOutcome, CommerceClient, SyncRunner};

#[derive(Debug, Parser)]
#[command(name = "cmsync")]
#[command(about = "One-way catalog sync: commerce backend → content store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sync the whole catalog, or only the given product ids.
    Sync {
        /// Restrict the run to these product ids (repeatable).
        #[arg(long = "product-id")]
        product_ids: Vec<String>,
    },
    /// Fetch a content-store document by id and print it as JSON.
    Retrieve { id: String },
    /// Print the studio deep link for a product document.
    StudioLink {
        id: String,
        /// Use this type name verbatim instead of the configured mapping.
        #[arg(long)]
        explicit_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so --help/--version work without any configuration.
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = cmsync_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let client = ContentStoreClient::new(&config)?;
    let service = SyncService::new(client, &config);

    match cli.command {
        Commands::Sync { product_ids } => {
            let source = CommerceClient::new(&config)?;
            let runner = SyncRunner::new(&service, &source, config.batch_size);
            let filter = (!product_ids.is_empty()).then_some(product_ids);

            match runner.run(filter.as_deref()).await? {
                BatchOutcome::Completed { total, .. } => {
                    tracing::info!(total, "sync complete");
                    println!("synced {total} products");
                }
                BatchOutcome::PermanentFailure {
                    message,
                    compensation,
                } => {
                    tracing::error!(
                        completed = compensation.len(),
                        "sync failed; compensating created documents"
                    );
                    compensate(&service, &compensation).await;
                    anyhow::bail!(message);
                }
            }
        }
        Commands::Retrieve { id } => match service.retrieve(&id).await? {
            Some(document) => println!("{}", serde_json::to_string_pretty(&document)?),
            None => anyhow::bail!("document {id} not found"),
        },
        Commands::StudioLink { id, explicit_type } => {
            let link =
                service.studio_link(DocumentKind::Product, &id, explicit_type.as_deref())?;
            println!("{link}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_works_without_any_configuration() {
        let err = Cli::try_parse_from(["cmsync", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn sync_accepts_repeated_product_ids() {
        let cli =
            Cli::try_parse_from(["cmsync", "sync", "--product-id", "p1", "--product-id", "p2"])
                .unwrap();
        match cli.command {
            Commands::Sync { product_ids } => assert_eq!(product_ids, ["p1", "p2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
