use std::io;
use std::process::ExitCode;

use ads_checkout::csv::{load_store, read_purchases, write_quotes};
use ads_checkout::{Checkout, Config};
use clap::Parser;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();

    if config.purchases.extension().is_none_or(|ext| ext != "csv") {
        warn!(path = %config.purchases.display(), "input file seems to not be a csv file");
    }

    let store = match load_store(&config.products, config.rules.as_deref()) {
        Ok(store) => store,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let purchases = match read_purchases(config.purchases.clone()) {
        Ok(purchases) => purchases,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let checkout = Checkout::new(store, config.pricing());
    let (purchase_sender, purchase_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in purchases {
            match result {
                Ok(purchase) => {
                    if purchase_sender.send(purchase).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("purchases: {e}");
                }
            }
        }
    });

    let quotes = checkout.run(ReceiverStream::new(purchase_receiver)).await;

    if let Err(e) = write_quotes(&quotes, io::stdout().lock()) {
        error!("failed to write quotes: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
