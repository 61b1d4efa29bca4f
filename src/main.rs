use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod catalog;
mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod templates;
mod view;


fn main() -> anyhow::Result<()> {
    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_browser=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2️⃣ Configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.bind_addr;
    let workers = config.max_workers;

    // 3️⃣ Load the catalog once; a failed load leaves the browser empty
    let app = App::bootstrap(config).context("Failed to build catalog loader")?;

    // 4️⃣ Start the server
    tracing::info!("Starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(workers);

    server
        .serve(move |req, _info| router::serve(req, &app))
        .context("Server ended with error")?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}
