//! Demo binary: bootstrap the state core against the live API and log a
//! summary of what it loaded.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use stellar_client::feed::FeedAction;
use stellar_client::session::FileCredentials;
use stellar_client::{ApiConfig, AppAction, AppEnvironment, HttpApi, app_store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env();
    let credentials = Arc::new(FileCredentials::new("stellar-session.json"));
    let api = Arc::new(
        HttpApi::new(&config, credentials.clone()).context("building HTTP client")?,
    );
    let store = app_store(AppEnvironment::new(api, credentials));

    store.send(AppAction::Bootstrap).await?;
    store.wait_until_idle(Duration::from_secs(10)).await?;
    store
        .state(|state| {
            tracing::info!(
                catalog = state.ingredients.catalog.data().map_or(0, Vec::len),
                signed_in = state.user.user().is_some(),
                "bootstrap complete"
            );
        })
        .await;

    store.send(AppAction::Feed(FeedAction::Fetch)).await?;
    store.wait_until_idle(Duration::from_secs(10)).await?;
    store
        .state(|state| {
            tracing::info!(
                total = state.feed.total(),
                today = state.feed.total_today(),
                "public feed loaded"
            );
        })
        .await;

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
