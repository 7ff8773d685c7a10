// dinebox-client/examples/order_board.rs
// Order board against a live backend
//
// DINEBOX_API_URL=http://localhost:5000 DINEBOX_TOKEN=... cargo run --example order_board

use dinebox_client::{ClientConfig, OrderFilters, OrderStatus, SessionStore, StoredSession};
use shared::money::format_money;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dinebox_client=info".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "starting order board");

    // Remember an explicitly supplied token for the next run
    if let Some(token) = &config.token {
        SessionStore::new(&config.session_path).save(&StoredSession::new(token.clone()))?;
    }

    let board = Arc::new(dinebox_client::connect(&config)?);
    let caps = board.load_capabilities().await;
    tracing::info!(?caps, "capabilities loaded");

    let filters = match std::env::args().nth(1).and_then(|s| OrderStatus::parse(&s)) {
        Some(status) => OrderFilters::new().with_status(status),
        None => OrderFilters::new(),
    };
    board.set_filters(filters).await?;

    let page = board.page_info().await;
    println!(
        "page {}/{} ({} orders)",
        page.page_number, page.total_pages, page.total_count
    );
    for row in board.rows().await {
        println!(
            "{:>10}  {:<16}  {:>10}  {}",
            row.number,
            row.badge.label,
            format_money(row.total_with_fee),
            row.customer.as_deref().unwrap_or("-"),
        );
    }

    let cancel = CancellationToken::new();
    let poller = board.spawn_poller(config.poll_duration(), cancel.clone());

    tokio::signal::ctrl_c().await?;
    cancel.cancel();
    poller.await?;
    Ok(())
}
