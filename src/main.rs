use std::sync::Arc;

use mimalloc::MiMalloc;
use rootcraft_admin::backend::HttpBackend;
use rootcraft_admin::config::AppConfig;
use rootcraft_admin::services::list_view::ViewStatus;
use rootcraft_admin::services::notifier::TracingNotifier;
use rootcraft_admin::Dashboard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rootcraft_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Starting Rootcraft admin views");

    let backend = HttpBackend::from_config(&config)?;
    let mut dashboard = Dashboard::new(backend, Arc::new(TracingNotifier), &config);
    dashboard.mount_all().await;

    let products = dashboard.products.page();
    log_page(
        "products",
        dashboard.products.status(),
        products.items.iter().map(|p| p.name.as_str()),
    );

    let blogs = dashboard.blogs.page();
    log_page(
        "blogs",
        dashboard.blogs.status(),
        blogs.items.iter().map(|b| b.title.as_str()),
    );

    let orders = dashboard.orders.page();
    log_page(
        "orders",
        dashboard.orders.status(),
        orders.items.iter().map(|o| o.id.as_str()),
    );

    Ok(())
}

fn log_page<'a>(collection: &str, status: ViewStatus, labels: impl Iterator<Item = &'a str>) {
    match status {
        ViewStatus::Ready => {
            let labels: Vec<&str> = labels.collect();
            tracing::info!(collection, count = labels.len(), items = ?labels, "First page");
        }
        ViewStatus::Empty => tracing::info!(collection, "No items found"),
        ViewStatus::Loading => tracing::warn!(collection, "Collection still loading"),
    }
}
