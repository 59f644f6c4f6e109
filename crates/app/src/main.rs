//! Entry point running a scripted order session.

use app::config::Config;
use app::telemetry;
use domain::{Aggregate, OrderLine};

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = Config::from_env().expect("invalid configuration");

    // 2. Initialize tracing and metrics
    telemetry::init_tracing(&config);
    let metrics_handle = telemetry::init_metrics().expect("failed to install Prometheus recorder");

    // 3. Wire the handler and run the session
    let handler = app::build_handler();
    let lines = vec![OrderLine::new("SKU-001", 1)];

    match app::run_session(&handler, &config.order_id, lines).await {
        Ok(Some(order)) => tracing::info!(
            order_id = %order.id(),
            status = %order.status(),
            version = %order.version(),
            "order reloaded from history"
        ),
        Ok(None) => tracing::warn!(order_id = %config.order_id, "no history recorded"),
        Err(e) => tracing::error!(error = %e, "session failed"),
    }

    // 4. Dump collected metrics
    println!("{}", metrics_handle.render());
}
