//! Background refresh example
//!
//! Keeps a cached mod list and server info fresh from a background worker
//! while the foreground stays free, the way an interactive front end would.
//!
//! Run with: cargo run --example background_refresh -- http://localhost:25566/

use mcmanager::{BackgroundClient, ClientBuilder, ObservabilityConfig, RefreshCache, TaskRunner};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:25566/".to_string());

    let runtime = tokio::runtime::Runtime::new()?;

    // The blocking HTTP client is created outside the runtime
    let client = ClientBuilder::new(url)
        .timeout(Duration::from_secs(5))
        .with_observability(
            ObservabilityConfig::new("mcmanager-background")
                .with_traces(false)
                .with_metrics(false)
                .with_json_logs(false),
        )
        .build()?;
    let background = BackgroundClient::new(client, TaskRunner::new(runtime.handle().clone()));

    let mods = RefreshCache::new(Vec::new());
    let info = RefreshCache::default();

    runtime.block_on(async {
        for round in 1..=3 {
            let (mods_outcome, info_outcome) = tokio::join!(
                mods.refresh(background.list_mods()),
                info.refresh(background.server_info()),
            );
            if let Err(e) = mods_outcome.and(info_outcome) {
                tracing::warn!(round, error = %e, "Refresh failed, showing previous data");
            }

            let mod_list = mods.snapshot().await;
            let server = info.snapshot().await;
            println!(
                "[{}] {} mods, uptime {}",
                round,
                mod_list.len(),
                server.get_i64("uptime").map(|s| s.to_string()).unwrap_or_else(|_| "?".into())
            );

            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    });

    drop(background);
    mcmanager::core::shutdown_observability();
    Ok(())
}
