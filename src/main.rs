// Main entry point - builds the chart table and dumps it as JSON
mod application;
mod domain;
mod infrastructure;

use crate::application::database_charts::ChartManager;
use crate::infrastructure::chart_mapper::map_charts;
use crate::infrastructure::config::load_charts_config;

/// Positional arguments are treated as the currently visible databases, so
/// the resulting table shows exactly what the plugin would expose to the
/// host agent, e.g. `postgres-charts production sales`.
fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Built-in catalog plus any operator-supplied charts
    let charts_config = load_charts_config("config/charts")?;
    let custom_charts = map_charts(&charts_config)?;

    let mut manager = ChartManager::new();
    for chart in custom_charts {
        if let Err(e) = manager.register(chart) {
            tracing::warn!("skipping config chart: {}", e);
        }
    }

    let databases: Vec<String> = std::env::args().skip(1).collect();
    manager.update_databases(&databases);

    println!("{}", serde_json::to_string_pretty(manager.charts())?);

    Ok(())
}
