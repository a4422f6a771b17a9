// Per-database chart lifecycle - instantiate on discovery, retire on loss
use std::collections::HashSet;

use crate::application::catalog::{base_charts, database_chart_templates, DATABASE_VAR};
use crate::domain::chart::{Chart, ChartError};
use crate::domain::collection::Charts;

/// Replace the database placeholder in a templated id.
fn fill_template(tmpl: &str, dbname: &str) -> String {
    tmpl.replace(DATABASE_VAR, dbname)
}

/// Every chart instantiated for a database carries this id prefix, and
/// retirement matches on it.
pub fn database_chart_prefix(dbname: &str) -> String {
    format!("db_{}_", dbname)
}

/// Instantiate the per-database templates for a discovered database: the
/// name is substituted into chart and dimension ids and a database label is
/// attached.
pub fn new_database_charts(dbname: &str) -> Vec<Chart> {
    database_chart_templates()
        .into_iter()
        .map(|mut chart| {
            chart.id = fill_template(&chart.id, dbname);
            for dim in &mut chart.dims {
                dim.id = fill_template(&dim.id, dbname);
            }
            chart.with_label("database", dbname)
        })
        .collect()
}

/// Owns the chart collection exposed to the host agent and keeps it in sync
/// with the set of databases the collector currently sees.
pub struct ChartManager {
    charts: Charts,
    databases: HashSet<String>,
}

impl ChartManager {
    pub fn new() -> Self {
        Self {
            charts: base_charts(),
            databases: HashSet::new(),
        }
    }

    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    /// Register an extra chart on top of the built-in catalog, e.g. one
    /// supplied through the charts config file.
    pub fn register(&mut self, chart: Chart) -> Result<(), ChartError> {
        self.charts.add(chart)
    }

    pub fn add_database(&mut self, dbname: &str) {
        if !self.databases.insert(dbname.to_string()) {
            return;
        }
        tracing::debug!("adding charts for database '{}'", dbname);
        for chart in new_database_charts(dbname) {
            if let Err(e) = self.charts.add(chart) {
                tracing::warn!("failed to add chart: {}", e);
            }
        }
    }

    pub fn remove_database(&mut self, dbname: &str) {
        if !self.databases.remove(dbname) {
            return;
        }
        let flagged = self
            .charts
            .mark_remove_by_prefix(&database_chart_prefix(dbname));
        tracing::debug!("flagged {} charts of database '{}' for removal", flagged, dbname);
    }

    /// Reconcile the chart collection with the set of databases observed in
    /// the latest collection cycle.
    pub fn update_databases<S: AsRef<str>>(&mut self, seen: &[S]) {
        let seen: HashSet<&str> = seen.iter().map(|s| s.as_ref()).collect();

        let stale: Vec<String> = self
            .databases
            .iter()
            .filter(|db| !seen.contains(db.as_str()))
            .cloned()
            .collect();
        for db in stale {
            self.remove_database(&db);
        }

        for db in seen {
            if !self.databases.contains(db) {
                self.add_database(db);
            }
        }
    }
}

impl Default for ChartManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Label;

    #[test]
    fn test_new_database_charts_substitutes_name() {
        let charts = new_database_charts("production");
        assert_eq!(charts.len(), 14);

        for chart in &charts {
            assert!(chart.id.starts_with("db_production_"), "id {}", chart.id);
            assert_eq!(chart.labels, vec![Label::new("database", "production")]);
            for dim in &chart.dims {
                assert!(!dim.id.contains("${database}"), "dim {}", dim.id);
                assert!(dim.id.contains("production"), "dim {}", dim.id);
            }
        }
    }

    #[test]
    fn test_add_database_registers_charts() {
        let mut manager = ChartManager::new();
        let base = manager.charts().len();

        manager.add_database("sales");
        assert_eq!(manager.charts().len(), base + 14);
        assert!(manager.charts().contains("db_sales_transactions"));
    }

    #[test]
    fn test_add_database_twice_is_noop() {
        let mut manager = ChartManager::new();
        manager.add_database("sales");
        let len = manager.charts().len();
        manager.add_database("sales");
        assert_eq!(manager.charts().len(), len);
    }

    #[test]
    fn test_add_database_continues_past_duplicate_chart_id() {
        let mut manager = ChartManager::new();
        let colliding = Chart::new(
            "db_sales_transactions",
            "Custom",
            "units",
            "custom",
            "postgres.custom",
            1,
        );
        manager.register(colliding).unwrap();
        let base = manager.charts().len();

        manager.add_database("sales");

        // The colliding chart is skipped, the other 13 still land.
        assert_eq!(manager.charts().len(), base + 13);
        assert!(manager.charts().contains("db_sales_size"));
        assert_eq!(
            manager.charts().get("db_sales_transactions").unwrap().title,
            "Custom"
        );
    }

    #[test]
    fn test_remove_database_flags_only_matching_prefix() {
        let mut manager = ChartManager::new();
        manager.add_database("foo");
        manager.add_database("foobar");

        manager.remove_database("foo");

        assert!(manager.charts().get("db_foo_size").unwrap().marked_remove);
        assert!(!manager.charts().get("db_foobar_size").unwrap().marked_remove);
        assert!(!manager.charts().get("server_uptime").unwrap().marked_remove);
    }

    #[test]
    fn test_update_databases_reconciles() {
        let mut manager = ChartManager::new();
        manager.update_databases(&["one", "two"]);
        assert!(manager.charts().contains("db_one_size"));
        assert!(manager.charts().contains("db_two_size"));

        manager.update_databases(&["two", "three"]);
        assert!(manager.charts().get("db_one_size").unwrap().marked_remove);
        assert!(!manager.charts().get("db_two_size").unwrap().marked_remove);
        assert!(manager.charts().contains("db_three_size"));
    }

    #[test]
    fn test_update_databases_is_idempotent() {
        let mut manager = ChartManager::new();
        manager.update_databases(&["one"]);
        let len = manager.charts().len();

        manager.update_databases(&["one"]);
        assert_eq!(manager.charts().len(), len);
        assert!(!manager.charts().get("db_one_size").unwrap().marked_remove);
    }

    #[test]
    fn test_database_can_come_back_after_removal() {
        let mut manager = ChartManager::new();
        manager.update_databases(&["one"]);
        manager.update_databases(&[] as &[&str]);
        assert!(manager.charts().get("db_one_size").unwrap().marked_remove);

        manager.update_databases(&["one"]);
        assert!(!manager.charts().get("db_one_size").unwrap().marked_remove);
    }
}
