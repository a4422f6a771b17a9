// Ordered chart collection with unique-id registration
use std::collections::HashSet;

use serde::Serialize;

use super::chart::{Chart, ChartError};

/// The set of charts the plugin currently exposes to the host agent.
/// Registration order is preserved; chart ids are unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Charts {
    charts: Vec<Chart>,
}

impl Charts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chart. A chart that was previously flagged for removal is
    /// replaced in place, so a retired chart set can come back under the
    /// same id.
    pub fn add(&mut self, chart: Chart) -> Result<(), ChartError> {
        validate(&chart)?;
        if let Some(existing) = self.get_mut(&chart.id) {
            if !existing.marked_remove {
                return Err(ChartError::DuplicateChart(chart.id));
            }
            *existing = chart;
            return Ok(());
        }
        self.charts.push(chart);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Chart> {
        self.charts.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        self.charts.iter()
    }

    /// Flag every chart whose id starts with the given prefix for removal.
    /// Returns the number of charts flagged.
    pub fn mark_remove_by_prefix(&mut self, prefix: &str) -> usize {
        let mut flagged = 0;
        for chart in self.charts.iter_mut() {
            if chart.id.starts_with(prefix) && !chart.marked_remove {
                chart.mark_remove();
                flagged += 1;
            }
        }
        flagged
    }
}

fn validate(chart: &Chart) -> Result<(), ChartError> {
    if chart.id.is_empty() {
        return Err(ChartError::EmptyChartId);
    }
    let mut seen = HashSet::new();
    for dim in &chart.dims {
        if !seen.insert(dim.id.as_str()) {
            return Err(ChartError::DuplicateDimension {
                chart: chart.id.clone(),
                dim: dim.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Dimension;

    fn chart(id: &str) -> Chart {
        Chart::new(id, "Test", "units", "family", "postgres.test", 1)
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut charts = Charts::new();
        charts.add(chart("a")).unwrap();
        assert_eq!(
            charts.add(chart("a")),
            Err(ChartError::DuplicateChart("a".to_string()))
        );
        assert_eq!(charts.len(), 1);
    }

    #[test]
    fn test_add_rejects_empty_id() {
        let mut charts = Charts::new();
        assert_eq!(charts.add(chart("")), Err(ChartError::EmptyChartId));
    }

    #[test]
    fn test_add_rejects_duplicate_dimension() {
        let mut charts = Charts::new();
        let bad = chart("a").with_dims(vec![
            Dimension::new("x", "one"),
            Dimension::new("x", "two"),
        ]);
        assert_eq!(
            charts.add(bad),
            Err(ChartError::DuplicateDimension {
                chart: "a".to_string(),
                dim: "x".to_string(),
            })
        );
    }

    #[test]
    fn test_add_replaces_chart_flagged_for_removal() {
        let mut charts = Charts::new();
        charts.add(chart("a")).unwrap();
        charts.get_mut("a").unwrap().mark_remove();

        let replacement = chart("a").with_dims(vec![Dimension::new("x", "x")]);
        charts.add(replacement).unwrap();

        let current = charts.get("a").unwrap();
        assert!(!current.marked_remove);
        assert_eq!(current.dims.len(), 1);
        assert_eq!(charts.len(), 1);
    }

    #[test]
    fn test_mark_remove_by_prefix_matches_prefix_only() {
        let mut charts = Charts::new();
        charts.add(chart("db_foo_size")).unwrap();
        charts.add(chart("db_foobar_size")).unwrap();
        charts.add(chart("uptime")).unwrap();

        assert_eq!(charts.mark_remove_by_prefix("db_foo_"), 1);
        assert!(charts.get("db_foo_size").unwrap().marked_remove);
        assert!(!charts.get("db_foobar_size").unwrap().marked_remove);
        assert!(!charts.get("uptime").unwrap().marked_remove);
    }

    #[test]
    fn test_mark_remove_by_prefix_skips_already_flagged() {
        let mut charts = Charts::new();
        charts.add(chart("db_foo_size")).unwrap();
        assert_eq!(charts.mark_remove_by_prefix("db_foo_"), 1);
        assert_eq!(charts.mark_remove_by_prefix("db_foo_"), 0);
    }
}
