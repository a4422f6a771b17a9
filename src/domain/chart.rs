// Chart metadata domain model
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("chart id is empty")]
    EmptyChartId,
    #[error("chart '{0}' is already registered")]
    DuplicateChart(String),
    #[error("chart '{chart}' has duplicate dimension '{dim}'")]
    DuplicateDimension { chart: String, dim: String },
    #[error("unknown chart type '{0}'")]
    UnknownChartType(String),
    #[error("unknown dimension algorithm '{0}'")]
    UnknownAlgorithm(String),
}

/// How the chart is rendered by the host agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Line,
    Area,
    Stacked,
}

/// How the host turns a collected value into a displayed one.
/// Incremental dimensions are shown as a per-second rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimAlgo {
    #[default]
    Absolute,
    Incremental,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub id: String,
    pub name: String,
    pub algo: DimAlgo,
}

impl Dimension {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            algo: DimAlgo::Absolute,
        }
    }

    pub fn incremental(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            algo: DimAlgo::Incremental,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

impl Label {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub units: String,
    pub family: String,
    pub context: String,
    pub priority: i32,
    pub chart_type: ChartType,
    pub labels: Vec<Label>,
    pub dims: Vec<Dimension>,
    /// Whether the host has already been told about this chart.
    pub created: bool,
    /// Flagged charts are retired by the host on its next flush.
    pub marked_remove: bool,
}

impl Chart {
    pub fn new(
        id: &str,
        title: &str,
        units: &str,
        family: &str,
        context: &str,
        priority: i32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            units: units.to_string(),
            family: family.to_string(),
            context: context.to_string(),
            priority,
            chart_type: ChartType::Line,
            labels: Vec::new(),
            dims: Vec::new(),
            created: false,
            marked_remove: false,
        }
    }

    pub fn with_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    pub fn with_dims(mut self, dims: Vec<Dimension>) -> Self {
        self.dims = dims;
        self
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.push(Label::new(key, value));
        self
    }

    /// Flag the chart for retirement. The created flag is cleared so the
    /// host re-announces the chart if it is ever registered again.
    pub fn mark_remove(&mut self) {
        self.marked_remove = true;
        self.created = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_remove_clears_created() {
        let mut chart = Chart::new("uptime", "Uptime", "seconds", "uptime", "postgres.uptime", 1);
        chart.created = true;
        chart.mark_remove();
        assert!(chart.marked_remove);
        assert!(!chart.created);
    }

    #[test]
    fn test_dimension_algorithms() {
        assert_eq!(Dimension::new("a", "a").algo, DimAlgo::Absolute);
        assert_eq!(Dimension::incremental("b", "b").algo, DimAlgo::Incremental);
    }
}
