// Mapping from config records to domain charts
use crate::domain::chart::{Chart, ChartError, ChartType, DimAlgo, Dimension};
use crate::infrastructure::config::{ChartConfig, ChartsConfig, DimConfig};

pub fn map_charts(config: &ChartsConfig) -> Result<Vec<Chart>, ChartError> {
    config.charts.iter().map(map_chart).collect()
}

pub fn map_chart(config: &ChartConfig) -> Result<Chart, ChartError> {
    let chart_type = match config.kind.as_deref() {
        None | Some("line") => ChartType::Line,
        Some("area") => ChartType::Area,
        Some("stacked") => ChartType::Stacked,
        Some(other) => return Err(ChartError::UnknownChartType(other.to_string())),
    };

    let dims = config
        .dims
        .iter()
        .map(map_dim)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Chart::new(
        &config.id,
        &config.title,
        &config.units,
        &config.family,
        &config.context,
        config.priority,
    )
    .with_type(chart_type)
    .with_dims(dims))
}

fn map_dim(config: &DimConfig) -> Result<Dimension, ChartError> {
    let algo = match config.algo.as_deref() {
        None | Some("absolute") => DimAlgo::Absolute,
        Some("incremental") => DimAlgo::Incremental,
        Some(other) => return Err(ChartError::UnknownAlgorithm(other.to_string())),
    };

    Ok(Dimension {
        id: config.id.clone(),
        name: config.name.clone(),
        algo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_config() -> ChartConfig {
        ChartConfig {
            id: "replication_lag".to_string(),
            title: "Replication lag".to_string(),
            units: "seconds".to_string(),
            family: "replication".to_string(),
            context: "postgres.replication_lag".to_string(),
            priority: 70_100,
            kind: None,
            dims: vec![DimConfig {
                id: "replication_lag".to_string(),
                name: "lag".to_string(),
                algo: None,
            }],
        }
    }

    #[test]
    fn test_map_chart_defaults() {
        let chart = map_chart(&chart_config()).unwrap();
        assert_eq!(chart.chart_type, ChartType::Line);
        assert_eq!(chart.dims[0].algo, DimAlgo::Absolute);
        assert_eq!(chart.priority, 70_100);
    }

    #[test]
    fn test_map_chart_stacked_incremental() {
        let mut config = chart_config();
        config.kind = Some("stacked".to_string());
        config.dims[0].algo = Some("incremental".to_string());

        let chart = map_chart(&config).unwrap();
        assert_eq!(chart.chart_type, ChartType::Stacked);
        assert_eq!(chart.dims[0].algo, DimAlgo::Incremental);
    }

    #[test]
    fn test_map_chart_rejects_unknown_kind() {
        let mut config = chart_config();
        config.kind = Some("heatmap".to_string());
        assert_eq!(
            map_chart(&config),
            Err(ChartError::UnknownChartType("heatmap".to_string()))
        );
    }

    #[test]
    fn test_map_dim_rejects_unknown_algo() {
        let mut config = chart_config();
        config.dims[0].algo = Some("derivative".to_string());
        assert_eq!(
            map_chart(&config),
            Err(ChartError::UnknownAlgorithm("derivative".to_string()))
        );
    }
}
