// Optional operator-supplied charts, loaded from a TOML config file
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartsConfig {
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub units: String,
    pub family: String,
    pub context: String,
    pub priority: i32,
    /// "line", "area" or "stacked"; defaults to "line".
    pub kind: Option<String>,
    #[serde(default)]
    pub dims: Vec<DimConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DimConfig {
    pub id: String,
    pub name: String,
    /// "absolute" or "incremental"; defaults to "absolute".
    pub algo: Option<String>,
}

/// Load the charts config file. The file is optional, a missing file yields
/// an empty config.
pub fn load_charts_config(name: &str) -> anyhow::Result<ChartsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
