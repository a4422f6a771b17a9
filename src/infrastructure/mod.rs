// Infrastructure layer - config loading and adapters
pub mod chart_mapper;
pub mod config;
