// Application layer - catalog assembly and chart lifecycle
pub mod catalog;
pub mod database_charts;
