// Domain layer - chart metadata records
pub mod chart;
pub mod collection;
