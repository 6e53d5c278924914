pub mod aggregates;
pub mod any_datetime;
pub mod date_range;
pub mod measurement;
pub mod metric;
pub mod prediction;
pub mod snapshot;
pub mod station;
