pub mod daily;
pub mod join;
pub mod series;
pub mod statistics;
