use crate::types::measurement::Measurement;
use crate::types::prediction::Prediction;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Distinct measurement timestamps in ascending order.
pub fn unique_timestamps(measurements: &[Measurement]) -> Vec<DateTime<Utc>> {
    dedup_sorted(measurements.iter().map(|m| m.timestamp))
}

/// Distinct prediction instants in ascending order.
pub fn unique_prediction_timestamps(predictions: &[Prediction]) -> Vec<DateTime<Utc>> {
    dedup_sorted(predictions.iter().map(|p| p.datetime))
}

fn dedup_sorted(instants: impl Iterator<Item = DateTime<Utc>>) -> Vec<DateTime<Utc>> {
    instants.collect::<BTreeSet<_>>().into_iter().collect()
}
