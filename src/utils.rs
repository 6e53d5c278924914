use crate::types::measurement::Measurement;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Running sum and sample count of one optional numeric field.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FieldAccumulator {
    sum: f64,
    count: usize,
}

impl FieldAccumulator {
    pub(crate) fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean of the non-null values, `None` when there are none.
pub(crate) fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut acc = FieldAccumulator::default();
    values.into_iter().for_each(|v| acc.push(v));
    acc.average()
}

/// Maximum of the non-null values, `None` when there are none.
pub(crate) fn max(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .map(OrderedFloat)
        .max()
        .map(OrderedFloat::into_inner)
}

/// Groups measurements by station name.
///
/// Groups are returned in order of the first appearance of each name, and each group
/// keeps the input order of its measurements.
pub(crate) fn group_by_station(measurements: &[Measurement]) -> Vec<(&str, Vec<&Measurement>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Measurement>)> = Vec::new();
    for m in measurements {
        let name = m.station_name.as_str();
        match positions.get(name) {
            Some(&idx) => groups[idx].1.push(m),
            None => {
                positions.insert(name, groups.len());
                groups.push((name, vec![m]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_mean_and_max_ignore_nulls() {
        let values = [Some(10.0), None, Some(30.0), None];
        assert_eq!(mean(values), Some(20.0));
        assert_eq!(max(values), Some(30.0));
    }

    #[test]
    fn test_mean_and_max_of_only_nulls() {
        assert_eq!(mean([None, None]), None);
        assert_eq!(max([None, None]), None);
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn test_zero_is_a_reading() {
        assert_eq!(mean([Some(0.0), Some(10.0)]), Some(5.0));
        assert_eq!(max([Some(-4.0), Some(0.0)]), Some(0.0));
    }

    #[test]
    fn test_group_by_station_keeps_first_appearance_order() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let measurements = vec![
            Measurement::new(ts, "B"),
            Measurement::new(ts, "A"),
            Measurement::new(ts, "B"),
        ];
        let groups = group_by_station(&measurements);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "B");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "A");
    }
}
