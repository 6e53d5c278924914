use crate::types::date_range::DateRange;
use crate::types::measurement::Measurement;

pub trait MeasurementFilterExt {
    /// Keeps measurements whose timestamp lies inside `range` (inclusive).
    ///
    /// An unbounded side does not filter. With both sides unbounded the result is an
    /// unchanged copy of the input.
    fn filter_date_range(&self, range: &DateRange) -> Vec<Measurement>;

    /// Keeps measurements reported by one of `names`.
    ///
    /// An empty `names` slice means "no station filter" and returns every measurement,
    /// not none of them.
    fn filter_stations<S: AsRef<str>>(&self, names: &[S]) -> Vec<Measurement>;
}

impl MeasurementFilterExt for [Measurement] {
    fn filter_date_range(&self, range: &DateRange) -> Vec<Measurement> {
        if range.is_unbounded() {
            return self.to_vec();
        }
        self.iter()
            .filter(|m| range.contains(&m.timestamp))
            .cloned()
            .collect()
    }

    fn filter_stations<S: AsRef<str>>(&self, names: &[S]) -> Vec<Measurement> {
        if names.is_empty() {
            return self.to_vec();
        }
        self.iter()
            .filter(|m| names.iter().any(|n| n.as_ref() == m.station_name))
            .cloned()
            .collect()
    }
}

pub fn filter_by_date_range(measurements: &[Measurement], range: &DateRange) -> Vec<Measurement> {
    measurements.filter_date_range(range)
}

pub fn filter_by_stations<S: AsRef<str>>(measurements: &[Measurement], names: &[S]) -> Vec<Measurement> {
    measurements.filter_stations(names)
}

/// Applies the date-range filter, then the station filter.
pub fn filter_measurements<S: AsRef<str>>(
    measurements: &[Measurement],
    range: &DateRange,
    names: &[S],
) -> Vec<Measurement> {
    measurements.filter_date_range(range).filter_stations(names)
}
