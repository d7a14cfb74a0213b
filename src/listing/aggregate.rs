//! Latest-per-group reduction for cafeteria queue samples.

use std::collections::BTreeMap;

use crate::domain::{Cafeteria, QueueStatus};

/// Reduces a sample log to the most recent sample per cafeteria. Only
/// cafeterias present in the input appear in the output; a timestamp tie
/// keeps the first-encountered sample, so the result is deterministic for
/// a given input order. Output is ordered by cafeteria.
pub fn latest_per_cafeteria(samples: &[QueueStatus]) -> Vec<QueueStatus> {
    let mut latest: BTreeMap<Cafeteria, &QueueStatus> = BTreeMap::new();

    for sample in samples {
        match latest.get(&sample.cafeteria) {
            Some(current) if sample.created_at <= current.created_at => {}
            _ => {
                latest.insert(sample.cafeteria, sample);
            }
        }
    }

    latest.into_values().cloned().collect()
}
