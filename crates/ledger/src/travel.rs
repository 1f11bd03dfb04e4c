use model::{location::LocationSample, WithDistance};
use route::path;

/// Distance covered by the recorded GPS trail, in the order the samples were
/// captured. The samples are expected in capture order already.
pub fn location_history_distance(samples: &[LocationSample]) -> f64 {
    path::path_distance(samples.iter().map(|sample| sample.coordinate))
}

/// Every sample paired with its distance from the previous one. The first
/// sample is 0 km from itself.
pub fn location_history_legs(samples: &[LocationSample]) -> Vec<WithDistance<&LocationSample>> {
    let mut previous: Option<&LocationSample> = None;
    samples
        .iter()
        .map(|sample| {
            let distance = previous
                .map(|previous| previous.coordinate.distance_km(&sample.coordinate))
                .unwrap_or(0.0);
            previous = Some(sample);
            WithDistance::new(distance, sample)
        })
        .collect()
}
