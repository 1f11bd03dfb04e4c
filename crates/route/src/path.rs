use itertools::Itertools;
use model::coordinate::Coordinate;

/// Length of every segment between consecutive coordinates.
pub fn leg_distances<I>(coordinates: I) -> Vec<f64>
where
    I: IntoIterator<Item = Coordinate>,
{
    coordinates
        .into_iter()
        .tuple_windows()
        .map(|(from, to)| from.distance_km(&to))
        .collect()
}

/// Total length of a polyline through the given coordinates, 0 for fewer than
/// two points.
pub fn path_distance<I>(coordinates: I) -> f64
where
    I: IntoIterator<Item = Coordinate>,
{
    coordinates
        .into_iter()
        .tuple_windows()
        .map(|(from, to)| from.distance_km(&to))
        .sum()
}
