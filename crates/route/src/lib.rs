//! Distances along a planned route.
//!
//! A route is chained as start, stops by ascending sequence, end. Waypoints
//! without a coordinate do not take part in the chain at all, so a stop whose
//! position is unknown neither adds a zero-length leg nor breaks the route in
//! two. Everything here is a pure function of the given waypoints.

use model::{coordinate::Coordinate, waypoint::Waypoint};

pub mod path;
pub mod summary;

pub use path::path_distance;
pub use summary::{summarize, Leg, RouteSummary};

/// Coordinate-bearing waypoints in travel order.
pub fn chain(waypoints: &[Waypoint]) -> Vec<(&Waypoint, Coordinate)> {
    let mut chain = waypoints
        .iter()
        .filter_map(|waypoint| waypoint.coordinate.map(|coordinate| (waypoint, coordinate)))
        .collect::<Vec<_>>();
    // stable, so duplicate sequence numbers keep their input order
    chain.sort_by_key(|(waypoint, _)| (waypoint.kind, waypoint.sequence));
    chain
}

/// Number of waypoints that take part in the distance chain.
pub fn point_count(waypoints: &[Waypoint]) -> usize {
    waypoints
        .iter()
        .filter(|waypoint| waypoint.coordinate.is_some())
        .count()
}

/// Great-circle length of each leg between consecutive chained waypoints.
/// Empty for fewer than two chained waypoints.
pub fn leg_distances(waypoints: &[Waypoint]) -> Vec<f64> {
    path::leg_distances(chain(waypoints).into_iter().map(|(_, coordinate)| coordinate))
}

/// Sum of all leg distances in kilometers.
pub fn total_distance(waypoints: &[Waypoint]) -> f64 {
    leg_distances(waypoints).into_iter().sum()
}

/// Distance traveled when reaching each chained waypoint, starting at 0.
pub fn cumulative_distances(waypoints: &[Waypoint]) -> Vec<f64> {
    let chained = chain(waypoints);
    if chained.is_empty() {
        return vec![];
    }
    let mut traveled = 0.0;
    let mut cumulative = Vec::with_capacity(chained.len());
    cumulative.push(traveled);
    for distance in path::leg_distances(chained.into_iter().map(|(_, coordinate)| coordinate)) {
        traveled += distance;
        cumulative.push(traveled);
    }
    cumulative
}

#[cfg(test)]
mod tests {
    use model::waypoint::WaypointKind;

    use super::*;

    const DELHI: Coordinate = Coordinate::new(28.6139, 77.2090);
    const JAIPUR: Coordinate = Coordinate::new(26.9124, 75.7873);
    const AHMEDABAD: Coordinate = Coordinate::new(23.0225, 72.5714);

    fn delhi_jaipur_ahmedabad() -> Vec<Waypoint> {
        vec![
            Waypoint::start("Delhi", DELHI),
            Waypoint::stop(1, "Jaipur", JAIPUR),
            Waypoint::end(2, "Ahmedabad", AHMEDABAD),
        ]
    }

    #[test]
    fn empty_and_single_routes_have_no_distance() {
        assert_eq!(total_distance(&[]), 0.0);
        assert!(leg_distances(&[]).is_empty());
        assert!(cumulative_distances(&[]).is_empty());

        let single = [Waypoint::start("Delhi", DELHI)];
        assert_eq!(total_distance(&single), 0.0);
        assert!(leg_distances(&single).is_empty());
        assert_eq!(point_count(&single), 1);
        assert_eq!(cumulative_distances(&single), vec![0.0]);
    }

    #[test]
    fn total_is_sum_of_legs() {
        let route = delhi_jaipur_ahmedabad();
        let legs = leg_distances(&route);
        assert_eq!(legs.len(), 2);
        assert!((total_distance(&route) - (legs[0] + legs[1])).abs() < 1e-9);
        assert!((legs[0] - 235.3).abs() < 1.0, "got {}", legs[0]);
        assert!((legs[1] - 540.5).abs() < 1.0, "got {}", legs[1]);
        assert_eq!(point_count(&route), 3);
    }

    #[test]
    fn chain_order_ignores_input_order() {
        let mut route = delhi_jaipur_ahmedabad();
        route.reverse();
        let ordered = delhi_jaipur_ahmedabad();
        assert_eq!(leg_distances(&route), leg_distances(&ordered));

        let labels = chain(&route)
            .into_iter()
            .map(|(waypoint, _)| waypoint.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Delhi", "Jaipur", "Ahmedabad"]);
    }

    #[test]
    fn stops_are_ordered_by_sequence() {
        let route = vec![
            Waypoint::stop(7, "later", AHMEDABAD),
            Waypoint::stop(3, "earlier", JAIPUR),
            Waypoint::start("Delhi", DELHI),
        ];
        let labels = chain(&route)
            .into_iter()
            .map(|(waypoint, _)| waypoint.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["Delhi", "earlier", "later"]);
    }

    #[test]
    fn waypoints_without_coordinates_are_skipped() {
        let mut route = delhi_jaipur_ahmedabad();
        route.insert(
            1,
            Waypoint::new(WaypointKind::Stop, 5, "somewhere", None),
        );
        let direct = delhi_jaipur_ahmedabad();
        assert_eq!(leg_distances(&route).len(), 2);
        assert!((total_distance(&route) - total_distance(&direct)).abs() < 1e-9);
        assert_eq!(point_count(&route), 3);

        let nothing_known = [
            Waypoint::new(WaypointKind::Start, 0, "a", None),
            Waypoint::new(WaypointKind::End, 1, "b", None),
        ];
        assert_eq!(total_distance(&nothing_known), 0.0);
        assert!(leg_distances(&nothing_known).is_empty());
    }

    #[test]
    fn cumulative_distances_end_at_total() {
        let route = delhi_jaipur_ahmedabad();
        let cumulative = cumulative_distances(&route);
        assert_eq!(cumulative.len(), 3);
        assert_eq!(cumulative[0], 0.0);
        assert!((cumulative[2] - total_distance(&route)).abs() < 1e-9);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let route = delhi_jaipur_ahmedabad();
        assert_eq!(total_distance(&route), total_distance(&route));
        assert_eq!(leg_distances(&route), leg_distances(&route));
    }
}
