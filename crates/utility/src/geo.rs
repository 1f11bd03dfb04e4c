pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers between two points given in degrees.
///
/// The intermediate haversine term is clamped to `[0, 1]` so rounding noise
/// near antipodal points can not produce `NaN`.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = to_radians(latitude_2 - latitude_1);
    let dlon = to_radians(longitude_2 - longitude_1);

    let a = ((dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: (f64, f64) = (28.6139, 77.2090);
    const MUMBAI: (f64, f64) = (19.0760, 72.8777);

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine_distance(DELHI.0, DELHI.1, DELHI.0, DELHI.1), 0.0);
        assert_eq!(haversine_distance(-33.9, 151.2, -33.9, 151.2), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(DELHI.0, DELHI.1, MUMBAI.0, MUMBAI.1);
        let back = haversine_distance(MUMBAI.0, MUMBAI.1, DELHI.0, DELHI.1);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn delhi_to_mumbai() {
        let distance = haversine_distance(DELHI.0, DELHI.1, MUMBAI.0, MUMBAI.1);
        assert!(distance > 1145.0 && distance < 1165.0, "got {distance}");
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!(!distance.is_nan());
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);

        let distance = haversine_distance(10.0, 20.0, -10.0, -160.0);
        assert!(!distance.is_nan());
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-3);
    }

    #[test]
    fn coordinate_ranges() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(90.5));
        assert!(!is_valid_latitude(f64::NAN));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(180.01));
        assert!(!is_valid_longitude(f64::INFINITY));
    }
}
