//! Geographic helpers for proximity search
//!
//! Locations travel over the wire as GeoJSON-shaped points. Clients send and
//! read coordinates as `[latitude, longitude]`, the same order they use for
//! the search centre. The store keeps latitude and longitude in separate indexed columns;
//! a search first narrows candidates with [`BoundingBox`] and then applies
//! the exact great-circle distance from [`haversine_km`].

use serde::{Deserialize, Serialize};

use crate::shared::SharedError;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// GeoJSON geometry type tag; only points are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PointType {
    #[default]
    Point,
}

/// Point location, coordinates ordered `[latitude, longitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default)]
    pub kind: PointType,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            kind: PointType::Point,
            coordinates: [latitude, longitude],
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Reject coordinates outside the WGS84 range
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_coordinates(self.latitude(), self.longitude())
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), SharedError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(SharedError::validation("location", "Latitude must be between -90 and 90"));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(SharedError::validation("location", "Longitude must be between -180 and 180"));
    }
    Ok(())
}

/// Great-circle distance between two points in kilometres
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Latitude/longitude box containing every point within a radius of a centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    /// `None` when the circle touches a pole or crosses the antimeridian;
    /// longitude then cannot narrow the search.
    pub longitude: Option<(f64, f64)>,
}

impl BoundingBox {
    pub fn around(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        let angular = radius_km / EARTH_RADIUS_KM;
        let d_lat = angular.to_degrees();
        let min_lat = latitude - d_lat;
        let max_lat = latitude + d_lat;

        if min_lat <= -90.0 || max_lat >= 90.0 {
            return Self {
                min_lat: min_lat.max(-90.0),
                max_lat: max_lat.min(90.0),
                longitude: None,
            };
        }

        let ratio = angular.sin() / latitude.to_radians().cos();
        if ratio >= 1.0 {
            return Self { min_lat, max_lat, longitude: None };
        }

        let d_lng = ratio.asin().to_degrees();
        let (min_lng, max_lng) = (longitude - d_lng, longitude + d_lng);
        let longitude = if min_lng < -180.0 || max_lng > 180.0 {
            None
        } else {
            Some((min_lng, max_lng))
        };

        Self { min_lat, max_lat, longitude }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        if latitude < self.min_lat || latitude > self.max_lat {
            return false;
        }
        match self.longitude {
            Some((min, max)) => (min..=max).contains(&longitude),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coordinates_are_lat_lng() {
        let point: GeoPoint =
            serde_json::from_value(serde_json::json!({ "type": "Point", "coordinates": [19.0760, 72.8777] }))
                .unwrap();
        assert_eq!(point.latitude(), 19.0760);
        assert_eq!(point.longitude(), 72.8777);
    }

    #[test]
    fn test_type_defaults_to_point() {
        let point: GeoPoint = serde_json::from_value(serde_json::json!({ "coordinates": [1.0, 2.0] })).unwrap();
        assert_eq!(point.kind, PointType::Point);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, -181.0).validate().is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
        assert!(GeoPoint::new(-90.0, 180.0).validate().is_ok());
    }

    #[test]
    fn test_mumbai_to_pune() {
        let d = haversine_km(19.0760, 72.8777, 18.5204, 73.8567);
        assert!((118.0..122.0).contains(&d), "distance was {d}");
    }

    #[test]
    fn test_box_near_pole_drops_longitude() {
        let bbox = BoundingBox::around(89.95, 10.0, 20.0);
        assert_eq!(bbox.longitude, None);
        assert_eq!(bbox.max_lat, 90.0);
    }

    #[test]
    fn test_box_across_antimeridian_drops_longitude() {
        let bbox = BoundingBox::around(0.0, 179.99, 10.0);
        assert_eq!(bbox.longitude, None);
        assert!(bbox.contains(0.01, -179.99));
    }

    /// Point reached by travelling `distance_km` from a start on `bearing`
    fn destination(lat: f64, lng: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
        let d = distance_km / EARTH_RADIUS_KM;
        let theta = bearing_deg.to_radians();
        let phi1 = lat.to_radians();
        let lambda1 = lng.to_radians();

        let phi2 = (phi1.sin() * d.cos() + phi1.cos() * d.sin() * theta.cos()).asin();
        let lambda2 = lambda1
            + (theta.sin() * d.sin() * phi1.cos()).atan2(d.cos() - phi1.sin() * phi2.sin());
        let lng2 = (lambda2.to_degrees() + 540.0) % 360.0 - 180.0;
        (phi2.to_degrees(), lng2)
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..90.0, lng1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lng2 in -180.0f64..180.0,
        ) {
            let ab = haversine_km(lat1, lng1, lat2, lng2);
            let ba = haversine_km(lat2, lng2, lat1, lng1);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!(ab <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn points_within_radius_fall_inside_box(
            lat in -80.0f64..80.0,
            lng in -179.0f64..179.0,
            radius in 0.5f64..200.0,
            bearing in 0.0f64..360.0,
            fraction in 0.0f64..0.999,
        ) {
            let (plat, plng) = destination(lat, lng, bearing, radius * fraction);
            prop_assert!(haversine_km(lat, lng, plat, plng) <= radius);

            let bbox = BoundingBox::around(lat, lng, radius);
            prop_assert!(bbox.contains(plat, plng), "{:?} missing ({}, {})", bbox, plat, plng);
        }
    }
}
