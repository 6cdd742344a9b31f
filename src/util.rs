use std::f64::consts::{FRAC_PI_4, PI};

use geo::{Point, RhumbDestination};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

use crate::types::{BoundingBox, Circle, Coordinate};

/// WGS-84 equatorial radius in meters, the default sphere for every computation.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// IUGG mean Earth radius in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Sphere radius `geo` uses for its rhumb line algorithms.
const GEO_RADIUS: f64 = 6_371_008.8;

/// Below this the Mercator stretch factor is 0/0.
const PSI_TOLERANCE: f64 = 1e-11;

/// Wrap a longitude in degrees into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 540.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

#[inline]
fn mercator(phi: f64) -> f64 {
    (FRAC_PI_4 + phi / 2.0).tan()
}

/// Compute the rhumb line (constant bearing) distance in meters between two coordinates on a
/// sphere of given radius. Crossing the anti-meridian is preferred when it is shorter.
///
/// See http://www.movable-type.co.uk/scripts/latlong.html
pub fn rhumb_distance(origin: Coordinate, destination: Coordinate, radius: f64) -> f64 {
    let phi1 = origin.lat.to_radians();
    let phi2 = destination.lat.to_radians();
    let d_phi = phi2 - phi1;
    let mut d_lambda = (destination.lon - origin.lon).abs().to_radians();
    if d_lambda > PI {
        d_lambda = 2.0 * PI - d_lambda;
    }

    // On a Mercator projection longitude distances shrink with latitude by q.
    let d_psi = (mercator(phi2) / mercator(phi1)).ln();
    let q = if d_psi.abs() > PSI_TOLERANCE { d_phi / d_psi } else { phi1.cos() };

    // pythagoras on the stretched projection
    (d_phi * d_phi + q * q * d_lambda * d_lambda).sqrt() * radius
}

/// Compute the point halfway along the rhumb line between two coordinates.
pub fn rhumb_mid_point(origin: Coordinate, destination: Coordinate) -> Coordinate {
    let phi1 = origin.lat.to_radians();
    let phi2 = destination.lat.to_radians();
    let mut lambda1 = origin.lon.to_radians();
    let mut lambda2 = destination.lon.to_radians();

    // Crossing the anti-meridian: unwrap the smaller longitude.
    if (lambda2 - lambda1).abs() > PI {
        if lambda1 < lambda2 {
            lambda1 += 2.0 * PI;
        } else {
            lambda2 += 2.0 * PI;
        }
    }

    let phi3 = (phi1 + phi2) / 2.0;
    let (f1, f2, f3) = (mercator(phi1), mercator(phi2), mercator(phi3));
    let mut lambda3 =
        ((lambda2 - lambda1) * f3.ln() + lambda1 * f2.ln() - lambda2 * f1.ln()) / (f2 / f1).ln();
    if !lambda3.is_finite() {
        // parallel of latitude
        lambda3 = (lambda1 + lambda2) / 2.0;
    }

    Coordinate { lat: phi3.to_degrees(), lon: normalize_longitude(lambda3.to_degrees()) }
}

/// Project `distance` meters from `origin` along the rhumb line of constant `bearing` degrees
/// (0 north, 90 east) on a sphere of given radius. Consistent with `rhumb_distance`: bearing 90
/// stays on the origin's parallel.
pub fn destination_point(origin: Coordinate, distance: f64, bearing: f64, radius: f64) -> Coordinate {
    // geo only projects on its own sphere, so keep the angular distance instead.
    let scaled = distance * GEO_RADIUS / radius;
    let p = Point::from(origin).rhumb_destination(bearing, scaled);
    Coordinate { lat: p.y(), lon: normalize_longitude(p.x()) }
}

/// Write the circles as a GeoJSON feature collection of points, each with a `radius` property
/// in meters. If bounds are given they become the collection's bbox.
pub fn circles_to_geojson(circles: &[Circle], bounds: Option<&BoundingBox>) -> GeoJson {
    let features = circles
        .iter()
        .map(|circle| {
            let mut properties = JsonObject::new();
            properties.insert("radius".to_string(), circle.radius.into());
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    circle.center.lon,
                    circle.center.lat,
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    let bbox = bounds.map(|b| {
        let (sw, ne) = (b.south_west(), b.north_east());
        vec![sw.lon, sw.lat, ne.lon, ne.lat]
    });
    GeoJson::FeatureCollection(FeatureCollection { bbox, features, foreign_members: None })
}
