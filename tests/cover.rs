use std::convert::TryFrom;

use geocover::util::{normalize_longitude, rhumb_distance, rhumb_mid_point, EARTH_RADIUS};
use geocover::{cover, BoundingBox, Coordinate, Planner, Strategy};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}

#[test]
fn small_box_gets_a_single_circle() {
    let bounds = BoundingBox::from_json(
        r#"{"southWest": {"lat": 0, "lon": 0}, "northEast": {"lat": 1, "lon": 1}}"#,
    )
    .unwrap();

    let coverage = cover(&bounds, 100_000.0).unwrap();

    assert_eq!(coverage.len(), 1);
    assert_close(coverage[0].center.lat, 0.5, 0.001);
    assert_close(coverage[0].center.lon, 0.5, 0.001);
    assert_close(coverage[0].radius, 78_712.0, 1.0);
}

#[test]
fn large_box_gets_a_honeycomb() {
    let bounds = BoundingBox::from_json(
        r#"{"southWest": {"lat": 0, "lon": 0}, "northEast": {"lat": 10, "lon": 10}}"#,
    )
    .unwrap();

    let coverage = cover(&bounds, 300_000.0).unwrap();

    assert_eq!(coverage.len(), 8);
    assert_close(coverage[0].center.lat, 1.347, 0.0005);
    assert_close(coverage[0].center.lon, 0.0, 0.001);
    assert_eq!(coverage[0].radius, 300_000.0);
}

#[test]
fn both_input_shapes_cover_alike() {
    let from_array = BoundingBox::try_from([0.0, 0.0, 10.0, 10.0]).unwrap();
    let from_object = BoundingBox::from_json(
        r#"{"southWest": {"lat": 0, "lon": 0}, "northEast": {"lat": 10, "lon": 10}}"#,
    )
    .unwrap();
    assert_eq!(cover(&from_array, 300_000.0).unwrap(), cover(&from_object, 300_000.0).unwrap());
}

#[test]
fn single_circle_sits_on_the_rhumb_midpoint() {
    let boxes = [[10.0, 20.0, 10.5, 21.0], [-40.0, 170.0, -39.0, -179.5], [60.0, -3.0, 62.0, 1.0]];
    for corners in &boxes {
        let bounds = BoundingBox::try_from(*corners).unwrap();
        let half_diagonal = bounds.half_diagonal(EARTH_RADIUS);
        let circles = cover(&bounds, half_diagonal * 1.01).unwrap();

        assert_eq!(circles.len(), 1);
        let expected = rhumb_mid_point(bounds.south_west(), bounds.north_east());
        assert_eq!(circles[0].center, expected);
        assert_eq!(circles[0].radius, half_diagonal);
    }
}

#[test]
fn honeycomb_circles_share_the_max_radius() {
    let bounds = BoundingBox::try_from([45.0, 5.0, 48.0, 11.0]).unwrap();
    let coverage = Planner::default().plan(&bounds, 25_000.0).unwrap();

    assert_eq!(coverage.strategy, Strategy::Honeycomb);
    assert!(coverage.len() > 1);
    assert!(coverage.iter().all(|c| c.radius == 25_000.0));
}

#[test]
fn honeycomb_centers_stay_in_the_box() {
    let bounds = BoundingBox::try_from([45.0, 5.0, 46.0, 7.0]).unwrap();
    let circles = cover(&bounds, 20_000.0).unwrap();

    // 4 rows by 10 columns
    assert_eq!(circles.len(), 20);
    for c in &circles {
        assert!(c.center.lat > 45.0 && c.center.lat < 46.0, "{:?}", c);
        assert!(c.center.lon >= 5.0 - 1e-9 && c.center.lon < 7.0, "{:?}", c);
    }
    // The first row sits half a radius north of the south edge.
    assert!(circles[0].contains(bounds.south_west(), EARTH_RADIUS));
}

/// Grid points of the box at least `margin` meters from every edge.
fn interior_points(corners: [f64; 4], margin: f64, steps: usize) -> Vec<Coordinate> {
    let [south, west, north, east] = corners;
    let span = (east - west).rem_euclid(360.0);
    let mut points = Vec::new();
    for i in 0..=steps {
        for j in 0..=steps {
            let lat = south + (north - south) * i as f64 / steps as f64;
            let point = Coordinate { lat, lon: normalize_longitude(west + span * j as f64 / steps as f64) };
            let edges = [
                Coordinate { lat: south, lon: point.lon },
                Coordinate { lat: north, lon: point.lon },
                Coordinate { lat, lon: west },
                Coordinate { lat, lon: east },
            ];
            if edges.iter().all(|&edge| rhumb_distance(point, edge, EARTH_RADIUS) >= margin) {
                points.push(point);
            }
        }
    }
    points
}

#[test]
fn honeycomb_covers_interior_points() {
    let cases = [
        ([60.0, 0.0, 62.0, 60.0], 50_000.0),
        ([-62.0, 0.0, -60.0, 60.0], 50_000.0),
        ([45.0, 5.0, 46.0, 7.0], 20_000.0),
        ([0.0, 0.0, 10.0, 10.0], 300_000.0),
        ([-20.0, 175.0, -15.0, -175.0], 100_000.0),
        ([-40.0, -70.0, -30.0, -50.0], 80_000.0),
    ];
    for &(corners, radius) in &cases {
        let bounds = BoundingBox::try_from(corners).unwrap();
        let circles = cover(&bounds, radius).unwrap();
        let points = interior_points(corners, radius, 30);
        assert!(!points.is_empty(), "{:?}", corners);
        for point in points {
            assert!(
                circles.iter().any(|c| c.contains(point, EARTH_RADIUS)),
                "{:?} with radius {} leaves {:?} uncovered",
                corners,
                radius,
                point
            );
        }
    }
    // Far east on a high-latitude box.
    let bounds = BoundingBox::try_from([60.0, 0.0, 62.0, 60.0]).unwrap();
    let circles = cover(&bounds, 50_000.0).unwrap();
    let point = Coordinate { lat: 61.0, lon: 55.0 };
    assert!(circles.iter().any(|c| c.contains(point, EARTH_RADIUS)));
}

#[test]
fn antimeridian_box_is_covered() {
    let bounds = BoundingBox::try_from([-20.0, 175.0, -15.0, -175.0]).unwrap();
    let circles = cover(&bounds, 100_000.0).unwrap();

    assert!(circles.len() > 1);
    assert!(circles.iter().any(|c| c.center.lon > 175.0));
    assert!(circles.iter().any(|c| c.center.lon < 0.0));
    for circle in &circles {
        assert!(circle.center.lon > -180.0 && circle.center.lon <= 180.0);
    }
}

#[test]
fn output_uses_lat_lon_names() {
    let bounds = BoundingBox::try_from([0.0, 0.0, 1.0, 1.0]).unwrap();
    let circles = cover(&bounds, 100_000.0).unwrap();
    let json = serde_json::to_value(&circles).unwrap();

    assert!(json[0]["center"]["lat"].is_number());
    assert!(json[0]["center"]["lon"].is_number());
    assert!(json[0]["radius"].is_number());
}
