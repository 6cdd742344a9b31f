use std::convert::TryFrom;

use geo::{LineString, Point, Polygon, Rect};

use crate::error::{CoverError, Result};
use crate::util::{destination_point, rhumb_distance, rhumb_mid_point};

/// Represent some map coordinate in degrees.
///
/// Serialized as `{"lat", "lon"}`; `latitude` and `longitude` are accepted when reading.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
}

impl Coordinate {
    /// Bounds-checked constructor.
    pub fn new(lat: f64, lon: f64) -> Result<Coordinate> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoverError::InvalidLatitude(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoverError::InvalidLongitude(lon));
        }
        Ok(Coordinate { lat, lon })
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Point<f64> {
        Point::new(c.lon, c.lat)
    }
}

/// Rhumb-line extents of a bounding box in meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Distances {
    /// Along the south edge, west to east.
    pub x_axis: f64,
    /// Along the west edge, south to north.
    pub y_axis: f64,
}

/// The shapes a bounding box is accepted in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoundingBoxInput {
    /// `[swLat, swLon, neLat, neLon]`
    Corners([f64; 4]),
    /// `{"southWest": {"lat", "lon"}, "northEast": {"lat", "lon"}}`
    Object {
        #[serde(rename = "southWest")]
        south_west: Coordinate,
        #[serde(rename = "northEast")]
        north_east: Coordinate,
    },
}

/// A validated latitude/longitude rectangle.
///
/// A box whose south-west longitude is greater than its north-east longitude crosses the
/// anti-meridian. The longitude span may not exceed 180 degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundingBoxInput", rename_all = "camelCase")]
pub struct BoundingBox {
    south_west: Coordinate,
    north_east: Coordinate,
}

impl BoundingBox {
    pub fn new(south_west: Coordinate, north_east: Coordinate) -> Result<BoundingBox> {
        for corner in &[south_west, north_east] {
            Coordinate::new(corner.lat, corner.lon)?;
        }
        if south_west.lat > north_east.lat {
            return Err(CoverError::InvertedLatitudes {
                south: south_west.lat,
                north: north_east.lat,
            });
        }
        let bounds = BoundingBox { south_west, north_east };
        let span = bounds.longitude_span();
        if south_west.lat == north_east.lat || span == 0.0 {
            return Err(CoverError::DegenerateBox);
        }
        if span > 180.0 {
            return Err(CoverError::SpanTooWide(span));
        }
        Ok(bounds)
    }

    /// Parse either accepted JSON shape, keeping validation errors distinct from syntax errors.
    pub fn from_json(json: &str) -> Result<BoundingBox> {
        let input: BoundingBoxInput = serde_json::from_str(json)?;
        BoundingBox::try_from(input)
    }

    pub fn south_west(&self) -> Coordinate {
        self.south_west
    }

    pub fn north_east(&self) -> Coordinate {
        self.north_east
    }

    pub fn north_west(&self) -> Coordinate {
        Coordinate { lat: self.north_east.lat, lon: self.south_west.lon }
    }

    pub fn south_east(&self) -> Coordinate {
        Coordinate { lat: self.south_west.lat, lon: self.north_east.lon }
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.south_west.lon > self.north_east.lon
    }

    /// Degrees of longitude covered going east from the west edge.
    pub fn longitude_span(&self) -> f64 {
        let span = self.north_east.lon - self.south_west.lon;
        if span < 0.0 {
            span + 360.0
        } else {
            span
        }
    }

    /// Lengths of the south edge (`x_axis`) and west edge (`y_axis`) on a sphere of given radius.
    pub fn distances(&self, radius: f64) -> Distances {
        Distances {
            x_axis: rhumb_distance(self.south_west, self.south_east(), radius),
            y_axis: rhumb_distance(self.south_west, self.north_west(), radius),
        }
    }

    /// Latitude of the parallel through the box closest to the equator, where a degree of
    /// longitude is longest.
    pub fn widest_parallel(&self) -> f64 {
        if self.south_west.lat > 0.0 {
            self.south_west.lat
        } else if self.north_east.lat < 0.0 {
            self.north_east.lat
        } else {
            0.0
        }
    }

    /// Half the rhumb-line diagonal, i.e. the radius of the smallest circle around `center`
    /// reaching both corners.
    pub fn half_diagonal(&self, radius: f64) -> f64 {
        rhumb_distance(self.south_west, self.north_east, radius) / 2.0
    }

    pub fn center(&self) -> Coordinate {
        rhumb_mid_point(self.south_west, self.north_east)
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = CoverError;

    fn try_from(corners: [f64; 4]) -> Result<BoundingBox> {
        let [sw_lat, sw_lon, ne_lat, ne_lon] = corners;
        BoundingBox::new(
            Coordinate { lat: sw_lat, lon: sw_lon },
            Coordinate { lat: ne_lat, lon: ne_lon },
        )
    }
}

impl TryFrom<BoundingBoxInput> for BoundingBox {
    type Error = CoverError;

    fn try_from(input: BoundingBoxInput) -> Result<BoundingBox> {
        match input {
            BoundingBoxInput::Corners(corners) => BoundingBox::try_from(corners),
            BoundingBoxInput::Object { south_west, north_east } => {
                BoundingBox::new(south_west, north_east)
            }
        }
    }
}

/// `geo` rectangles have x as longitude and y as latitude.
impl TryFrom<Rect<f64>> for BoundingBox {
    type Error = CoverError;

    fn try_from(rect: Rect<f64>) -> Result<BoundingBox> {
        let (min, max) = (rect.min(), rect.max());
        BoundingBox::new(Coordinate { lat: min.y, lon: min.x }, Coordinate { lat: max.y, lon: max.x })
    }
}

/// A search circle: center in degrees, radius in meters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Coordinate,
    pub radius: f64,
}

impl Circle {
    /// Whether `point` lies within the circle, measured along the rhumb line on a sphere of
    /// given radius.
    pub fn contains(&self, point: Coordinate, earth_radius: f64) -> bool {
        rhumb_distance(self.center, point, earth_radius) <= self.radius
    }

    /// Approximate the circle by a closed ring of `segments` points, projected clockwise from
    /// north along rhumb lines, so every ring point is on the boundary `contains` tests.
    pub fn to_polygon(&self, segments: usize, earth_radius: f64) -> Polygon<f64> {
        let segments = segments.max(3);
        let ring: Vec<(f64, f64)> = (0..segments)
            .map(|i| {
                let bearing = 360.0 * i as f64 / segments as f64;
                let p = destination_point(self.center, self.radius, bearing, earth_radius);
                (p.lon, p.lat)
            })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }
}

/// How a bounding box was covered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SingleCircle,
    Honeycomb,
}
