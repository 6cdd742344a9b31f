//! Cover a geographic bounding box with a small set of circles, e.g. to split a large area
//! into several "search within radius" requests.
//!
//! Small boxes are covered by one circle around their rhumb-line midpoint. Larger boxes get a
//! honeycomb (hexagonal packing) of circles of the maximum radius, anchored on the south-west
//! corner.
//!
//! ```no_run
//! use std::convert::TryFrom;
//! use geocover::{cover, BoundingBox};
//!
//! let bounds = BoundingBox::try_from([0.0, 0.0, 10.0, 10.0]).unwrap();
//! for circle in cover(&bounds, 300_000.0).unwrap() {
//!     println!("{} {} {}", circle.center.lat, circle.center.lon, circle.radius);
//! }
//! ```
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use geojson::GeoJson;
use rayon::prelude::*;

mod error;
mod honeycomb;
mod types;
pub mod util;

pub use error::{CoverError, Result};
pub use honeycomb::hexagonal_cells;
pub use types::*;
use util::{circles_to_geojson, EARTH_RADIUS};

/// Planner settings. Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverOptions {
    /// Radius in meters of the sphere all distances and projections are computed on.
    pub earth_radius: f64,
    /// Largest honeycomb a single box may produce.
    pub max_circles: usize,
}

/// Default cap on the circles covering one box.
pub const MAX_CIRCLES: usize = 100_000;

impl Default for CoverOptions {
    fn default() -> CoverOptions {
        CoverOptions { earth_radius: EARTH_RADIUS, max_circles: MAX_CIRCLES }
    }
}

#[inline]
fn check_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(CoverError::InvalidRadius(radius))
    }
}

/// `Planner` chooses between a single circle and a honeycomb for each bounding box.
#[derive(Debug, Copy, Clone)]
pub struct Planner {
    earth_radius: f64,
    max_circles: usize,
}

impl Default for Planner {
    fn default() -> Planner {
        Planner { earth_radius: EARTH_RADIUS, max_circles: MAX_CIRCLES }
    }
}

impl Planner {
    pub fn new(options: CoverOptions) -> Result<Planner> {
        let earth_radius = check_radius(options.earth_radius)?;
        Ok(Planner { earth_radius, max_circles: options.max_circles })
    }

    pub fn earth_radius(&self) -> f64 {
        self.earth_radius
    }

    pub fn max_circles(&self) -> usize {
        self.max_circles
    }

    /// Cover the bounding box with circles of at most `max_radius` meters. If half the box
    /// diagonal is below `max_radius`, a single circle of exactly that size is enough.
    /// Fails with `TooManyCircles` rather than allocating a honeycomb above the planner's cap.
    pub fn plan(&self, bounds: &BoundingBox, max_radius: f64) -> Result<Coverage> {
        let max_radius = check_radius(max_radius)?;
        let half_diagonal = bounds.half_diagonal(self.earth_radius);

        if half_diagonal < max_radius {
            let center = bounds.center();
            debug!("single circle of {:.0} m at ({}, {})", half_diagonal, center.lat, center.lon);
            return Ok(Coverage {
                strategy: Strategy::SingleCircle,
                bounds: *bounds,
                circles: vec![Circle { center, radius: half_diagonal }],
            });
        }

        let circles =
            honeycomb::honeycomb(bounds, max_radius, self.earth_radius, self.max_circles)?;
        debug!("{} circles of {:.0} m cover {:?}", circles.len(), max_radius, bounds);
        Ok(Coverage { strategy: Strategy::Honeycomb, bounds: *bounds, circles })
    }

    pub fn cover(&self, bounds: &BoundingBox, max_radius: f64) -> Result<Vec<Circle>> {
        self.plan(bounds, max_radius).map(Coverage::into_circles)
    }

    /// Plan several independent bounding boxes in parallel. Output order follows input order.
    pub fn cover_many(&self, bounds: &[BoundingBox], max_radius: f64) -> Result<Vec<Coverage>> {
        bounds.par_iter().map(|b| self.plan(b, max_radius)).collect()
    }
}

/// Cover the bounding box with circles of at most `max_radius` meters on the default sphere.
pub fn cover(bounds: &BoundingBox, max_radius: f64) -> Result<Vec<Circle>> {
    Planner::default().cover(bounds, max_radius)
}

/// The circles covering one bounding box, and how they were laid out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    pub strategy: Strategy,
    pub bounds: BoundingBox,
    pub circles: Vec<Circle>,
}

impl Coverage {
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Circle> {
        self.circles.iter()
    }

    pub fn into_circles(self) -> Vec<Circle> {
        self.circles
    }

    /// Circle centers as GeoJSON points with a `radius` property, bbox set to the bounds.
    pub fn to_geojson(&self) -> GeoJson {
        circles_to_geojson(&self.circles, Some(&self.bounds))
    }
}

impl IntoIterator for Coverage {
    type Item = Circle;
    type IntoIter = std::vec::IntoIter<Circle>;

    fn into_iter(self) -> Self::IntoIter {
        self.circles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Coverage {
    type Item = &'a Circle;
    type IntoIter = std::slice::Iter<'a, Circle>;

    fn into_iter(self) -> Self::IntoIter {
        self.circles.iter()
    }
}
