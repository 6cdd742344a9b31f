use crate::error::{CoverError, Result};
use crate::types::{BoundingBox, Circle, Coordinate};
use crate::util::{destination_point, rhumb_distance};

/// Bearings in degrees.
const NORTH: f64 = 0.0;
const EAST: f64 = 90.0;

/// Distance between the centers of two neighboring columns. Circles only land on every other
/// column of a row, so circles of the same row are `radius * sqrt(3)` apart.
#[inline]
fn column_step(radius: f64) -> f64 {
    radius * 3f64.sqrt() / 2.0
}

/// Distance between the centers of two neighboring rows.
#[inline]
fn row_step(radius: f64) -> f64 {
    1.5 * radius
}

/// Latitude of every row, starting half a radius north of the south edge.
fn latitudes(south_west: Coordinate, rows: usize, radius: f64, earth_radius: f64) -> Vec<f64> {
    let step = row_step(radius);
    (0..rows)
        .map(|row| {
            let distance = step * row as f64 + radius / 2.0;
            let lat = destination_point(south_west, distance, NORTH, earth_radius).lat;
            trace!("row {} at latitude {}", row, lat);
            lat
        })
        .collect()
}

/// Longitude of every column, starting on the west edge of `parallel`.
fn longitudes(parallel: Coordinate, columns: usize, radius: f64, earth_radius: f64) -> Vec<f64> {
    let step = column_step(radius);
    (0..columns)
        .map(|column| destination_point(parallel, step * column as f64, EAST, earth_radius).lon)
        .collect()
}

/// Number of cells `hexagonal_cells` yields, computed without iterating.
fn cell_count(rows: f64, columns: f64) -> f64 {
    (rows / 2.0).ceil() * (columns / 2.0).ceil() + (rows / 2.0).floor() * (columns / 2.0).floor()
}

/// Grid cells occupied by a hexagonal packing of `rows` by `columns`: each row keeps the
/// columns whose parity matches its own, so odd rows sit half a circle to the east.
/// All even rows come first, then all odd rows, each in row-major order.
pub fn hexagonal_cells(rows: usize, columns: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..2).flat_map(move |parity| {
        (parity..rows)
            .step_by(2)
            .flat_map(move |row| (parity..columns).step_by(2).map(move |column| (row, column)))
    })
}

/// Cover the bounding box with a honeycomb of circles of the given radius, anchored on its
/// south-west corner. Fails if more than `max_circles` circles would be needed.
///
/// Columns are spaced along the parallel closest to the equator, where the box is widest, so
/// rows nearer a pole only bring their circles closer together.
pub fn honeycomb(
    bounds: &BoundingBox,
    radius: f64,
    earth_radius: f64,
    max_circles: usize,
) -> Result<Vec<Circle>> {
    let height = bounds.distances(earth_radius).y_axis;
    let parallel = Coordinate { lat: bounds.widest_parallel(), lon: bounds.south_west().lon };
    let east = Coordinate { lat: parallel.lat, lon: bounds.north_east().lon };
    let width = rhumb_distance(parallel, east, earth_radius);

    let rows = (height / row_step(radius)).ceil();
    let columns = (width / column_step(radius)).ceil();
    let count = cell_count(rows, columns);
    if count > max_circles as f64 {
        return Err(CoverError::TooManyCircles { count, limit: max_circles });
    }
    debug!(
        "honeycomb of {} rows by {} columns for {:.0} x {:.0} m",
        rows, columns, width, height
    );

    let latitudes = latitudes(bounds.south_west(), rows as usize, radius, earth_radius);
    let longitudes = longitudes(parallel, columns as usize, radius, earth_radius);
    Ok(hexagonal_cells(latitudes.len(), longitudes.len())
        .map(|(row, column)| Circle {
            center: Coordinate { lat: latitudes[row], lon: longitudes[column] },
            radius,
        })
        .collect())
}
