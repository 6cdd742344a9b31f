/// Reasons a bounding box or a coverage request is rejected.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    #[error("Latitude {0} not in range -90.0..=90.0")]
    InvalidLatitude(f64),

    #[error("Longitude {0} not in range -180.0..=180.0")]
    InvalidLongitude(f64),

    #[error("Radius {0} must be a positive finite number of meters")]
    InvalidRadius(f64),

    #[error("South-west latitude {south} is north of north-east latitude {north}")]
    InvertedLatitudes { south: f64, north: f64 },

    #[error("Bounding box has zero area")]
    DegenerateBox,

    #[error("Longitude span of {0} degrees exceeds 180 degrees")]
    SpanTooWide(f64),

    #[error("Covering needs {count:.0} circles, more than the limit of {limit}")]
    TooManyCircles { count: f64, limit: usize },

    #[error("Malformed bounding box: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoverError>;
