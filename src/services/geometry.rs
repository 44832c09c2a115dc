use serde_json::Value;
use tracing::warn;

use crate::error::{SavingsError, SavingsResult};
use crate::models::savings::{Coordinate, RawCoordinate};

/// Reduce a building footprint to one representative point: the arithmetic
/// mean of the vertices. A flat mean, not a geodesic centroid; approximate,
/// but fine for the small footprints this service deals with.
///
/// Vertices whose lat/lng don't parse as decimal numbers are skipped with a
/// data-quality warning; the mean is taken over the remaining valid points.
pub fn centroid(coordinates: &[RawCoordinate]) -> SavingsResult<Coordinate> {
    if coordinates.is_empty() {
        return Err(SavingsError::InvalidGeometry(
            "empty coordinate list".into(),
        ));
    }

    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut valid = 0usize;

    for coord in coordinates {
        match (as_decimal(&coord.lat), as_decimal(&coord.lng)) {
            (Some(lat), Some(lng)) => {
                sum_lat += lat;
                sum_lng += lng;
                valid += 1;
            }
            _ => warn!(
                lat = %coord.lat,
                lng = %coord.lng,
                "skipping non-numeric footprint vertex"
            ),
        }
    }

    if valid == 0 {
        return Err(SavingsError::InvalidGeometry(
            "no numeric coordinates in footprint".into(),
        ));
    }

    Ok(Coordinate {
        latitude: sum_lat / valid as f64,
        longitude: sum_lng / valid as f64,
    })
}

/// Lenient decimal parse: accepts JSON numbers and numeric strings,
/// rejects everything else (including non-finite results).
fn as_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
