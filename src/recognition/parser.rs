//! Extraction of plate detections from a recognition response.

use super::types::Detection;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Extract detections from `plate.results`.
///
/// A missing, `null` or empty results list yields no detections. Each entry
/// must carry `plate`, `confidence` and `coordinates`; an entry without them
/// fails the whole response. Order is preserved.
pub fn parse_detections(response: &Value) -> Result<Vec<Detection>> {
    let results = match response.get("plate").and_then(|plate| plate.get("results")) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(results)) => results,
        Some(other) => {
            warn!("Ignoring non-array plate.results: {other}");
            return Ok(Vec::new());
        }
    };

    let detections = results
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Detection::deserialize(entry).map_err(|source| Error::MalformedResponse { index, source })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} detection(s)", detections.len());
    Ok(detections)
}
