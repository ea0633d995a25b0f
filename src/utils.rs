//! Small numeric helper functions shared across the crate.
use crate::error::{SimResult, SimulationError};
use log::warn;
use ndarray::Array1;

/// Creates a linearly spaced array with `num` elements from `start` to `end` (inclusive).
///
/// # Errors
///
/// This function will return an error if `start` or `end` are not finite.
pub fn linspace(start: f64, end: f64, num: usize) -> SimResult<Array1<f64>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(SimulationError::Other(
            "start and end values must be finite!".into(),
        ));
    }
    if num < 2 {
        warn!("Using linspace with less than two elements results in an empty array for num=0 or a single entry being num=start");
        return Ok(Array1::from_elem(num, start));
    }
    let bin_size = (end - start) / (num - 1) as f64;
    Ok(Array1::from_iter(
        (0..num).map(|step| start + step as f64 * bin_size),
    ))
}
