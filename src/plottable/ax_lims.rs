//! This module contains the [`AxLims`] struct, which is used to define the axis limits of a plot.
use approx::{abs_diff_ne, RelativeEq};
use log::warn;
use nalgebra::DVector;

/// Struct that holds the maximum and minimum values of an axis
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct AxLims {
    /// minimum value of the axis
    pub min: f64,
    /// maximum value of the axis
    pub max: f64,
}

impl AxLims {
    /// Creates a new [`AxLims`] struct.
    ///
    /// Returns `None` if the chosen minimum or maximum value is NaN or infinite or if
    /// the range would be empty.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Option<Self> {
        let axlim = Self { min, max };
        if axlim.check_validity() {
            Some(axlim)
        } else {
            warn!("Invalid axis limits. Must be finite and min < max. Use default");
            None
        }
    }

    /// Creates a new [`AxLims`] struct from a data vector, filtering out all non-finite
    /// values. Returns `None` if less than two finite entries remain.
    #[must_use]
    pub fn finite_from_dvector(dat_vec: &DVector<f64>) -> Option<Self> {
        let filtered_data: Vec<f64> = dat_vec.iter().copied().filter(|v| v.is_finite()).collect();
        if filtered_data.len() < 2 {
            warn!("Length of input data after filtering out non-finite values is below 2! Useful Axlims cannot be returned!");
            return None;
        }
        let min = filtered_data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = filtered_data
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Self::create_useful_axlims(min, max)
    }

    /// Checks the validity of the delivered min and max values.
    #[must_use]
    pub fn check_validity(self) -> bool {
        self.max.is_finite()
            && self.min.is_finite()
            && abs_diff_ne!(self.max, self.min)
            && self.max > self.min
    }

    /// This function creates an [`AxLims`] struct from the provided `min` and `max`
    /// values. If the criteria min < max (both finite) are not fulfilled, the values are
    /// adapted to still provide a valid, non-empty axis range.
    #[must_use]
    pub fn create_useful_axlims(min_in: f64, max_in: f64) -> Option<Self> {
        if !min_in.is_finite() && !max_in.is_finite() {
            return Self::new(-0.5, 0.5);
        }
        let (min, max) = if !min_in.is_finite() {
            (max_in, max_in)
        } else if !max_in.is_finite() {
            (min_in, min_in)
        } else {
            (min_in, max_in)
        };
        let (mut min, mut max) = if max < min { (max, min) } else { (min, max) };
        let mut ax_range = max - min;
        // approximately equal limits: use the magnitude itself as range
        if max.relative_eq(&min, f64::EPSILON, f64::EPSILON) {
            ax_range = max.abs();
            min = max - ax_range / 2.;
            max += ax_range * 0.5;
        }
        if ax_range < f64::EPSILON {
            max = 0.5;
            min = -0.5;
        }
        Self::new(min, max)
    }
}
