//! Field extraction and reduction.
//!
//! Transforms the raw per-axis and per-component arrays retrieved from a solver into a
//! plot-ready 2D scalar field: nearest-frequency lookup, plane slicing, Euclidean
//! magnitude and coordinate meshing. All reductions are strict about shapes; a mismatch
//! aborts with [`SimulationError::ShapeMismatch`] instead of silently truncating.
use crate::error::{SimResult, SimulationError};
use crate::plottable::{PlotData, PlotParameters, PlotType, Plottable};
use nalgebra::{DMatrix, DVector};
use ndarray::{s, Array1, Array2, Array4};
use num::complex::Complex64;

/// Locate the index on a frequency axis whose value is closest to `target` (in Hz).
///
/// Ties are broken towards the first minimal index (standard argmin semantics).
///
/// # Errors
///
/// This function will return an error if the axis is empty.
pub fn nearest_index(frequency_axis: &Array1<f64>, target: f64) -> SimResult<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in frequency_axis.iter().enumerate() {
        let distance = (value - target).abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx).ok_or_else(|| {
        SimulationError::Other("cannot search an empty frequency axis".into())
    })
}

/// Slice a 4D field sample (x, y, z, frequency) at a fixed out-of-plane index and a
/// fixed frequency index, yielding a 2D slice.
///
/// # Errors
///
/// This function will return an error if one of the indices is out of range.
pub fn plane_slice<T: Clone>(
    field: &Array4<T>,
    z_index: usize,
    frequency_index: usize,
) -> SimResult<Array2<T>> {
    let (_, _, nr_of_z, nr_of_freqs) = field.dim();
    if z_index >= nr_of_z || frequency_index >= nr_of_freqs {
        return Err(SimulationError::ShapeMismatch(format!(
            "slice indices (z {z_index}, f {frequency_index}) out of range for field of shape {:?}",
            field.dim()
        )));
    }
    Ok(field.slice(s![.., .., z_index, frequency_index]).to_owned())
}

/// Compute the per-cell Euclidean magnitude of two same-shaped complex field slices:
/// `sqrt(|a|² + |b|²)`. Phase information is discarded.
///
/// # Errors
///
/// This function will return an error if the shapes of the two slices differ.
pub fn magnitude(a: &Array2<Complex64>, b: &Array2<Complex64>) -> SimResult<Array2<f64>> {
    if a.dim() != b.dim() {
        return Err(SimulationError::ShapeMismatch(format!(
            "field component shapes {:?} and {:?} differ",
            a.dim(),
            b.dim()
        )));
    }
    let sum = a.mapv(|c| c.norm_sqr()) + b.mapv(|c| c.norm_sqr());
    Ok(sum.mapv(f64::sqrt))
}

/// Broadcast two 1D axis arrays into a 2D coordinate mesh (outer-product expansion).
///
/// For `x` of length n and `y` of length m, both returned matrices have shape (m, n)
/// with `mesh_x[(i, j)] = x[j]` and `mesh_y[(i, j)] = y[i]`.
///
/// # Errors
///
/// This function will return an error if one of the axes is empty.
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> SimResult<(DMatrix<f64>, DMatrix<f64>)> {
    if x.is_empty() || y.is_empty() {
        return Err(SimulationError::ShapeMismatch(
            "cannot mesh empty axis arrays".into(),
        ));
    }
    let mesh_x = DMatrix::from_fn(y.len(), x.len(), |_, col| x[col]);
    let mesh_y = DMatrix::from_fn(y.len(), x.len(), |row, _| y[row]);
    Ok((mesh_x, mesh_y))
}

/// A reduced 2D scalar field together with its axis coordinates.
///
/// Rows follow the y axis, columns the x axis (mesh-grid convention).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    distribution: DMatrix<f64>,
    x_data: DVector<f64>,
    y_data: DVector<f64>,
}

impl FieldMap {
    /// Builds a [`FieldMap`] from monitor axis arrays and reduced field values.
    ///
    /// The values are reinterpreted in row-major order into the (y.len(), x.len())
    /// coordinate mesh, mirroring the native monitor sample ordering.
    ///
    /// # Errors
    ///
    /// This function will return an error if the number of values does not exactly match
    /// the mesh size. The map is never truncated or padded.
    pub fn new(x: &Array1<f64>, y: &Array1<f64>, values: &Array2<f64>) -> SimResult<Self> {
        let (mesh_x, mesh_y) = meshgrid(x, y)?;
        if values.len() != mesh_x.len() {
            return Err(SimulationError::ShapeMismatch(format!(
                "cannot reshape {} field values onto a {}x{} coordinate mesh",
                values.len(),
                mesh_x.nrows(),
                mesh_x.ncols()
            )));
        }
        let distribution =
            DMatrix::from_row_iterator(mesh_x.nrows(), mesh_x.ncols(), values.iter().copied());
        if distribution.shape() != mesh_x.shape() || distribution.shape() != mesh_y.shape() {
            return Err(SimulationError::ShapeMismatch(format!(
                "reduced field shape {:?} does not match coordinate mesh shape {:?}",
                distribution.shape(),
                mesh_x.shape()
            )));
        }
        Ok(Self {
            distribution,
            x_data: DVector::from_iterator(x.len(), x.iter().copied()),
            y_data: DVector::from_iterator(y.len(), y.iter().copied()),
        })
    }
    /// Returns the peak value of the map.
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.distribution.max()
    }
    /// Returns the 2D field distribution (rows = y, columns = x).
    #[must_use]
    pub const fn distribution(&self) -> &DMatrix<f64> {
        &self.distribution
    }
    /// Returns the x coordinates of the distribution.
    #[must_use]
    pub const fn x_data(&self) -> &DVector<f64> {
        &self.x_data
    }
    /// Returns the y coordinates of the distribution.
    #[must_use]
    pub const fn y_data(&self) -> &DVector<f64> {
        &self.y_data
    }
}

impl Plottable for FieldMap {
    fn add_plot_specific_params(&self, plt_params: &mut PlotParameters) -> SimResult<()> {
        plt_params
            .set_x_label("x position (m)")
            .set_y_label("y position (m)")
            .set_cbar_label("electric field (a.u.)");
        Ok(())
    }
    fn get_plot_type(&self, plt_params: &PlotParameters) -> PlotType {
        PlotType::ColorMesh(plt_params.clone())
    }
    fn get_plot_data(&self) -> SimResult<PlotData> {
        PlotData::new_colormesh(
            self.x_data.clone(),
            self.y_data.clone(),
            self.distribution.clone(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use ndarray::array;

    #[test]
    fn nearest_index_scenario() {
        // frequency axis [100, 200, 300] THz, center 210 THz -> 200 THz wins
        let f = array![100.0e12, 200.0e12, 300.0e12];
        assert_eq!(nearest_index(&f, 210.0e12).unwrap(), 1);
    }
    #[test]
    fn nearest_index_minimality() {
        let f = array![1.0, 5.0, 2.0, 8.0, 2.5];
        let idx = nearest_index(&f, 2.2).unwrap();
        for j in 0..f.len() {
            assert!((f[idx] - 2.2).abs() <= (f[j] - 2.2).abs());
        }
        assert_eq!(idx, 2);
    }
    #[test]
    fn nearest_index_tie_breaks_first() {
        let f = array![1.0, 3.0];
        assert_eq!(nearest_index(&f, 2.0).unwrap(), 0);
    }
    #[test]
    fn nearest_index_empty() {
        let f = Array1::<f64>::zeros(0);
        assert!(nearest_index(&f, 1.0).is_err());
    }
    #[test]
    fn plane_slice_picks_plane() {
        let mut field = Array4::<Complex64>::zeros((2, 3, 1, 4));
        field[[1, 2, 0, 3]] = Complex64::new(1.0, -2.0);
        let slice = plane_slice(&field, 0, 3).unwrap();
        assert_eq!(slice.dim(), (2, 3));
        assert_relative_eq!(slice[[1, 2]].re, 1.0);
        assert_relative_eq!(slice[[1, 2]].im, -2.0);
    }
    #[test]
    fn plane_slice_out_of_range() {
        let field = Array4::<Complex64>::zeros((2, 3, 1, 4));
        assert_matches!(
            plane_slice(&field, 1, 0),
            Err(SimulationError::ShapeMismatch(_))
        );
        assert_matches!(
            plane_slice(&field, 0, 4),
            Err(SimulationError::ShapeMismatch(_))
        );
    }
    #[test]
    fn magnitude_formula() {
        let a = array![[Complex64::new(3.0, 0.0), Complex64::new(0.0, 1.0)]];
        let b = array![[Complex64::new(0.0, 4.0), Complex64::new(0.0, 0.0)]];
        let m = magnitude(&a, &b).unwrap();
        assert_relative_eq!(m[[0, 0]], 5.0);
        assert_relative_eq!(m[[0, 1]], 1.0);
        assert!(m.iter().all(|v| *v >= 0.0));
    }
    #[test]
    fn magnitude_shape_mismatch() {
        let a = Array2::<Complex64>::zeros((2, 2));
        let b = Array2::<Complex64>::zeros((2, 3));
        assert_matches!(magnitude(&a, &b), Err(SimulationError::ShapeMismatch(_)));
    }
    #[test]
    fn meshgrid_shapes() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0];
        let (mesh_x, mesh_y) = meshgrid(&x, &y).unwrap();
        assert_eq!(mesh_x.shape(), (2, 3));
        assert_eq!(mesh_y.shape(), (2, 3));
        assert_relative_eq!(mesh_x[(0, 2)], 2.0);
        assert_relative_eq!(mesh_x[(1, 2)], 2.0);
        assert_relative_eq!(mesh_y[(1, 0)], 1.0);
        assert_relative_eq!(mesh_y[(1, 2)], 1.0);
    }
    #[test]
    fn meshgrid_empty_axis() {
        let x = Array1::<f64>::zeros(0);
        let y = array![0.0, 1.0];
        assert_matches!(meshgrid(&x, &y), Err(SimulationError::ShapeMismatch(_)));
    }
    #[test]
    fn field_map_row_major_reshape() {
        // 6 flat values in native monitor order land row-major on a (2, 3) mesh
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0];
        let values = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let map = FieldMap::new(&x, &y, &values).unwrap();
        assert_eq!(map.distribution().shape(), (2, 3));
        assert_relative_eq!(map.distribution()[(0, 0)], 1.0);
        assert_relative_eq!(map.distribution()[(0, 1)], 2.0);
        assert_relative_eq!(map.distribution()[(0, 2)], 3.0);
        assert_relative_eq!(map.distribution()[(1, 0)], 4.0);
        assert_relative_eq!(map.distribution()[(1, 2)], 6.0);
        assert_relative_eq!(map.peak(), 6.0);
    }
    #[test]
    fn field_map_size_mismatch() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0];
        let values = Array2::<f64>::zeros((2, 2));
        assert_matches!(
            FieldMap::new(&x, &y, &values),
            Err(SimulationError::ShapeMismatch(_))
        );
    }
}
