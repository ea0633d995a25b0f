#![warn(missing_docs)]
//! Trait for adding the possibility to generate a color-mesh plot of an element.

pub mod ax_lims;
pub use ax_lims::AxLims;

use crate::error::{SimResult, SimulationError};
use colorous::Gradient;
use nalgebra::{DMatrix, DVector};
use plotters::{
    backend::DrawingBackend,
    chart::{ChartBuilder, ChartContext, LabelAreaPosition},
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    element::Rectangle,
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
    style::{Color, IntoFont, RGBColor, WHITE},
};
use std::path::{Path, PathBuf};

/// width in pixels reserved for the colorbar on the right side of a color-mesh plot
const CBAR_AREA_WIDTH: u32 = 170;
const CBAR_STEPS: usize = 100;

/// Enum to describe which type of plotting backend should be used
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PltBackEnd {
    /// `BitMapBackend`. Used to create .png, .bmp, .jpg
    #[default]
    Bitmap,
    /// `SVGBackend`. Used to create .svg
    SVG,
}
impl PltBackEnd {
    /// Derive the backend from the extension of the given file path.
    ///
    /// # Errors
    ///
    /// This function will return an error for unsupported file extensions.
    pub fn from_path(path: &Path) -> SimResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("svg") => Ok(Self::SVG),
            Some("png" | "bmp" | "jpg" | "jpeg") => Ok(Self::Bitmap),
            _ => Err(SimulationError::Other(format!(
                "unsupported plot file extension: {}",
                path.display()
            ))),
        }
    }
}

/// Holds all necessary plot parameters.
#[derive(Debug, Clone)]
pub struct PlotParameters {
    x_label: String,
    y_label: String,
    cbar_label: String,
    size: (u32, u32),
    cmap: Gradient,
    backend: PltBackEnd,
    fpath: PathBuf,
}
impl Default for PlotParameters {
    fn default() -> Self {
        Self {
            x_label: "x".into(),
            y_label: "y".into(),
            cbar_label: "z value".into(),
            size: (800, 800),
            cmap: colorous::TURBO,
            backend: PltBackEnd::Bitmap,
            fpath: PathBuf::from("verniersim_plot.png"),
        }
    }
}
impl PlotParameters {
    /// Sets the x axis label.
    pub fn set_x_label(&mut self, label: &str) -> &mut Self {
        label.clone_into(&mut self.x_label);
        self
    }
    /// Sets the y axis label.
    pub fn set_y_label(&mut self, label: &str) -> &mut Self {
        label.clone_into(&mut self.y_label);
        self
    }
    /// Sets the colorbar label.
    pub fn set_cbar_label(&mut self, label: &str) -> &mut Self {
        label.clone_into(&mut self.cbar_label);
        self
    }
    /// Sets the figure size in pixels (width, height).
    pub fn set_size(&mut self, size: (u32, u32)) -> &mut Self {
        self.size = size;
        self
    }
    /// Sets the color gradient used for the mesh cells and the colorbar.
    pub fn set_cmap(&mut self, cmap: Gradient) -> &mut Self {
        self.cmap = cmap;
        self
    }
    /// Sets the plotting backend.
    pub fn set_backend(&mut self, backend: PltBackEnd) -> &mut Self {
        self.backend = backend;
        self
    }
    /// Sets the output file path.
    pub fn set_fpath(&mut self, fpath: &Path) -> &mut Self {
        self.fpath = fpath.to_path_buf();
        self
    }
    /// Checks if the configured output file extension fits the configured backend.
    ///
    /// # Errors
    ///
    /// This function will return an error on a backend / file extension mismatch.
    pub fn check_backend_file_ext_compatibility(&self) -> SimResult<()> {
        if PltBackEnd::from_path(&self.fpath)? == self.backend {
            Ok(())
        } else {
            Err(SimulationError::Other(format!(
                "plot backend does not fit file extension of {}",
                self.fpath.display()
            )))
        }
    }
}

/// Enum to define the data that can be plotted
#[derive(Debug, Clone)]
pub enum PlotData {
    /// Data to create a 2d colormesh plot. Vector with N entries for x, Vector with M
    /// entries for y and a Matrix with MxN entries for the colordata
    ColorMesh {
        /// xdata: Vector with `N` entries
        x_dat_n: DVector<f64>,
        /// ydata: Vector with `M` entries
        y_dat_m: DVector<f64>,
        /// zdata: Matrix with MxN entries for the color
        z_dat_mxn: DMatrix<f64>,
    },
}
impl PlotData {
    /// Creates a new [`PlotData::ColorMesh`] enum variant.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    /// - one of the axis vectors or the data matrix is empty
    /// - the shape of the data sets does not match
    pub fn new_colormesh(
        x_dat_n: DVector<f64>,
        y_dat_m: DVector<f64>,
        z_dat_mxn: DMatrix<f64>,
    ) -> SimResult<Self> {
        if x_dat_n.is_empty() || y_dat_m.is_empty() || z_dat_mxn.is_empty() {
            return Err(SimulationError::ShapeMismatch(
                "No data provided! Cannot create PlotData::ColorMesh!".into(),
            ));
        }
        if x_dat_n.len() != z_dat_mxn.ncols() || y_dat_m.len() != z_dat_mxn.nrows() {
            return Err(SimulationError::ShapeMismatch(
                "shape of x, y and z does not match! z must be x.len() columns and y.len() rows!"
                    .into(),
            ));
        }
        Ok(Self::ColorMesh {
            x_dat_n,
            y_dat_m,
            z_dat_mxn,
        })
    }
}

/// Enum to define the type of plot that should be created
#[derive(Debug)]
pub enum PlotType {
    /// 2D color plot of gridded data with color representing the amplitude over an x-y grid
    ColorMesh(PlotParameters),
}
impl PlotType {
    const fn get_plot_params(&self) -> &PlotParameters {
        match self {
            Self::ColorMesh(p) => p,
        }
    }
    /// This method creates a plot from the given [`PlotData`] and writes it to the file
    /// configured in the stored [`PlotParameters`].
    ///
    /// # Errors
    ///
    /// This method returns an error if
    /// - the configured backend does not fit the output file extension
    /// - the plot could not be rendered or written
    pub fn plot(&self, plt_data: &PlotData) -> SimResult<()> {
        let params = self.get_plot_params();
        params.check_backend_file_ext_compatibility()?;
        match params.backend {
            PltBackEnd::Bitmap => {
                let backend =
                    BitMapBackend::new(&params.fpath, params.size).into_drawing_area();
                self.create_plot(&backend, plt_data)
            }
            PltBackEnd::SVG => {
                let backend = SVGBackend::new(&params.fpath, params.size).into_drawing_area();
                self.create_plot(&backend, plt_data)
            }
        }
    }
    fn create_plot<B: DrawingBackend>(
        &self,
        root: &DrawingArea<B, Shift>,
        plt_data: &PlotData,
    ) -> SimResult<()> {
        root.fill(&WHITE).map_err(render_error)?;
        match self {
            Self::ColorMesh(params) => Self::plot_color_mesh(params, root, plt_data)?,
        }
        root.present().map_err(render_error)
    }
    fn plot_color_mesh<B: DrawingBackend>(
        params: &PlotParameters,
        root: &DrawingArea<B, Shift>,
        plt_data: &PlotData,
    ) -> SimResult<()> {
        let PlotData::ColorMesh {
            x_dat_n,
            y_dat_m,
            z_dat_mxn,
        } = plt_data;
        if x_dat_n.len() < 2 || y_dat_m.len() < 2 {
            return Err(SimulationError::Other(
                "color mesh needs at least two samples per axis".into(),
            ));
        }
        let x_bounds = AxLims::finite_from_dvector(x_dat_n).ok_or_else(invalid_bounds)?;
        let y_bounds = AxLims::finite_from_dvector(y_dat_m).ok_or_else(invalid_bounds)?;
        let z_min = z_dat_mxn.min();
        let z_max = z_dat_mxn.max();
        let z_bounds = AxLims::create_useful_axlims(z_min, z_max).ok_or_else(invalid_bounds)?;

        let split_pixel = params.size.0.saturating_sub(CBAR_AREA_WIDTH);
        // split root for main plot and colorbar
        let (main_root, cbar_root) = root.split_horizontally(split_pixel);
        Self::draw_colorbar(params, &cbar_root, z_bounds)?;

        let mut chart = ChartBuilder::on(&main_root)
            .margin(10)
            .margin_top(40)
            .set_label_area_size(LabelAreaPosition::Left, 110)
            .set_label_area_size(LabelAreaPosition::Bottom, 65)
            .build_cartesian_2d(x_bounds.min..x_bounds.max, y_bounds.min..y_bounds.max)
            .map_err(render_error)?;
        chart
            .configure_mesh()
            .x_labels(5)
            .y_labels(5)
            .x_desc(&params.x_label)
            .y_desc(&params.y_label)
            .label_style(("sans-serif", 20).into_font())
            .draw()
            .map_err(render_error)?;
        Self::draw_2d_colormesh(&mut chart, x_dat_n, y_dat_m, z_dat_mxn, &params.cmap, z_bounds)
    }
    fn draw_2d_colormesh<B: DrawingBackend>(
        chart: &mut ChartContext<'_, B, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        x_ax: &DVector<f64>,
        y_ax: &DVector<f64>,
        z_dat: &DMatrix<f64>,
        cmap: &Gradient,
        cbounds: AxLims,
    ) -> SimResult<()> {
        let nr_of_x = x_ax.len();
        let nr_of_y = y_ax.len();
        let z_range = cbounds.max - cbounds.min;
        let mut rect_vec = Vec::<Rectangle<(f64, f64)>>::with_capacity(nr_of_x * nr_of_y);
        for y_idx in 0..nr_of_y {
            let y_center = y_ax[y_idx];
            let y_dist = if y_idx == nr_of_y - 1 {
                y_ax[y_idx] - y_ax[y_idx - 1]
            } else {
                y_ax[y_idx + 1] - y_center
            };
            for x_idx in 0..nr_of_x {
                let x_center = x_ax[x_idx];
                let x_dist = if x_idx == nr_of_x - 1 {
                    x_ax[x_idx] - x_ax[x_idx - 1]
                } else {
                    x_ax[x_idx + 1] - x_center
                };
                let rel_value = ((z_dat[(y_idx, x_idx)] - cbounds.min) / z_range).clamp(0., 1.);
                let color = cmap.eval_continuous(rel_value);
                rect_vec.push(Rectangle::new(
                    [
                        (x_center - x_dist / 2., y_center + y_dist / 2.),
                        (x_center + x_dist / 2., y_center - y_dist / 2.),
                    ],
                    RGBColor(color.r, color.g, color.b).filled(),
                ));
            }
        }
        chart.draw_series(rect_vec).map_err(render_error)?;
        Ok(())
    }
    fn draw_colorbar<B: DrawingBackend>(
        params: &PlotParameters,
        root: &DrawingArea<B, Shift>,
        z_bounds: AxLims,
    ) -> SimResult<()> {
        let mut chart = ChartBuilder::on(root)
            .margin(30)
            .margin_top(40)
            .set_label_area_size(LabelAreaPosition::Right, 90)
            .build_cartesian_2d(0.0..1.0, z_bounds.min..z_bounds.max)
            .map_err(render_error)?;
        chart
            .configure_mesh()
            .disable_x_axis()
            .disable_mesh()
            .y_labels(5)
            .y_desc(&params.cbar_label)
            .label_style(("sans-serif", 20).into_font())
            .draw()
            .map_err(render_error)?;
        let step = (z_bounds.max - z_bounds.min) / CBAR_STEPS as f64;
        let rects = (0..CBAR_STEPS).map(|i| {
            let lower = z_bounds.min + i as f64 * step;
            let color = params.cmap.eval_continuous(i as f64 / (CBAR_STEPS - 1) as f64);
            Rectangle::new(
                [(0.0, lower), (1.0, lower + step)],
                RGBColor(color.r, color.g, color.b).filled(),
            )
        });
        chart.draw_series(rects).map_err(render_error)?;
        Ok(())
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> SimulationError {
    SimulationError::Other(format!("plot rendering failed: {e}"))
}
fn invalid_bounds() -> SimulationError {
    SimulationError::Other("cannot derive valid plot bounds from data".into())
}

/// Trait for adding the possibility to generate a plot of an element.
pub trait Plottable {
    /// This method sets element specific plot parameters (labels, size, ...).
    ///
    /// # Errors
    ///
    /// Whether an error is thrown depends on the individual implementation of the method
    fn add_plot_specific_params(&self, plt_params: &mut PlotParameters) -> SimResult<()>;
    /// This method returns the [`PlotType`] to be used for this element.
    fn get_plot_type(&self, plt_params: &PlotParameters) -> PlotType;
    /// This method retrieves the plot data of this element.
    ///
    /// # Errors
    ///
    /// Whether an error is thrown depends on the individual implementation of the method
    fn get_plot_data(&self) -> SimResult<PlotData>;
    /// This method handles the plot creation for a specific data type.
    ///
    /// # Errors
    ///
    /// This method returns an error if the plot data could not be assembled or the plot
    /// could not be rendered.
    fn to_plot(&self, f_path: &Path, backend: PltBackEnd) -> SimResult<()> {
        let mut plt_params = PlotParameters::default();
        plt_params.set_fpath(f_path).set_backend(backend);
        self.add_plot_specific_params(&mut plt_params)?;
        let plt_type = self.get_plot_type(&plt_params);
        let plt_data = self.get_plot_data()?;
        plt_type.plot(&plt_data)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;
    #[test]
    fn backend_from_path() {
        assert_eq!(
            PltBackEnd::from_path(Path::new("plot.svg")).unwrap(),
            PltBackEnd::SVG
        );
        assert_eq!(
            PltBackEnd::from_path(Path::new("plot.PNG")).unwrap(),
            PltBackEnd::Bitmap
        );
        assert!(PltBackEnd::from_path(Path::new("plot.pdf")).is_err());
        assert!(PltBackEnd::from_path(Path::new("plot")).is_err());
    }
    #[test]
    fn backend_file_ext_compatibility() {
        let mut params = PlotParameters::default();
        params.set_fpath(Path::new("plot.svg"));
        assert!(params.check_backend_file_ext_compatibility().is_err());
        params.set_backend(PltBackEnd::SVG);
        assert!(params.check_backend_file_ext_compatibility().is_ok());
    }
    #[test]
    fn new_colormesh() {
        let x = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let y = DVector::from_vec(vec![0.0, 1.0]);
        let z = DMatrix::from_element(2, 3, 1.0);
        assert!(PlotData::new_colormesh(x.clone(), y.clone(), z).is_ok());
        let z_wrong = DMatrix::from_element(3, 2, 1.0);
        assert_matches!(
            PlotData::new_colormesh(x.clone(), y.clone(), z_wrong),
            Err(SimulationError::ShapeMismatch(_))
        );
        let z_empty = DMatrix::from_element(0, 0, 1.0);
        assert_matches!(
            PlotData::new_colormesh(x, y, z_empty),
            Err(SimulationError::ShapeMismatch(_))
        );
    }
    #[test]
    fn colormesh_to_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.svg");
        let mut params = PlotParameters::default();
        params.set_fpath(&path).set_backend(PltBackEnd::SVG);
        let data = PlotData::new_colormesh(
            DVector::from_vec(vec![0.0, 1.0, 2.0]),
            DVector::from_vec(vec![0.0, 1.0]),
            DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]),
        )
        .unwrap();
        PlotType::ColorMesh(params).plot(&data).unwrap();
        assert!(path.exists());
    }
}
