//! Handling the verniersim CLI
//!
//! This module handles the command line parsing and validation of the given arguments.
use crate::{
    entities::MonitorKind,
    error::{SimResult, SimulationError},
    plottable::PltBackEnd,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Validated command line arguments for the verniersim application.
#[derive(Debug)]
pub struct Args {
    /// file path of the simulation model to read in; `None` selects the built-in
    /// vernier filter reference model
    pub model_path: Option<PathBuf>,

    /// analysis variant that should be used to reduce the monitor data
    pub monitor_kind: MonitorKind,

    /// destination file of the rendered field plot
    pub plot_path: PathBuf,
}

/// Raw command line arguments as parsed by clap.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// filepath of the simulation model (YAML) to read in. The built-in vernier filter
    /// model is used if omitted
    #[arg(short, long)]
    model_file: Option<String>,

    /// analysis variant: "profile" (per-component field magnitude) or "power"
    /// (aggregate magnitude)
    #[arg(short, long, default_value = "profile")]
    analysis: String,

    /// destination file of the field plot (.svg, .png, .bmp or .jpg)
    #[arg(short, long, default_value = "field_profile.svg")]
    plot_file: String,
}

/// Checks if the passed model file path is valid.
fn model_path_is_valid(path: &Path) -> bool {
    Path::exists(path)
        && Path::is_file(path)
        && matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        )
}

impl TryFrom<PartialArgs> for Args {
    type Error = SimulationError;

    fn try_from(part_args: PartialArgs) -> SimResult<Self> {
        let model_path = match part_args.model_file {
            Some(file) => {
                let path = PathBuf::from(&file);
                if !model_path_is_valid(&path) {
                    return Err(SimulationError::Console(format!(
                        "{file} is no readable model file (expected an existing .yaml/.yml file)"
                    )));
                }
                Some(path)
            }
            None => None,
        };
        let monitor_kind = MonitorKind::from_str(&part_args.analysis).map_err(|_| {
            SimulationError::Console(format!(
                "unknown analysis variant {} (expected profile or power)",
                part_args.analysis
            ))
        })?;
        let plot_path = PathBuf::from(&part_args.plot_file);
        PltBackEnd::from_path(&plot_path).map_err(|_| {
            SimulationError::Console(format!(
                "{} is no supported plot file (expected .svg, .png, .bmp or .jpg)",
                part_args.plot_file
            ))
        })?;
        Ok(Self {
            model_path,
            monitor_kind,
            plot_path,
        })
    }
}
