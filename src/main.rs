use clap::Parser;
use log::info;
use verniersim::analysis::{run_analysis, FieldAnalysis};
use verniersim::console::{Args, PartialArgs};
use verniersim::error::SimResult;
use verniersim::model::SimulationModel;
use verniersim::plottable::{PltBackEnd, Plottable};
use verniersim::solver::SyntheticEngine;

fn main() -> SimResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // parse CLI arguments
    let args = Args::try_from(PartialArgs::parse())?;

    // read the simulation model from file or fall back to the reference structure
    let model = match &args.model_path {
        Some(path) => {
            info!("reading model from {}", path.display());
            SimulationModel::from_file(path)?
        }
        None => SimulationModel::vernier_filter()?,
    };

    // run the pipeline against the bundled stand-in engine
    let analysis = FieldAnalysis::for_model(&model, args.monitor_kind)?;
    let mut engine = SyntheticEngine::new();
    let field_map = run_analysis(&model, &analysis, &mut engine)?;
    info!(
        "monitor {} reduced to a {}x{} field map, peak value {:.3e}",
        analysis.monitor(),
        field_map.distribution().nrows(),
        field_map.distribution().ncols(),
        field_map.peak()
    );

    // render the reduced field
    let backend = PltBackEnd::from_path(&args.plot_path)?;
    field_map.to_plot(&args.plot_path, backend)?;
    info!("field plot written to {}", args.plot_path.display());
    Ok(())
}
