//! This is the documentation for the **verniersim** software package.
//!
//! Verniersim configures and drives an external electromagnetic FDTD solver to simulate
//! a photonic vernier filter built from two coupled ring resonators, then reduces and
//! renders the returned field data as a 2D color-mesh plot.
//!
//! The crate is organized as a thin, strictly sequential pipeline:
//! - [`entities`] / [`model`]: typed entity configurations assembled into a
//!   [`SimulationModel`](model::SimulationModel)
//! - [`solver`]: the session boundary to the external engine (plus a deterministic
//!   in-process stand-in)
//! - [`fields`] / [`analysis`]: extraction and reduction of the returned field samples
//! - [`plottable`]: color-mesh rendering of the reduced field
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod console;
pub mod entities;
pub mod error;
pub mod fields;
pub mod model;
pub mod plottable;
pub mod properties;
pub mod solver;
pub mod utils;

pub use model::SimulationModel;
