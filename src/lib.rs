pub mod acquisition;
pub mod config;
pub mod dataset;
pub mod display;
pub mod error;
pub mod experiment;
pub mod sequencer;
pub mod utils;

pub use error::{ExperimentError, Result};
