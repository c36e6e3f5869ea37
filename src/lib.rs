//! Periodic-review inventory analysis comparing regional and national
//! warehouse configurations.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod demand;
pub mod error;
pub mod io;
pub mod logging;
pub mod reporting;
pub mod runner;

pub use error::AnalysisError;
