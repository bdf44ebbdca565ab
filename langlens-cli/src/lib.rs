//! CLI library for testing purposes

pub mod config;
pub mod table;
pub mod validation;

pub use config::{CliOverrides, Config};
pub use langlens::{AnalysisOptions, WorldStore};
pub use validation::Target;
