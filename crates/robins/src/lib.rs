//! Risk-of-bias assessment engine for non-randomised study outcomes,
//! following the ROBINS-I V2 instrument.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
