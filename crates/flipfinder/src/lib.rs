//! Lead valuation and prioritization for fix-and-flip acquisition pipelines.
//!
//! The [`leads`] module holds the rule-based engines (priority scoring, ARV
//! prediction, neighborhood analysis, deal economics) together with the
//! collaborator seams the service layer plugs into.

pub mod config;
pub mod error;
pub mod leads;
pub mod telemetry;
