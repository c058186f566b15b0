//! Workflow core for driver and guide onboarding.
//!
//! The crate owns the tiered document catalog, the in-progress application
//! aggregate, per-step validation, completion scoring, and the submission
//! orchestrator that persists a finished application through the external
//! profile, wallet, and media collaborators.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
