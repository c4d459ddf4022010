//! Recruitment tracking core: positions, the candidate funnel, dashboard KPIs, and report export.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
