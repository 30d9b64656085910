//! Tracker Sim
//!
//! A headless software-in-the-loop host for the light tracker: simulated
//! vessels fly simple paths while scripted commands drive one or more
//! gimbal rigs through a scenario, one fixed-dt tick at a time.

pub mod rig;
pub mod scenario;
pub mod vessel;

pub use rig::{apply_to_group, LightRig};
pub use scenario::{Command, RunSummary, Scenario, ScheduledCommand};
pub use vessel::{FlightPath, Vessel};
