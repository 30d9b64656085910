//! Light Tracker
//!
//! A crate for aiming a two-axis tracking light at moving vessels.
//!
//! The gimbal is split into a base node that swings about the parent's up
//! axis and a light-can node that tilts about the base's right axis. Each
//! tick the controller resolves a target from the configured track mode,
//! picks a desired aim direction (target, rest pose, or none), and rotates
//! the pair toward it at a bounded angular rate.

use thiserror::Error;

pub mod config;
pub mod controller;
pub mod direction;
pub mod orient;
pub mod target;

pub use config::{RestPose, TrackMode, TrackerConfig};
pub use controller::{LightTracker, TickContext, TickOutcome, TrackerState, VesselContext};
pub use direction::{rest_direction, select_direction, ParentFrame};
pub use orient::{advance, look_rotation, rotate_towards, GimbalNodes, ALIGNMENT_EPSILON_DEG};
pub use target::{resolve_target, TargetEntity, VesselId, VesselRef};

/// Result type alias for light tracker operations.
pub type LightTrackerResult<T> = Result<T, LightTrackerError>;

/// Error types for light tracker operations.
#[derive(Error, Debug, Clone)]
pub enum LightTrackerError {
    #[error("InvalidConfiguration: {0}")]
    InvalidConfiguration(String),
    #[error("InvalidInput: {0}")]
    InvalidInput(String),
}
