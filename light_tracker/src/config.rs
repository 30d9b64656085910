//! Tracking configuration.
//!
//! All of the externally mutable settings for one tracking light: the track
//! mode, the tracking toggle, the rest policy, and the slew rate. The
//! controller reads these once per tick and never writes them itself.

use std::fmt;

use crate::{LightTrackerError, LightTrackerResult};

/// Which external reference supplies the aim point.
///
/// Declaration order is the cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackMode {
    /// Follow the entity the owning vessel has targeted.
    #[default]
    TargetVessel,
    /// Follow the currently active vessel.
    ActiveVessel,
}

impl TrackMode {
    /// Advance to the next mode, wrapping at the end of the list.
    pub fn next(self) -> TrackMode {
        match self {
            TrackMode::TargetVessel => TrackMode::ActiveVessel,
            TrackMode::ActiveVessel => TrackMode::TargetVessel,
        }
    }

    /// Raw index used when the host persists the mode.
    pub fn index(self) -> u8 {
        match self {
            TrackMode::TargetVessel => 0,
            TrackMode::ActiveVessel => 1,
        }
    }

    /// Restore a mode from a persisted raw index.
    ///
    /// # Errors
    /// Returns `LightTrackerError::InvalidConfiguration` if the index does
    /// not name a declared mode. This only happens when saved state is
    /// corrupted; cycling never leaves the declared set.
    pub fn from_index(index: u8) -> LightTrackerResult<TrackMode> {
        match index {
            0 => Ok(TrackMode::TargetVessel),
            1 => Ok(TrackMode::ActiveVessel),
            other => Err(LightTrackerError::InvalidConfiguration(format!(
                "unknown track mode index {other}"
            ))),
        }
    }
}

impl fmt::Display for TrackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackMode::TargetVessel => write!(f, "target vessel"),
            TrackMode::ActiveVessel => write!(f, "active vessel"),
        }
    }
}

/// Fallback aim attitude used when no target applies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RestPose {
    /// Yaw from the parent's forward axis, degrees.
    pub yaw_deg: f32,
    /// Pitch from the yawed forward axis, degrees. Positive tilts the beam
    /// down.
    pub pitch_deg: f32,
}

impl RestPose {
    pub fn new(yaw_deg: f32, pitch_deg: f32) -> RestPose {
        RestPose { yaw_deg, pitch_deg }
    }
}

/// Per-light tracking settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Whether the gimbal actively follows the resolved target.
    pub is_tracking: bool,
    /// Which external reference supplies the aim point.
    pub track_mode: TrackMode,
    /// Fall back to the rest pose when tracking but no target resolves.
    /// When false the gimbal freezes in place instead.
    pub rest_without_target: bool,
    /// Maximum slew rate, degrees per second.
    pub tracking_speed_deg_s: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            is_tracking: false,
            track_mode: TrackMode::TargetVessel,
            rest_without_target: false,
            tracking_speed_deg_s: 45.0,
        }
    }
}

impl TrackerConfig {
    /// Check that every field is usable by the per-tick pipeline.
    ///
    /// # Errors
    /// Returns `LightTrackerError::InvalidInput` if the tracking speed is
    /// not a finite non-negative value.
    pub fn validate(&self) -> LightTrackerResult<()> {
        if !self.tracking_speed_deg_s.is_finite() || self.tracking_speed_deg_s < 0.0 {
            return Err(LightTrackerError::InvalidInput(format!(
                "tracking speed must be finite and non-negative, got {}",
                self.tracking_speed_deg_s
            )));
        }
        Ok(())
    }

    /// Set the slew rate, rejecting values the pipeline cannot honor.
    ///
    /// # Errors
    /// Returns `LightTrackerError::InvalidInput` for NaN, infinite, or
    /// negative speeds.
    pub fn set_tracking_speed(&mut self, deg_per_s: f32) -> LightTrackerResult<()> {
        if !deg_per_s.is_finite() || deg_per_s < 0.0 {
            return Err(LightTrackerError::InvalidInput(format!(
                "tracking speed must be finite and non-negative, got {deg_per_s}"
            )));
        }
        self.tracking_speed_deg_s = deg_per_s;
        Ok(())
    }
}
