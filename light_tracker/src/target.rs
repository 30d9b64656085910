//! Target resolution.
//!
//! Maps the configured track mode and the current vessel context to an
//! optional aim point. "No target" is an expected steady state here, never
//! an error: the gimbal simply has nothing to follow this tick.

use std::fmt;

use glam::Vec3;

use crate::config::TrackMode;

/// Opaque vessel identity assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VesselId(pub u32);

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vessel {}", self.0)
    }
}

/// A vessel reference with its world-space position already queried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselRef {
    pub id: VesselId,
    pub position: Vec3,
}

/// An entity some vessel has targeted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEntity {
    /// Vessel that owns the targeted entity.
    pub owner: VesselId,
    pub position: Vec3,
}

/// Resolve the world position the light should aim at, if any.
///
/// Pure function of its inputs:
/// - `ActiveVessel` mode yields the active vessel's position, unless we
///   *are* the active vessel or none exists.
/// - `TargetVessel` mode yields the targeted entity's position, unless the
///   target is owned by ourselves or nothing is targeted.
pub fn resolve_target(
    mode: TrackMode,
    self_vessel: VesselId,
    active_vessel: Option<&VesselRef>,
    target: Option<&TargetEntity>,
) -> Option<Vec3> {
    match mode {
        TrackMode::ActiveVessel => {
            let active = active_vessel?;
            if active.id == self_vessel {
                return None;
            }
            Some(active.position)
        }
        TrackMode::TargetVessel => {
            let target = target?;
            if target.owner == self_vessel {
                return None;
            }
            Some(target.position)
        }
    }
}
