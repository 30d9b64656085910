//! Per-tick tracking pipeline and the external command surface.
//!
//! `LightTracker` owns the configuration and rest pose for one light and
//! runs the resolve → select → orient pipeline once per host tick. The
//! gimbal's orientation itself lives in the host-owned [`GimbalNodes`];
//! the tracker holds no other state between ticks.

use glam::Vec3;
use log::{debug, info};

use crate::config::{RestPose, TrackerConfig};
use crate::direction::{select_direction, ParentFrame};
use crate::orient::{
    look_rotation, rotate_towards, GimbalNodes, ALIGNMENT_EPSILON_DEG, MIN_DIRECTION_LENGTH_SQ,
};
use crate::target::{resolve_target, TargetEntity, VesselId, VesselRef};
use crate::LightTrackerResult;

/// Vessel context for one tick: who we are and what can be aimed at.
#[derive(Debug, Clone, Copy)]
pub struct VesselContext {
    /// Vessel the light is mounted on.
    pub self_vessel: VesselId,
    /// The currently active vessel, if any.
    pub active_vessel: Option<VesselRef>,
    /// The entity our vessel has targeted, if any.
    pub target: Option<TargetEntity>,
}

/// Everything the host hands the tracker for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Wall time elapsed since the previous tick, seconds.
    pub dt_seconds: f32,
    /// World-space basis of the gimbal's mounting frame.
    pub frame: ParentFrame,
    /// World-space position of the light can tip.
    pub tip_position: Vec3,
    /// Present once the part is attached to a movable entity; `None` makes
    /// the tick a no-op.
    pub vessel: Option<VesselContext>,
}

/// Derived pipeline state after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No desired direction this tick; orientation was left untouched.
    Idle,
    /// Rotating toward the desired direction, not yet aligned.
    Seeking,
    /// Remaining angular error within [`ALIGNMENT_EPSILON_DEG`].
    Aligned,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct TickOutcome {
    pub state: TrackerState,
    /// Angle still separating the aim from the desired direction, degrees.
    /// Zero whenever the tick had no desired direction.
    pub error_deg: f32,
}

impl TickOutcome {
    fn idle() -> TickOutcome {
        TickOutcome {
            state: TrackerState::Idle,
            error_deg: 0.0,
        }
    }
}

/// The tracking controller for a single light.
#[derive(Debug, Clone, Default)]
pub struct LightTracker {
    config: TrackerConfig,
    rest_pose: RestPose,
}

impl LightTracker {
    /// A tracker with default configuration: tracking off, target-vessel
    /// mode, zero rest pose, 45°/s.
    pub fn new() -> LightTracker {
        LightTracker::default()
    }

    /// A tracker with explicit configuration.
    ///
    /// # Errors
    /// Returns `LightTrackerError::InvalidInput` if the configuration does
    /// not validate.
    pub fn with_config(config: TrackerConfig, rest_pose: RestPose) -> LightTrackerResult<LightTracker> {
        config.validate()?;
        Ok(LightTracker { config, rest_pose })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn rest_pose(&self) -> RestPose {
        self.rest_pose
    }

    pub fn set_rest_pose(&mut self, pose: RestPose) {
        self.rest_pose = pose;
    }

    /// Apply one configuration mutation and revalidate the result.
    ///
    /// This is the single entry point for host-driven settings changes:
    /// mutate, then check, instead of wiring a change callback onto every
    /// field. An invalid mutation is rolled back.
    ///
    /// # Errors
    /// Returns the validation error and leaves the previous configuration
    /// in place.
    pub fn apply_config(
        &mut self,
        mutate: impl FnOnce(&mut TrackerConfig),
    ) -> LightTrackerResult<()> {
        let previous = self.config;
        mutate(&mut self.config);
        if let Err(err) = self.config.validate() {
            self.config = previous;
            return Err(err);
        }
        debug!("config applied: {:?}", self.config);
        Ok(())
    }

    /// Toggle tracking on or off.
    pub fn toggle_tracking(&mut self) {
        self.config.is_tracking = !self.config.is_tracking;
        info!(
            "tracking {}",
            if self.config.is_tracking { "enabled" } else { "disabled" }
        );
    }

    /// Cycle to the next track mode, wrapping at the end of the list.
    pub fn cycle_track_mode(&mut self) {
        self.config.track_mode = self.config.track_mode.next();
        info!("targeting: {}", self.config.track_mode);
    }

    /// Toggle the rest-without-target policy.
    pub fn toggle_rest_without_target(&mut self) {
        self.config.rest_without_target = !self.config.rest_without_target;
        info!(
            "rest without target {}",
            if self.config.rest_without_target { "enabled" } else { "disabled" }
        );
    }

    /// Run the pipeline once: resolve a target, select a desired direction,
    /// rotate the nodes toward it by at most `tracking_speed * dt` degrees.
    ///
    /// Ticks with no vessel context, no desired direction, or a degenerate
    /// direction leave the nodes bit-for-bit untouched.
    pub fn tick(&self, ctx: &TickContext, nodes: &mut GimbalNodes) -> TickOutcome {
        // Not attached to a movable entity yet.
        let Some(vessel) = ctx.vessel else {
            return TickOutcome::idle();
        };

        let resolved = resolve_target(
            self.config.track_mode,
            vessel.self_vessel,
            vessel.active_vessel.as_ref(),
            vessel.target.as_ref(),
        );

        let Some(desired_world) = select_direction(
            &self.config,
            self.rest_pose,
            &ctx.frame,
            resolved,
            ctx.tip_position,
        ) else {
            return TickOutcome::idle();
        };

        // All rotation bookkeeping happens in the parent's local axes.
        let desired_local = ctx.frame.to_local(desired_world);
        if !desired_local.is_finite() || desired_local.length_squared() < MIN_DIRECTION_LENGTH_SQ {
            // Target collapsed onto the tip; hold the current aim.
            return TickOutcome::idle();
        }

        let dt = sanitize_dt(ctx.dt_seconds);
        let max_deg = self.config.tracking_speed_deg_s * dt;

        let target_rotation = look_rotation(desired_local, Vec3::Y);
        let current = nodes.orientation();
        let next = rotate_towards(current, target_rotation, max_deg);
        if next != current {
            nodes.set_from(next);
        }

        let error_deg = nodes.orientation().angle_between(target_rotation).to_degrees();
        let state = if error_deg <= ALIGNMENT_EPSILON_DEG {
            TrackerState::Aligned
        } else {
            TrackerState::Seeking
        };
        TickOutcome { state, error_deg }
    }
}

/// Non-finite or negative frame times behave like a paused simulation.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
