//! The host-side gimbal part.
//!
//! A rig owns what the host engine would own: the two orientation nodes,
//! the mounting frame, and the tip offset. Each tick it assembles the
//! tracker's context from the surrounding scene and hands over its nodes.

use glam::Vec3;
use light_tracker::{
    GimbalNodes, LightTracker, LightTrackerResult, ParentFrame, TargetEntity, TickContext,
    TickOutcome, TrackerConfig, VesselContext, VesselId, VesselRef,
};

/// A tracking light mounted on a vessel.
#[derive(Debug, Clone)]
pub struct LightRig {
    pub tracker: LightTracker,
    pub nodes: GimbalNodes,
    /// Vessel this rig is mounted on.
    pub vessel: VesselId,
    /// World-space pose of the mounting frame.
    pub frame: ParentFrame,
    /// Offset of the can tip from the vessel position.
    pub tip_offset: Vec3,
}

impl LightRig {
    pub fn new(vessel: VesselId) -> LightRig {
        LightRig {
            tracker: LightTracker::new(),
            nodes: GimbalNodes::new(),
            vessel,
            frame: ParentFrame::default(),
            tip_offset: Vec3::ZERO,
        }
    }

    pub fn with_tip_offset(mut self, offset: Vec3) -> LightRig {
        self.tip_offset = offset;
        self
    }

    /// Run one tracker tick against the current scene.
    pub fn tick(
        &mut self,
        dt: f32,
        own_position: Vec3,
        active_vessel: Option<VesselRef>,
        target: Option<TargetEntity>,
    ) -> TickOutcome {
        let ctx = TickContext {
            dt_seconds: dt,
            frame: self.frame,
            tip_position: own_position + self.tip_offset,
            vessel: Some(VesselContext {
                self_vessel: self.vessel,
                active_vessel,
                target,
            }),
        };
        self.tracker.tick(&ctx, &mut self.nodes)
    }
}

/// Apply one configuration mutation to every rig in a symmetry group.
///
/// The editor-side stand-in for propagating a setting across mirrored
/// copies of the same part: each rig revalidates independently and the
/// first failure aborts the fan-out.
pub fn apply_to_group(
    rigs: &mut [LightRig],
    mutate: impl Fn(&mut TrackerConfig),
) -> LightTrackerResult<()> {
    for rig in rigs.iter_mut() {
        rig.tracker.apply_config(&mutate)?;
    }
    Ok(())
}
