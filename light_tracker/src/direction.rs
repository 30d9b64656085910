//! Aim direction selection.
//!
//! Combines the tracking toggle, the resolved target, and the rest policy
//! into a single optional desired direction for the orienter. Also owns the
//! rest pose math and the parent mounting frame the pose is expressed in.

use glam::{Mat3, Quat, Vec3};

use crate::config::{RestPose, TrackerConfig};
use crate::orient::MIN_DIRECTION_LENGTH_SQ;

/// World-space orthonormal basis of the gimbal's mounting frame.
///
/// `forward` is where an undeflected light points, `up` is the base's swing
/// axis, `right` the can's tilt axis at zero yaw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentFrame {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for ParentFrame {
    fn default() -> Self {
        ParentFrame {
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl ParentFrame {
    /// Build a frame from forward and up hints, re-orthogonalizing so the
    /// basis is usable even when the two are not quite perpendicular.
    pub fn from_forward_up(forward: Vec3, up: Vec3) -> ParentFrame {
        let forward = forward.normalize();
        let mut right = up.cross(forward);
        if right.length_squared() < MIN_DIRECTION_LENGTH_SQ {
            // Up hint is parallel to forward; any perpendicular will do.
            right = forward.any_orthonormal_vector();
        }
        let right = right.normalize();
        let up = forward.cross(right);
        ParentFrame { forward, right, up }
    }

    /// Rotation carrying the local axes (+X right, +Y up, +Z forward) onto
    /// this frame's world axes.
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.right, self.up, self.forward))
    }

    /// Express a world-space direction in this frame's local axes.
    pub fn to_local(&self, world_dir: Vec3) -> Vec3 {
        self.rotation().inverse() * world_dir
    }
}

/// Direction the gimbal points when no target applies.
///
/// Intrinsic yaw-then-pitch: the pitch axis is recomputed after yaw is
/// applied, so pitch stays relative to the yawed frame and the pose remains
/// well behaved with yaw near ±90°.
pub fn rest_direction(pose: RestPose, frame: &ParentFrame) -> Vec3 {
    let yaw_rot = Quat::from_axis_angle(frame.up, pose.yaw_deg.to_radians());
    let pitch_axis = yaw_rot * frame.right;
    let pitch_rot = Quat::from_axis_angle(pitch_axis, pose.pitch_deg.to_radians());
    pitch_rot * (yaw_rot * frame.forward)
}

/// Pick the desired world-space aim direction for this tick, if any.
///
/// - Tracking disabled: always the rest direction.
/// - Tracking with a resolved target: the normalized tip-to-target vector.
///   A target sitting exactly on the tip survives as a zero vector; the
///   orienter treats that as "no change".
/// - Tracking with no target: the rest direction if `rest_without_target`
///   is set, otherwise `None` and the gimbal freezes in place.
pub fn select_direction(
    config: &TrackerConfig,
    pose: RestPose,
    frame: &ParentFrame,
    resolved_target: Option<Vec3>,
    tip_position: Vec3,
) -> Option<Vec3> {
    if !config.is_tracking {
        return Some(rest_direction(pose, frame));
    }
    if let Some(target_position) = resolved_target {
        return Some((target_position - tip_position).normalize_or_zero());
    }
    if config.rest_without_target {
        return Some(rest_direction(pose, frame));
    }
    None
}
