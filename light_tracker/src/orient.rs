//! Rate-limited orientation math.
//!
//! The orienter turns a desired aim direction into bounded motion of the
//! two gimbal nodes: build the look rotation for the direction, rotate the
//! current orientation toward it by at most the tick's degree budget, then
//! split the result into a yaw-only base rotation and a pitch-only can
//! rotation. Both nodes are written from the same advanced rotation so the
//! two hinges stay independent while sharing one aim.

use glam::{EulerRot, Mat3, Quat, Vec3};

/// Angular error below which the gimbal counts as aligned, degrees.
pub const ALIGNMENT_EPSILON_DEG: f32 = 0.1;

/// Squared length below which a direction is degenerate and ignored.
pub(crate) const MIN_DIRECTION_LENGTH_SQ: f32 = 1e-8;

/// Parent-relative rotations of the two gimbal nodes.
///
/// The base swings about local +Y only and the can tilts about local +X
/// only; the fields stay private so nothing can write a rotation with
/// components on the wrong axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GimbalNodes {
    base_rotation: Quat,
    can_rotation: Quat,
}

impl GimbalNodes {
    /// Both nodes at their neutral orientation.
    pub fn new() -> GimbalNodes {
        GimbalNodes::default()
    }

    /// Restore nodes from persisted yaw/pitch angles, degrees.
    pub fn from_angles(base_yaw_deg: f32, can_pitch_deg: f32) -> GimbalNodes {
        GimbalNodes {
            base_rotation: Quat::from_rotation_y(base_yaw_deg.to_radians()),
            can_rotation: Quat::from_rotation_x(can_pitch_deg.to_radians()),
        }
    }

    /// Local rotation of the yaw-bearing base node.
    pub fn base_rotation(&self) -> Quat {
        self.base_rotation
    }

    /// Local rotation of the pitch-bearing can node.
    pub fn can_rotation(&self) -> Quat {
        self.can_rotation
    }

    /// Base swing about the parent's up axis, degrees.
    pub fn base_yaw_deg(&self) -> f32 {
        let (yaw, _, _) = self.base_rotation.to_euler(EulerRot::YXZ);
        yaw.to_degrees()
    }

    /// Can tilt about the base's right axis, degrees.
    pub fn can_pitch_deg(&self) -> f32 {
        let (_, pitch, _) = self.can_rotation.to_euler(EulerRot::YXZ);
        pitch.to_degrees()
    }

    /// Combined parent-relative orientation of the can (base then can).
    pub fn orientation(&self) -> Quat {
        self.base_rotation * self.can_rotation
    }

    /// Write both nodes from one full rotation: the base keeps only the yaw
    /// component, the can only the pitch component.
    pub fn set_from(&mut self, orientation: Quat) {
        let (yaw, pitch, _roll) = orientation.to_euler(EulerRot::YXZ);
        self.base_rotation = Quat::from_rotation_y(yaw);
        self.can_rotation = Quat::from_rotation_x(pitch);
    }
}

/// Orientation whose local +Z axis points along `forward`, with roll chosen
/// so local +Y stays as close to `up_hint` as the aim allows.
pub fn look_rotation(forward: Vec3, up_hint: Vec3) -> Quat {
    let forward = forward.normalize();
    let mut right = up_hint.cross(forward);
    if right.length_squared() < MIN_DIRECTION_LENGTH_SQ {
        // Aim is parallel to the up hint; any perpendicular roll works.
        right = forward.any_orthonormal_vector();
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Shortest-arc rotation from `from` toward `to`, clamped to `max_deg` of
/// angular change. Snaps exactly to `to` once the remaining angle is within
/// the budget; a zero budget returns `from` untouched.
pub fn rotate_towards(from: Quat, to: Quat, max_deg: f32) -> Quat {
    if max_deg <= 0.0 {
        return from;
    }
    let angle_deg = from.angle_between(to).to_degrees();
    if angle_deg <= max_deg {
        return to;
    }
    from.slerp(to, max_deg / angle_deg)
}

/// One orienter step: rotate `current` toward `desired_dir` by at most
/// `max_deg`. `None` or degenerate directions leave `current` unchanged.
pub fn advance(current: Quat, desired_dir: Option<Vec3>, max_deg: f32, up_hint: Vec3) -> Quat {
    let Some(dir) = desired_dir else {
        return current;
    };
    if !dir.is_finite() || dir.length_squared() < MIN_DIRECTION_LENGTH_SQ {
        return current;
    }
    rotate_towards(current, look_rotation(dir, up_hint), max_deg)
}
