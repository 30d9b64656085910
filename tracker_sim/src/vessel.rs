//! Simulated vessels.
//!
//! The aim points for the tracker: each vessel follows a simple parametric
//! path, re-evaluated from accumulated time so stepping stays stable at any
//! tick rate.

use glam::Vec3;
use light_tracker::VesselId;

/// Motion profile for a simulated vessel.
#[derive(Debug, Clone, Copy)]
pub enum FlightPath {
    /// Holds a fixed position.
    Stationary(Vec3),
    /// Straight line at constant velocity.
    Linear { start: Vec3, velocity: Vec3 },
    /// Circles a center point in the horizontal plane.
    Orbit {
        center: Vec3,
        radius: f32,
        angular_rate_deg_s: f32,
        phase_deg: f32,
    },
}

impl FlightPath {
    fn position_at(&self, t: f32) -> Vec3 {
        match *self {
            FlightPath::Stationary(position) => position,
            FlightPath::Linear { start, velocity } => start + velocity * t,
            FlightPath::Orbit {
                center,
                radius,
                angular_rate_deg_s,
                phase_deg,
            } => {
                let angle = (phase_deg + angular_rate_deg_s * t).to_radians();
                center + Vec3::new(angle.cos(), 0.0, angle.sin()) * radius
            }
        }
    }
}

/// A craft the light can aim at (or be mounted on).
#[derive(Debug, Clone)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub position: Vec3,
    path: FlightPath,
    elapsed: f32,
}

impl Vessel {
    pub fn new(id: u32, name: &str, path: FlightPath) -> Vessel {
        Vessel {
            id: VesselId(id),
            name: name.to_string(),
            position: path.position_at(0.0),
            path,
            elapsed: 0.0,
        }
    }

    /// Advance the vessel along its path by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt;
        self.position = self.path.position_at(self.elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_vessel_holds_position() {
        let mut vessel = Vessel::new(1, "buoy", FlightPath::Stationary(Vec3::new(1.0, 2.0, 3.0)));
        for _ in 0..10 {
            vessel.step(0.5);
        }
        assert_eq!(vessel.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_linear_vessel_advances() {
        let mut vessel = Vessel::new(
            2,
            "runner",
            FlightPath::Linear {
                start: Vec3::ZERO,
                velocity: Vec3::new(10.0, 0.0, 0.0),
            },
        );
        for _ in 0..50 {
            vessel.step(0.02);
        }
        assert!((vessel.position.x - 10.0).abs() < 1e-3, "1 s at 10 m/s should cover 10 m");
    }

    #[test]
    fn test_orbit_vessel_keeps_radius() {
        let center = Vec3::new(0.0, 5.0, 0.0);
        let mut vessel = Vessel::new(
            3,
            "skiff",
            FlightPath::Orbit {
                center,
                radius: 100.0,
                angular_rate_deg_s: 30.0,
                phase_deg: 45.0,
            },
        );
        for _ in 0..200 {
            vessel.step(0.02);
            let radius = (vessel.position - center).length();
            assert!((radius - 100.0).abs() < 1e-2, "orbit radius drifted to {radius}");
        }
    }
}
