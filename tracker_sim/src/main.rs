use chrono::Utc;
use glam::Vec3;
use light_tracker::{RestPose, VesselId};
use log::info;
use rand::Rng;
use tracker_sim::{Command, FlightPath, LightRig, Scenario, ScheduledCommand, Vessel};

const DT: f32 = 0.02;
const TICKS: u32 = 1500;

/// Night-convoy demo: a carrier with two mirrored tracking lights follows a
/// skiff circling it, loses the target, rests, then switches to chasing the
/// active vessel.
fn build_scenario() -> Scenario {
    let mut rng = rand::thread_rng();

    let vessels = vec![
        Vessel::new(1, "carrier", FlightPath::Stationary(Vec3::ZERO)),
        Vessel::new(
            2,
            "skiff",
            FlightPath::Orbit {
                center: Vec3::new(0.0, 20.0, 0.0),
                radius: 150.0,
                angular_rate_deg_s: 12.0,
                phase_deg: rng.gen_range(0.0..360.0),
            },
        ),
        Vessel::new(
            3,
            "runner",
            FlightPath::Linear {
                start: Vec3::new(-200.0, 10.0, rng.gen_range(-50.0..50.0)),
                velocity: Vec3::new(8.0, 0.0, 2.0),
            },
        ),
    ];

    // Two mirrored lights on the carrier's bow.
    let rigs = vec![
        LightRig::new(VesselId(1)).with_tip_offset(Vec3::new(3.0, 2.0, 5.0)),
        LightRig::new(VesselId(1)).with_tip_offset(Vec3::new(-3.0, 2.0, 5.0)),
    ];

    let timeline = vec![
        ScheduledCommand::new(0, Command::SetRestPose(RestPose::new(0.0, 30.0))),
        ScheduledCommand::new(0, Command::SetTarget(Some(1))),
        // Lights come up 1 s in and chase the skiff.
        ScheduledCommand::new(50, Command::ToggleTracking),
        // Target lost: freeze in place.
        ScheduledCommand::new(600, Command::SetTarget(None)),
        // Then fall back to the deck-wash rest pose instead.
        ScheduledCommand::new(750, Command::ToggleRestWithoutTarget),
        // Hand control to the runner and follow it in active-vessel mode.
        ScheduledCommand::new(1000, Command::SetActiveVessel(2)),
        ScheduledCommand::new(1000, Command::CycleTrackMode),
        ScheduledCommand::new(1100, Command::SetTrackingSpeed(90.0)),
    ];

    Scenario::new("night-convoy", DT, vessels, rigs, timeline)
}

fn main() {
    env_logger::init();

    let started = Utc::now();
    let mut scenario = build_scenario();
    info!("running scenario '{}'", scenario.name());

    let summary = scenario.run(TICKS);

    let rig = scenario.rig();
    println!("scenario:      {}", scenario.name());
    println!("started:       {}", started.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("simulated:     {:.1} s over {} ticks", TICKS as f32 * DT, summary.ticks);
    println!(
        "aligned:       {} ticks ({:.0}%)",
        summary.aligned_ticks,
        100.0 * summary.aligned_ticks as f32 / summary.ticks as f32
    );
    println!("final state:   {:?} ({:.2}° error)", summary.final_state, summary.final_error_deg);
    println!(
        "final aim:     yaw {:.1}°, pitch {:.1}°",
        rig.nodes.base_yaw_deg(),
        rig.nodes.can_pitch_deg()
    );
}
