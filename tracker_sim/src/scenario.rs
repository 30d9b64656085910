//! Scripted tracking scenarios.
//!
//! A scenario owns the vessels, a symmetry group of rigs mounted on the
//! first vessel, and a timeline of commands to fire at scheduled ticks.
//! Stepping it advances the whole scene by one fixed-dt tick.

use light_tracker::{RestPose, TargetEntity, TickOutcome, TrackerState, VesselRef};
use log::{info, warn};

use crate::rig::{apply_to_group, LightRig};
use crate::vessel::Vessel;

/// Host-side command fired at a scheduled tick.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    ToggleTracking,
    CycleTrackMode,
    ToggleRestWithoutTarget,
    /// Target the vessel at this index, or clear the current target.
    SetTarget(Option<usize>),
    /// Hand control to the vessel at this index.
    SetActiveVessel(usize),
    SetRestPose(RestPose),
    /// Slider-style setting, fanned out across the symmetry group.
    SetTrackingSpeed(f32),
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledCommand {
    pub at_tick: u32,
    pub command: Command,
}

impl ScheduledCommand {
    pub fn new(at_tick: u32, command: Command) -> ScheduledCommand {
        ScheduledCommand { at_tick, command }
    }
}

/// Aggregate results of a scenario run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u32,
    /// Ticks the lead rig spent aligned with its desired direction.
    pub aligned_ticks: u32,
    pub final_state: TrackerState,
    pub final_error_deg: f32,
}

/// A scripted run: vessels, rigs, and a command timeline.
pub struct Scenario {
    name: String,
    dt: f32,
    vessels: Vec<Vessel>,
    rigs: Vec<LightRig>,
    timeline: Vec<ScheduledCommand>,
    active_vessel: usize,
    target: Option<usize>,
    tick: u32,
}

impl Scenario {
    /// Build a scenario. Rigs are mounted on the first vessel; the first
    /// vessel also starts as the active one.
    pub fn new(
        name: &str,
        dt: f32,
        vessels: Vec<Vessel>,
        rigs: Vec<LightRig>,
        timeline: Vec<ScheduledCommand>,
    ) -> Scenario {
        Scenario {
            name: name.to_string(),
            dt,
            vessels,
            rigs,
            timeline,
            active_vessel: 0,
            target: None,
            tick: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tick_index(&self) -> u32 {
        self.tick
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn rigs(&self) -> &[LightRig] {
        &self.rigs
    }

    /// Lead rig of the symmetry group.
    pub fn rig(&self) -> &LightRig {
        &self.rigs[0]
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::ToggleTracking => {
                for rig in &mut self.rigs {
                    rig.tracker.toggle_tracking();
                }
            }
            Command::CycleTrackMode => {
                for rig in &mut self.rigs {
                    rig.tracker.cycle_track_mode();
                }
            }
            Command::ToggleRestWithoutTarget => {
                for rig in &mut self.rigs {
                    rig.tracker.toggle_rest_without_target();
                }
            }
            Command::SetTarget(index) => {
                self.target = index;
                match index.and_then(|i| self.vessels.get(i)) {
                    Some(vessel) => info!("[{}] target set to {}", self.name, vessel.name),
                    None => info!("[{}] target cleared", self.name),
                }
            }
            Command::SetActiveVessel(index) => {
                if index < self.vessels.len() {
                    self.active_vessel = index;
                    info!("[{}] active vessel: {}", self.name, self.vessels[index].name);
                } else {
                    warn!("[{}] no vessel at index {index}", self.name);
                }
            }
            Command::SetRestPose(pose) => {
                for rig in &mut self.rigs {
                    rig.tracker.set_rest_pose(pose);
                }
            }
            Command::SetTrackingSpeed(deg_per_s) => {
                if let Err(err) = apply_to_group(&mut self.rigs, |c| {
                    c.tracking_speed_deg_s = deg_per_s;
                }) {
                    warn!("[{}] speed change rejected: {err}", self.name);
                }
            }
        }
    }

    /// Advance the scene by one tick and return the lead rig's outcome.
    pub fn step(&mut self) -> TickOutcome {
        let due: Vec<Command> = self
            .timeline
            .iter()
            .filter(|cmd| cmd.at_tick == self.tick)
            .map(|cmd| cmd.command)
            .collect();
        for command in due {
            self.apply_command(command);
        }

        for vessel in &mut self.vessels {
            vessel.step(self.dt);
        }

        let own_position = self.vessels[0].position;
        let active = self
            .vessels
            .get(self.active_vessel)
            .map(|v| VesselRef {
                id: v.id,
                position: v.position,
            });
        let target = self.target.and_then(|i| self.vessels.get(i)).map(|v| TargetEntity {
            owner: v.id,
            position: v.position,
        });

        // Every rig ticks; the lead rig's outcome stands in for the group
        // since the whole symmetry group shares one configuration.
        let mut lead_outcome = TickOutcome {
            state: TrackerState::Idle,
            error_deg: 0.0,
        };
        for (index, rig) in self.rigs.iter_mut().enumerate() {
            let outcome = rig.tick(self.dt, own_position, active, target);
            if index == 0 {
                lead_outcome = outcome;
            }
        }
        self.tick += 1;
        lead_outcome
    }

    /// Run for `ticks` ticks, logging state transitions.
    pub fn run(&mut self, ticks: u32) -> RunSummary {
        let mut last_state: Option<TrackerState> = None;
        let mut aligned_ticks = 0;
        let mut outcome = TickOutcome {
            state: TrackerState::Idle,
            error_deg: 0.0,
        };
        for _ in 0..ticks {
            outcome = self.step();
            if outcome.state == TrackerState::Aligned {
                aligned_ticks += 1;
            }
            if last_state != Some(outcome.state) {
                info!(
                    "[{}] tick {}: {:?}, error {:.2}°",
                    self.name, self.tick, outcome.state, outcome.error_deg
                );
                last_state = Some(outcome.state);
            }
        }
        RunSummary {
            ticks,
            aligned_ticks,
            final_state: outcome.state,
            final_error_deg: outcome.error_deg,
        }
    }
}
