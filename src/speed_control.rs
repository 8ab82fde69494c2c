use log::trace;

use crate::{
    constants::{
        BRAKE_HARD_HINT_SPEED, BRAKE_HINT_SPEED, COOL_DOWN_SPEED, CORNER_45_SPEED, CORNER_90_SPEED,
        RECOVERY_SPEED, SPEED_SCALE,
    },
    track::{ComputerHint, Tile, TileType},
};

/// Tunable speed thresholds. Values above `scale` multiply by it; the
/// cool-down limit does not.
#[derive(Debug, Clone, Copy)]
pub struct SpeedLimits {
    pub scale: f64,
    pub brake_hint_speed: f64,
    pub brake_hard_hint_speed: f64,
    pub corner_90_speed: f64,
    pub corner_45_speed: f64,
    pub cool_down_speed: f64,
    pub recovery_speed: f64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            scale: SPEED_SCALE,
            brake_hint_speed: BRAKE_HINT_SPEED,
            brake_hard_hint_speed: BRAKE_HARD_HINT_SPEED,
            corner_90_speed: CORNER_90_SPEED,
            corner_45_speed: CORNER_45_SPEED,
            cool_down_speed: COOL_DOWN_SPEED,
            recovery_speed: RECOVERY_SPEED,
        }
    }
}

/// Resolved pedal state for one tick. Exactly one variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PedalCommand {
    Accelerate,
    Brake,
    Coast,
}

impl PedalCommand {
    pub fn accelerator_enabled(self) -> bool {
        self == PedalCommand::Accelerate
    }

    pub fn brake_enabled(self) -> bool {
        self == PedalCommand::Brake
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpeedDecision {
    pub accelerate: bool,
    pub brake: bool,
    pub command: PedalCommand,
}

#[derive(Debug)]
pub struct SpeedController {
    limits: SpeedLimits,
}

impl SpeedController {
    pub fn new(limits: SpeedLimits) -> Self {
        Self { limits }
    }

    /// Pure decision table over the current tile, speed and race phase.
    ///
    /// Rule order matters: hint brakes first, then cornering suppression,
    /// then the race-phase branch, which may force the throttle back on at
    /// low speed while the race is running.
    pub fn step(&self, tile: Tile, abs_speed: f64, race_completed: bool) -> SpeedDecision {
        debug_assert!(abs_speed.is_finite());

        let SpeedLimits {
            scale,
            brake_hint_speed,
            brake_hard_hint_speed,
            corner_90_speed,
            corner_45_speed,
            cool_down_speed,
            recovery_speed,
        } = self.limits;

        let mut accelerate = true;
        let mut brake = false;

        if tile.computer_hint == ComputerHint::Brake && abs_speed > brake_hint_speed * scale {
            brake = true;
        }

        if tile.computer_hint == ComputerHint::BrakeHard
            && abs_speed > brake_hard_hint_speed * scale
        {
            brake = true;
        }

        if tile.tile_type == TileType::Corner90 && abs_speed > corner_90_speed * scale {
            accelerate = false;
        }

        if matches!(
            tile.tile_type,
            TileType::Corner45Left | TileType::Corner45Right
        ) && abs_speed > corner_45_speed * scale
        {
            accelerate = false;
        }

        if race_completed {
            // Cool-down lap speed, kept above the tire spin threshold.
            if abs_speed > cool_down_speed {
                accelerate = false;
            }
        } else if abs_speed < recovery_speed * scale {
            accelerate = true;
            brake = false;
        }

        let command = if brake {
            PedalCommand::Brake
        } else if accelerate {
            PedalCommand::Accelerate
        } else {
            PedalCommand::Coast
        };

        trace!(
            "speed: tile={:?} v={:.2} race_completed={} -> {:?}",
            tile,
            abs_speed,
            race_completed,
            command
        );

        SpeedDecision {
            accelerate,
            brake,
            command,
        }
    }
}
