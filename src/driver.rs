use log::trace;
use nalgebra::Vector2;
use rand::Rng;

use crate::{
    constants::TOLERANCE_DIVISOR,
    speed_control::{SpeedController, SpeedLimits},
    steer_control::{SteerController, SteerGains},
    track::{RaceProgress, Route, TrackMap},
    vehicle::Actuator,
};

/// The race collaborators a driver needs for one tick. Absent until the
/// vehicle has been placed on a track.
#[derive(Clone, Copy)]
pub struct DriverContext<'a> {
    pub route: &'a dyn Route,
    pub track: &'a dyn TrackMap,
    pub race: &'a dyn RaceProgress,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AiDriverInit {
    pub gains: SteerGains,
    pub limits: SpeedLimits,
}

impl AiDriverInit {
    pub fn build<R: Rng>(&self, rng: R) -> AiDriver<R> {
        let Self { gains, limits } = *self;
        AiDriver {
            rng,
            steer_controller: SteerController::new(gains),
            speed_controller: SpeedController::new(limits),
            random_tolerance: Vector2::zeros(),
            last_target_index: 0,
        }
    }
}

/// Per-vehicle driving controller. One instance per bot, living as long as
/// its vehicle; never shared.
#[derive(Debug)]
pub struct AiDriver<R: Rng> {
    rng: R,
    steer_controller: SteerController,
    speed_controller: SpeedController,
    random_tolerance: Vector2<f64>,
    last_target_index: usize,
}

impl<R: Rng> AiDriver<R> {
    pub fn new(rng: R) -> Self {
        AiDriverInit::default().build(rng)
    }

    pub fn last_target_index(&self) -> usize {
        self.last_target_index
    }

    pub fn random_tolerance(&self) -> Vector2<f64> {
        self.random_tolerance
    }

    pub fn last_heading_error(&self) -> f64 {
        self.steer_controller.last_heading_error()
    }

    pub fn continuous_target_angle(&self) -> Option<f64> {
        self.steer_controller.continuous_target_angle()
    }

    /// Runs one control tick, writing steer and pedal requests to `vehicle`.
    ///
    /// A `None` context means the vehicle is not attached to a race yet; the
    /// tick is skipped silently. `time_delta_sec` is diagnostic only, so a
    /// replayed tick stream stays deterministic.
    pub fn update(
        &mut self,
        ctx: Option<DriverContext>,
        vehicle: &mut dyn Actuator,
        time_delta_sec: f64,
        race_completed: bool,
    ) {
        let Some(DriverContext { route, track, race }) = ctx else {
            return;
        };

        let target_index = race.current_target_index();
        if self.last_target_index != target_index {
            self.random_tolerance = random_tolerance(&mut self.rng, track.tile_width());
        }

        let target = route.waypoint_at(target_index);
        trace!(
            "update: dt={:.4} target_index={} target=({:.1}, {:.1}) position=({:.1}, {:.1})",
            time_delta_sec,
            target_index,
            target.x,
            target.y,
            vehicle.position().x,
            vehicle.position().y,
        );

        let steer = self.steer_controller.step(
            vehicle.position(),
            vehicle.heading(),
            target,
            self.random_tolerance,
        );
        if let Some((direction, magnitude)) = steer.command {
            vehicle.steer(direction, magnitude);
        }

        let tile = track.tile_at(vehicle.position());
        let speed = self
            .speed_controller
            .step(tile, vehicle.abs_speed(), race_completed);
        vehicle.set_accelerator_enabled(speed.command.accelerator_enabled());
        vehicle.set_brake_enabled(speed.command.brake_enabled());

        self.last_target_index = target_index;
    }
}

/// Uniform jitter per axis, bounded by an eighth of the tile width so the
/// offset target can never leave the tile.
fn random_tolerance<R: Rng>(rng: &mut R, tile_width: f64) -> Vector2<f64> {
    let jitter = Vector2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
    jitter * (tile_width / TOLERANCE_DIVISOR)
}
