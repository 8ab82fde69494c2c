use log::trace;
use nalgebra::{Point2, Vector2};

use crate::{
    constants::{MAX_STEER_CONTROL, STEER_DEAD_ZONE_DEGREES, STEER_KD, STEER_KP},
    vehicle::SteerDirection,
};

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_degrees(mut angle: f64) -> f64 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

#[derive(Debug, Clone, Copy)]
pub struct SteerGains {
    pub kp: f64,
    pub kd: f64,
    pub max_control: f64,
    pub dead_zone_degrees: f64,
}

impl Default for SteerGains {
    fn default() -> Self {
        Self {
            kp: STEER_KP,
            kd: STEER_KD,
            max_control: MAX_STEER_CONTROL,
            dead_zone_degrees: STEER_DEAD_ZONE_DEGREES,
        }
    }
}

/// One tick's steering outcome. `command` is `None` inside the dead zone.
#[derive(Debug, Clone, Copy)]
pub struct SteerDecision {
    pub bearing: f64,
    pub continuous_bearing: f64,
    pub error: f64,
    pub control: f64,
    pub command: Option<(SteerDirection, f64)>,
}

#[derive(Debug)]
pub struct SteerController {
    gains: SteerGains,
    last_heading_error: f64,
    continuous_target_angle: Option<f64>,
}

impl SteerController {
    pub fn new(gains: SteerGains) -> Self {
        Self {
            gains,
            last_heading_error: 0.0,
            continuous_target_angle: None,
        }
    }

    pub fn last_heading_error(&self) -> f64 {
        self.last_heading_error
    }

    /// Unwrapped bearing-to-target signal, once at least one step has run.
    pub fn continuous_target_angle(&self) -> Option<f64> {
        self.continuous_target_angle
    }

    /// Computes the steering command toward `target` from the given pose.
    ///
    /// `tolerance` is the per-waypoint jitter offset applied to the vehicle
    /// position before taking the bearing.
    pub fn step(
        &mut self,
        position: Point2<f64>,
        heading: f64,
        target: Point2<f64>,
        tolerance: Vector2<f64>,
    ) -> SteerDecision {
        debug_assert!(heading.is_finite());
        debug_assert!(position.x.is_finite() && position.y.is_finite());

        let offset = target - (position + tolerance);
        let bearing = offset.y.atan2(offset.x).to_degrees();

        // Keep a continuous, non-jumping copy of the bearing across the ±180°
        // seam. The steering error below still works on the wrapped bearing.
        let continuous_bearing = match self.continuous_target_angle {
            None => bearing,
            Some(prev) => {
                let mut unwrapped = bearing;
                while unwrapped - prev > 180.0 {
                    unwrapped -= 360.0;
                }
                while unwrapped - prev <= -180.0 {
                    unwrapped += 360.0;
                }
                unwrapped
            }
        };
        self.continuous_target_angle = Some(continuous_bearing);

        // Truncation to whole degrees before the modulo is deliberate; the
        // heading is fixed-point upstream and steering granularity depends
        // on it.
        let cur = (heading as i64 % 360) as f64;
        let error = normalize_degrees(bearing - cur);

        // PD term. This makes the computer players turn and react faster than
        // a human would, but hey, they are stupid.
        let SteerGains {
            kp,
            kd,
            max_control,
            dead_zone_degrees,
        } = self.gains;
        let control = (error * kp + (error - self.last_heading_error) * kd)
            .abs()
            .min(max_control);

        let command = if error < -dead_zone_degrees {
            Some((SteerDirection::Right, control))
        } else if error > dead_zone_degrees {
            Some((SteerDirection::Left, control))
        } else {
            None
        };

        self.last_heading_error = error;

        trace!(
            "steer: bearing={:.2} continuous={:.2} error={:.2} control={:.3} command={:?}",
            bearing,
            continuous_bearing,
            error,
            control,
            command
        );

        SteerDecision {
            bearing,
            continuous_bearing,
            error,
            control,
            command,
        }
    }
}
