/// Proportional gain for the heading error term.
pub const STEER_KP: f64 = 0.025;

/// Derivative gain for the tick-to-tick change of the heading error.
pub const STEER_KD: f64 = 0.025;

/// Upper bound on the emitted steering magnitude.
pub const MAX_STEER_CONTROL: f64 = 1.5;

/// Dead zone half-width in degrees; errors inside it issue no steer command.
pub const STEER_DEAD_ZONE_DEGREES: f64 = 3.0;

// Speed limits are experimental.
pub const SPEED_SCALE: f64 = 0.9;
pub const BRAKE_HINT_SPEED: f64 = 14.0;
pub const BRAKE_HARD_HINT_SPEED: f64 = 9.5;
pub const CORNER_90_SPEED: f64 = 7.0;
pub const CORNER_45_SPEED: f64 = 8.3;

/// Cool-down lap limit, unscaled. Should stay above the tire spin threshold.
pub const COOL_DOWN_SPEED: f64 = 5.0;

/// Below this (scaled) speed the driver always reapplies throttle mid-race.
pub const RECOVERY_SPEED: f64 = 3.6;

/// Tolerance jitter spans `tile_width / TOLERANCE_DIVISOR` per axis.
pub const TOLERANCE_DIVISOR: f64 = 8.0;
