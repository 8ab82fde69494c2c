use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteerDirection {
    Left,
    Right,
}

/// The vehicle surface the driver reads pose from and writes controls to.
///
/// Steering and pedals are requested, not simulated; the physics engine behind
/// this trait decides how the requests translate into forces.
pub trait Actuator {
    fn position(&self) -> Point2<f64>;

    /// Current facing direction in degrees. Any range; interpreted mod 360.
    fn heading(&self) -> f64;

    fn abs_speed(&self) -> f64;

    fn steer(&mut self, direction: SteerDirection, magnitude: f64);

    fn set_accelerator_enabled(&mut self, enabled: bool);

    fn set_brake_enabled(&mut self, enabled: bool);
}
