pub mod constants;
pub mod driver;
pub mod speed_control;
pub mod steer_control;
pub mod track;
pub mod vehicle;

pub use driver::{AiDriver, AiDriverInit, DriverContext};
pub use speed_control::{PedalCommand, SpeedController, SpeedDecision, SpeedLimits};
pub use steer_control::{SteerController, SteerDecision, SteerGains};
pub use track::{ComputerHint, RaceProgress, Route, Tile, TileType, TrackMap};
pub use vehicle::{Actuator, SteerDirection};
