use nalgebra::Point2;

/// Geometric classification of a track tile, used for cornering speed limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    None,
    Straight,
    Corner45Left,
    Corner45Right,
    Corner90,
    Finish,
}

/// Track-designer metadata advising AI-only braking, independent of geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputerHint {
    None,
    Brake,
    BrakeHard,
}

/// The tile currently under a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub tile_type: TileType,
    pub computer_hint: ComputerHint,
}

impl Tile {
    pub fn new(tile_type: TileType, computer_hint: ComputerHint) -> Self {
        Self {
            tile_type,
            computer_hint,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            tile_type: TileType::Straight,
            computer_hint: ComputerHint::None,
        }
    }
}

/// Ordered waypoints of the racing line.
pub trait Route {
    fn waypoint_at(&self, index: usize) -> Point2<f64>;
}

/// Tile lookup for the track the race runs on.
pub trait TrackMap {
    fn tile_at(&self, position: Point2<f64>) -> Tile;
    fn tile_width(&self) -> f64;
}

/// Race-progress tracker for one vehicle. The index is monotonically
/// non-decreasing over a race.
pub trait RaceProgress {
    fn current_target_index(&self) -> usize;
}
