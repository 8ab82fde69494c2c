use approx::assert_relative_eq;
use nalgebra::{point, Point2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use raceline_ai::{
    Actuator, AiDriver, ComputerHint, DriverContext, RaceProgress, Route, SteerDirection, Tile,
    TileType, TrackMap,
};

struct FakeVehicle {
    position: Point2<f64>,
    heading: f64,
    abs_speed: f64,
    steer_commands: Vec<(SteerDirection, f64)>,
    accelerator: Option<bool>,
    brake: Option<bool>,
}

impl FakeVehicle {
    fn new(position: Point2<f64>, heading: f64, abs_speed: f64) -> Self {
        Self {
            position,
            heading,
            abs_speed,
            steer_commands: Vec::new(),
            accelerator: None,
            brake: None,
        }
    }
}

impl Actuator for FakeVehicle {
    fn position(&self) -> Point2<f64> {
        self.position
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn abs_speed(&self) -> f64 {
        self.abs_speed
    }

    fn steer(&mut self, direction: SteerDirection, magnitude: f64) {
        self.steer_commands.push((direction, magnitude));
    }

    fn set_accelerator_enabled(&mut self, enabled: bool) {
        self.accelerator = Some(enabled);
    }

    fn set_brake_enabled(&mut self, enabled: bool) {
        self.brake = Some(enabled);
    }
}

struct FakeRoute {
    waypoints: Vec<Point2<f64>>,
}

impl Route for FakeRoute {
    fn waypoint_at(&self, index: usize) -> Point2<f64> {
        self.waypoints[index]
    }
}

struct FakeTrack {
    tile: Tile,
    tile_width: f64,
}

impl TrackMap for FakeTrack {
    fn tile_at(&self, _position: Point2<f64>) -> Tile {
        self.tile
    }

    fn tile_width(&self) -> f64 {
        self.tile_width
    }
}

struct FakeRace {
    index: usize,
}

impl RaceProgress for FakeRace {
    fn current_target_index(&self) -> usize {
        self.index
    }
}

fn ctx<'a>(route: &'a FakeRoute, track: &'a FakeTrack, race: &'a FakeRace) -> DriverContext<'a> {
    DriverContext {
        route,
        track,
        race,
    }
}

fn straight_track() -> FakeTrack {
    FakeTrack {
        tile: Tile::new(TileType::Straight, ComputerHint::None),
        tile_width: 256.0,
    }
}

#[test_log::test]
fn update_without_context_is_a_no_op() {
    let mut driver = AiDriver::new(ChaCha8Rng::seed_from_u64(1));
    let mut vehicle = FakeVehicle::new(point![0.0, 0.0], 0.0, 10.0);

    driver.update(None, &mut vehicle, 1.0 / 60.0, false);

    assert!(vehicle.steer_commands.is_empty());
    assert_eq!(vehicle.accelerator, None);
    assert_eq!(vehicle.brake, None);
}

#[test_log::test]
fn wrapped_bearing_steers_left_with_expected_magnitude() {
    let mut driver = AiDriver::new(ChaCha8Rng::seed_from_u64(1));
    let bearing = 10f64.to_radians();
    let route = FakeRoute {
        waypoints: vec![point![500.0 * bearing.cos(), 500.0 * bearing.sin()]],
    };
    let track = straight_track();
    let race = FakeRace { index: 0 };
    let mut vehicle = FakeVehicle::new(point![0.0, 0.0], 350.0, 5.0);

    driver.update(Some(ctx(&route, &track, &race)), &mut vehicle, 1.0 / 60.0, false);

    // Heading 350° and bearing 10° wrap to an error of +20°.
    let (direction, magnitude) = vehicle.steer_commands[0];
    assert_eq!(direction, SteerDirection::Left);
    assert_relative_eq!(magnitude, 20.0 * 0.025 + 20.0 * 0.025, epsilon = 1e-6);
    assert_relative_eq!(driver.last_heading_error(), 20.0, epsilon = 1e-6);
}

#[test_log::test]
fn pedals_are_written_every_tick() {
    let mut driver = AiDriver::new(ChaCha8Rng::seed_from_u64(1));
    let route = FakeRoute {
        waypoints: vec![point![1000.0, 0.0]],
    };
    let race = FakeRace { index: 0 };
    let braking_track = FakeTrack {
        tile: Tile::new(TileType::Straight, ComputerHint::BrakeHard),
        tile_width: 256.0,
    };
    let mut vehicle = FakeVehicle::new(point![0.0, 0.0], 0.0, 9.6);

    driver.update(
        Some(ctx(&route, &braking_track, &race)),
        &mut vehicle,
        1.0 / 60.0,
        false,
    );
    assert_eq!(vehicle.accelerator, Some(false));
    assert_eq!(vehicle.brake, Some(true));

    // Same driver on a plain straight at low speed flips both outputs.
    let track = straight_track();
    vehicle.abs_speed = 2.0;
    driver.update(Some(ctx(&route, &track, &race)), &mut vehicle, 1.0 / 60.0, false);
    assert_eq!(vehicle.accelerator, Some(true));
    assert_eq!(vehicle.brake, Some(false));
}

#[test_log::test]
fn tolerance_regenerates_only_on_waypoint_change() {
    let mut driver = AiDriver::new(ChaCha8Rng::seed_from_u64(42));
    let route = FakeRoute {
        waypoints: vec![point![500.0, 0.0], point![500.0, 500.0], point![0.0, 500.0]],
    };
    let track = straight_track();
    let mut vehicle = FakeVehicle::new(point![0.0, 0.0], 0.0, 5.0);

    // Index 0 matches the initial sentinel, so no jitter yet.
    driver.update(
        Some(ctx(&route, &track, &FakeRace { index: 0 })),
        &mut vehicle,
        1.0 / 60.0,
        false,
    );
    assert_eq!(driver.random_tolerance(), nalgebra::Vector2::zeros());

    driver.update(
        Some(ctx(&route, &track, &FakeRace { index: 1 })),
        &mut vehicle,
        1.0 / 60.0,
        false,
    );
    let first = driver.random_tolerance();
    assert_ne!(first, nalgebra::Vector2::zeros());
    assert!(first.norm() <= track.tile_width / 8.0 * 2f64.sqrt() + 1e-9);

    // Same index again: the jitter holds for the whole segment.
    driver.update(
        Some(ctx(&route, &track, &FakeRace { index: 1 })),
        &mut vehicle,
        1.0 / 60.0,
        false,
    );
    assert_eq!(driver.random_tolerance(), first);

    driver.update(
        Some(ctx(&route, &track, &FakeRace { index: 2 })),
        &mut vehicle,
        1.0 / 60.0,
        false,
    );
    assert_ne!(driver.random_tolerance(), first);
    assert_eq!(driver.last_target_index(), 2);
}

#[test_log::test]
fn seeded_drivers_behave_identically() {
    let route = FakeRoute {
        waypoints: vec![point![500.0, 0.0], point![500.0, 500.0]],
    };
    let track = straight_track();
    let mut left = AiDriver::new(ChaCha8Rng::seed_from_u64(9));
    let mut right = AiDriver::new(ChaCha8Rng::seed_from_u64(9));

    for index in [0, 1, 1] {
        let race = FakeRace { index };
        let mut a = FakeVehicle::new(point![10.0, 20.0], 30.0, 5.0);
        let mut b = FakeVehicle::new(point![10.0, 20.0], 30.0, 5.0);
        left.update(Some(ctx(&route, &track, &race)), &mut a, 1.0 / 60.0, false);
        right.update(Some(ctx(&route, &track, &race)), &mut b, 1.0 / 60.0, false);
        assert_eq!(a.steer_commands, b.steer_commands);
        assert_eq!(a.accelerator, b.accelerator);
        assert_eq!(a.brake, b.brake);
    }
    assert_eq!(left.random_tolerance(), right.random_tolerance());
}
