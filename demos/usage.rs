use anyhow::Result;
use clap::Parser;
use nalgebra::{point, vector, Point2};
use rand::{rngs::StdRng, SeedableRng};
use raceline_ai::{
    Actuator, AiDriver, ComputerHint, DriverContext, RaceProgress, Route, SteerDirection, Tile,
    TileType, TrackMap,
};

const TILE_WIDTH: f64 = 256.0;
const TICK_SECONDS: f64 = 1.0 / 60.0;

#[derive(Parser)]
struct Opts {
    /// Seed for the driver's tolerance jitter.
    #[clap(long, default_value = "7")]
    seed: u64,
    /// Number of simulation ticks to run.
    #[clap(long, default_value = "3600")]
    ticks: u32,
}

/// A square circuit with a 90° corner at each of its four waypoints.
struct SquareCircuit {
    waypoints: Vec<Point2<f64>>,
}

impl SquareCircuit {
    fn new() -> Self {
        let side = TILE_WIDTH * 8.0;
        Self {
            waypoints: vec![
                point![side, 0.0],
                point![side, side],
                point![0.0, side],
                point![0.0, 0.0],
            ],
        }
    }
}

impl Route for SquareCircuit {
    fn waypoint_at(&self, index: usize) -> Point2<f64> {
        self.waypoints[index % self.waypoints.len()]
    }
}

impl TrackMap for SquareCircuit {
    fn tile_at(&self, position: Point2<f64>) -> Tile {
        let near_corner = self
            .waypoints
            .iter()
            .any(|corner| (*corner - position).norm() < TILE_WIDTH * 2.0);
        if near_corner {
            Tile::new(TileType::Corner90, ComputerHint::BrakeHard)
        } else {
            Tile::new(TileType::Straight, ComputerHint::None)
        }
    }

    fn tile_width(&self) -> f64 {
        TILE_WIDTH
    }
}

struct Progress {
    index: usize,
}

impl RaceProgress for Progress {
    fn current_target_index(&self) -> usize {
        self.index
    }
}

/// Toy kinematic vehicle, just enough physics to close the loop.
struct DemoCar {
    position: Point2<f64>,
    heading: f64,
    speed: f64,
    steer_request: Option<(SteerDirection, f64)>,
    accelerator: bool,
    brake: bool,
}

impl DemoCar {
    fn new() -> Self {
        Self {
            position: point![0.0, 0.0],
            heading: 0.0,
            speed: 0.0,
            steer_request: None,
            accelerator: false,
            brake: false,
        }
    }

    fn integrate(&mut self) {
        if let Some((direction, magnitude)) = self.steer_request.take() {
            let turn = magnitude * 1.5;
            match direction {
                SteerDirection::Left => self.heading += turn,
                SteerDirection::Right => self.heading -= turn,
            }
        }
        if self.accelerator {
            self.speed += 4.0 * TICK_SECONDS;
        }
        if self.brake {
            self.speed -= 10.0 * TICK_SECONDS;
        }
        self.speed = (self.speed * 0.999).max(0.0);

        let heading = self.heading.to_radians();
        self.position += vector![heading.cos(), heading.sin()] * self.speed;
    }
}

impl Actuator for DemoCar {
    fn position(&self) -> Point2<f64> {
        self.position
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn abs_speed(&self) -> f64 {
        self.speed
    }

    fn steer(&mut self, direction: SteerDirection, magnitude: f64) {
        self.steer_request = Some((direction, magnitude));
    }

    fn set_accelerator_enabled(&mut self, enabled: bool) {
        self.accelerator = enabled;
    }

    fn set_brake_enabled(&mut self, enabled: bool) {
        self.brake = enabled;
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let Opts { seed, ticks } = Opts::parse();

    let circuit = SquareCircuit::new();
    let mut driver = AiDriver::new(StdRng::seed_from_u64(seed));
    let mut car = DemoCar::new();
    let mut progress = Progress { index: 0 };
    let mut laps = 0u32;

    for tick in 0..ticks {
        let ctx = DriverContext {
            route: &circuit,
            track: &circuit,
            race: &progress,
        };
        driver.update(Some(ctx), &mut car, TICK_SECONDS, false);
        car.integrate();

        let target = circuit.waypoint_at(progress.index);
        if (target - car.position).norm() < TILE_WIDTH {
            progress.index += 1;
            if progress.index % 4 == 0 {
                laps += 1;
                println!(
                    "tick {tick}: lap {laps} done, speed {:.1}, position ({:.0}, {:.0})",
                    car.speed, car.position.x, car.position.y
                );
            }
        }
    }

    println!(
        "finished after {ticks} ticks: {laps} laps, tolerance {:?}",
        driver.random_tolerance()
    );
    Ok(())
}
