//! Animated terminal walkthrough of both search engines.
//!
//! Builds a randomly obstructed grid, then runs BFS and A* stepwise,
//! redrawing the grid after every explored cell. This plays the role of
//! the visualization collaborator: the engine only hands it events, the
//! demo decides pacing.
//!
//! Usage: `cargo run --bin walkthrough [seed]`

use std::collections::HashSet;
use std::io::Write;
use std::thread;
use std::time::Duration;

use gridway_core::{Grid, Point};
use gridway_search::{PathField, Step};
use rand::{Rng, RngExt, SeedableRng};

const WIDTH: i32 = 28;
const HEIGHT: i32 = 14;
const OBSTACLE_CHANCE: f64 = 0.28;
const FRAME: Duration = Duration::from_millis(12);

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| rand::rng().random());
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let start = Point::new(0, 0);
    let end = Point::new(WIDTH - 1, HEIGHT - 1);
    let grid = random_grid(&mut rng, start, end);
    let mut field = PathField::new();

    println!("seed {seed}");
    for engine in ["bfs", "astar"] {
        let outcome = animate(engine, &mut field, &grid, start, end);
        println!("{engine}: {outcome}");
    }
}

/// A grid with random obstacles, keeping the two endpoints free.
fn random_grid(rng: &mut impl Rng, start: Point, end: Point) -> Grid {
    let mut grid = Grid::new(WIDTH, HEIGHT);
    let points: Vec<Point> = grid.points().collect();
    for p in points {
        if p != start && p != end && rng.random::<f64>() < OBSTACLE_CHANCE {
            grid.set_blocked(p, true);
        }
    }
    grid
}

/// Drive one engine to completion, drawing a frame per explored cell.
fn animate(
    engine: &str,
    field: &mut PathField,
    grid: &Grid,
    start: Point,
    end: Point,
) -> String {
    let mut explored: HashSet<Point> = HashSet::new();
    let draw = |explored: &HashSet<Point>, path: &[Point]| {
        // Home the cursor and redraw in place.
        println!("\x1b[2J\x1b[H{engine}");
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let p = Point::new(x, y);
                let ch = if p == start {
                    'S'
                } else if p == end {
                    'E'
                } else if path.contains(&p) {
                    'o'
                } else if explored.contains(&p) {
                    '·'
                } else if grid.is_blocked(p) {
                    '#'
                } else {
                    ' '
                };
                print!("{ch}");
            }
            println!();
        }
        let _ = std::io::stdout().flush();
        thread::sleep(FRAME);
    };

    let run_outcome = match engine {
        "bfs" => {
            let mut run = match field.bfs(grid, start, end) {
                Ok(run) => run,
                Err(e) => return format!("rejected: {e}"),
            };
            loop {
                match run.step() {
                    Step::Explored(p) => {
                        explored.insert(p);
                        draw(&explored, &[]);
                    }
                    Step::Found => break run.path(),
                    Step::NoPath => break None,
                }
            }
        }
        _ => {
            let mut run = match field.astar(grid, start, end) {
                Ok(run) => run,
                Err(e) => return format!("rejected: {e}"),
            };
            loop {
                match run.step() {
                    Step::Explored(p) => {
                        explored.insert(p);
                        draw(&explored, &[]);
                    }
                    Step::Found => break run.path(),
                    Step::NoPath => break None,
                }
            }
        }
    };

    match run_outcome {
        Some(path) => {
            draw(&explored, &path);
            thread::sleep(Duration::from_millis(600));
            format!("path of {} cells, {} explored", path.len(), explored.len())
        }
        None => format!("no path, {} explored", explored.len()),
    }
}
