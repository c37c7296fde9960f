use alloc::vec::Vec;

use log::debug;
use rand_core::RngCore;

use crate::config::{MazeConfig, MAX_DIMENSION};
use crate::coord::Coord2;
use crate::error::RaceError;
use crate::grid::Grid;
use crate::neighborhood::Dir4;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

/// Immutable wall/floor maze with fixed endpoints.
///
/// The start is always `(1, 1)` and the goal `(width - 2, height - 2)`; both
/// are guaranteed to be floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid<Tile>,
    start: Coord2,
    goal: Coord2,
}

impl Maze {
    /// Wraps a hand-built grid. Start and goal must be in bounds and floor.
    pub fn from_grid(grid: Grid<Tile>) -> Result<Self, RaceError> {
        if grid.width() < 3 || grid.height() < 3 {
            return Err(RaceError::InvalidMaze("maze must be at least 3x3"));
        }
        if grid.width() > MAX_DIMENSION || grid.height() > MAX_DIMENSION {
            return Err(RaceError::InvalidMaze("maze side exceeds the maximum dimension"));
        }
        let start = Coord2::new(1, 1);
        let goal = Coord2::new(grid.width() as i32 - 2, grid.height() as i32 - 2);
        let maze = Self { grid, start, goal };
        if !maze.is_floor(start) || !maze.is_floor(goal) {
            return Err(RaceError::InvalidMaze("start and goal must be floor"));
        }
        Ok(maze)
    }

    /// Parses rows of text where `#` is a wall and any other character is floor.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, RaceError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| !row.is_ascii()) {
            return Err(RaceError::InvalidMaze("maze rows must be ASCII"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(RaceError::InvalidMaze("maze rows must all have the same length"));
        }
        let grid = Grid::from_fn(width as u32, height as u32, |x, y| {
            match rows[y as usize].as_bytes()[x as usize] {
                b'#' => Tile::Wall,
                _ => Tile::Floor,
            }
        });
        Self::from_grid(grid)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    #[inline]
    pub fn start(&self) -> Coord2 {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord2 {
        self.goal
    }

    #[inline]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Out-of-bounds coordinates read as walls.
    pub fn tile(&self, coord: Coord2) -> Tile {
        self.grid.get(coord).copied().unwrap_or(Tile::Wall)
    }

    #[inline]
    pub fn is_floor(&self, coord: Coord2) -> bool {
        self.tile(coord) == Tile::Floor
    }

    /// Orthogonal floor neighbors in search order (down, right, up, left).
    pub fn floor_neighbors(&self, coord: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        Dir4::SEARCH_ORDER
            .into_iter()
            .map(move |dir| coord + dir.offset())
            .filter(move |next| self.is_floor(*next))
    }

    pub fn floor_count(&self) -> usize {
        self.grid.cells().iter().filter(|t| **t == Tile::Floor).count()
    }

    /// Number of orthogonally adjacent floor pairs.
    pub fn edge_count(&self) -> usize {
        self.grid
            .iter_coords()
            .filter(|(_, tile)| **tile == Tile::Floor)
            .map(|(c, _)| {
                [Dir4::East, Dir4::South]
                    .into_iter()
                    .filter(|dir| self.is_floor(c + dir.offset()))
                    .count()
            })
            .sum()
    }
}

/// Carves a perfect maze with an explicit-stack backtracker, then braids it.
pub fn generate(config: &MazeConfig, rng: &mut impl RngCore) -> Result<Maze, RaceError> {
    config.validate()?;

    let mut grid = Grid::new_filled(config.cols, config.rows, Tile::Wall);
    carve_passages(&mut grid, rng);
    let braided = braid(&mut grid, config.shortcut_rate, rng);

    let start = Coord2::new(1, 1);
    let goal = Coord2::new(config.cols as i32 - 2, config.rows as i32 - 2);
    grid.set(start, Tile::Floor);
    grid.set(goal, Tile::Floor);

    let maze = Maze { grid, start, goal };
    debug!(
        "generated {}x{} maze: {} floor cells, {} shortcuts",
        config.cols,
        config.rows,
        maze.floor_count(),
        braided
    );
    Ok(maze)
}

fn carve_passages(grid: &mut Grid<Tile>, rng: &mut impl RngCore) {
    let origin = Coord2::new(1, 1);
    grid.set(origin, Tile::Floor);
    let mut stack: Vec<Coord2> = alloc::vec![origin];

    while let Some(&current) = stack.last() {
        let mut dirs = Dir4::ALL;
        shuffle(&mut dirs, rng);

        let next = dirs.into_iter().find(|dir| {
            let target = current + dir.offset() * 2;
            is_interior(grid, target) && grid.get(target) == Some(&Tile::Wall)
        });

        match next {
            Some(dir) => {
                let target = current + dir.offset() * 2;
                grid.set(current + dir.offset(), Tile::Floor);
                grid.set(target, Tile::Floor);
                stack.push(target);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Opens walls that already touch two floor cells, skipping the outer two rings.
fn braid(grid: &mut Grid<Tile>, rate: f32, rng: &mut impl RngCore) -> usize {
    let mut opened = 0usize;
    for y in 2..grid.height() as i32 - 2 {
        for x in 2..grid.width() as i32 - 2 {
            let c = Coord2::new(x, y);
            if grid.get(c) != Some(&Tile::Wall) || !chance(rng, rate) {
                continue;
            }
            let floors = Dir4::ALL
                .into_iter()
                .filter(|dir| grid.get(c + dir.offset()) == Some(&Tile::Floor))
                .count();
            if floors >= 2 {
                grid.set(c, Tile::Floor);
                opened += 1;
            }
        }
    }
    opened
}

fn is_interior(grid: &Grid<Tile>, c: Coord2) -> bool {
    c.x > 0 && c.y > 0 && c.x < grid.width() as i32 - 1 && c.y < grid.height() as i32 - 1
}

fn chance(rng: &mut impl RngCore, probability: f32) -> bool {
    (rng.next_u32() as f64 / 4_294_967_296.0) < probability as f64
}

fn shuffle<T>(items: &mut [T], rng: &mut impl RngCore) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_u32() as usize) % (i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flood::is_connected;
    use crate::testing::TestRng;

    const SIZES: [(u32, u32); 6] = [(5, 5), (7, 5), (5, 9), (11, 11), (21, 15), (31, 21)];

    fn border_is_wall(maze: &Maze) -> bool {
        let (w, h) = (maze.width() as i32, maze.height() as i32);
        maze.grid()
            .iter_coords()
            .filter(|(c, _)| c.x == 0 || c.y == 0 || c.x == w - 1 || c.y == h - 1)
            .all(|(_, tile)| *tile == Tile::Wall)
    }

    #[test]
    fn from_grid_rejects_oversized_side() {
        let grid = Grid::new_filled(MAX_DIMENSION + 2, 3, Tile::Floor);
        assert_eq!(
            Maze::from_grid(grid),
            Err(RaceError::InvalidMaze("maze side exceeds the maximum dimension"))
        );
        let grid = Grid::new_filled(MAX_DIMENSION, 3, Tile::Floor);
        assert_eq!(Maze::from_grid(grid).map(|m| m.width()), Ok(MAX_DIMENSION));
    }

    #[test]
    fn generate_rejects_bad_dimensions() {
        let mut rng = TestRng(1);
        assert_eq!(
            generate(&MazeConfig::new(6, 7), &mut rng),
            Err(RaceError::InvalidDimensions { cols: 6, rows: 7 })
        );
        assert_eq!(
            generate(&MazeConfig::new(3, 3), &mut rng),
            Err(RaceError::InvalidDimensions { cols: 3, rows: 3 })
        );
    }

    #[test]
    fn generate_endpoints_are_floor() {
        let mut rng = TestRng(5);
        let maze = generate(&MazeConfig::new(21, 15), &mut rng).unwrap();
        assert_eq!(maze.start(), Coord2::new(1, 1));
        assert_eq!(maze.goal(), Coord2::new(19, 13));
        assert!(maze.is_floor(maze.start()));
        assert!(maze.is_floor(maze.goal()));
    }

    #[test]
    fn generate_border_and_connectivity() {
        for seed in 0..20u64 {
            for (cols, rows) in SIZES {
                let mut rng = TestRng(seed);
                let maze = generate(&MazeConfig::new(cols, rows), &mut rng).unwrap();
                assert!(border_is_wall(&maze), "border breached seed={seed}");
                assert!(is_connected(&maze), "disconnected seed={seed}");
            }
        }
    }

    #[test]
    fn perfect_maze_is_a_tree() {
        for seed in 0..20u64 {
            for (cols, rows) in SIZES {
                let mut rng = TestRng(seed);
                let cfg = MazeConfig::new(cols, rows).with_shortcut_rate(0.0);
                let maze = generate(&cfg, &mut rng).unwrap();
                assert_eq!(maze.edge_count(), maze.floor_count() - 1);
                let lattice = ((cols - 1) / 2) * ((rows - 1) / 2);
                assert_eq!(maze.floor_count(), 2 * lattice as usize - 1);
            }
        }
    }

    #[test]
    fn braided_maze_keeps_invariants() {
        for seed in 0..20u64 {
            let mut rng = TestRng(seed);
            let cfg = MazeConfig::new(31, 21).with_shortcut_rate(0.3);
            let maze = generate(&cfg, &mut rng).unwrap();
            assert!(maze.edge_count() >= maze.floor_count() - 1);
            assert!(border_is_wall(&maze));
            assert!(is_connected(&maze));
        }
    }

    #[test]
    fn full_braiding_adds_cycles() {
        let mut rng = TestRng(11);
        let cfg = MazeConfig::new(21, 21).with_shortcut_rate(1.0);
        let maze = generate(&cfg, &mut rng).unwrap();
        assert!(maze.edge_count() > maze.floor_count() - 1);
        assert!(is_connected(&maze));
    }

    #[test]
    fn generate_is_deterministic_per_seed() {
        let cfg = MazeConfig::new(21, 15);
        let a = generate(&cfg, &mut TestRng(42)).unwrap();
        let b = generate(&cfg, &mut TestRng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generate_large_maze_without_recursion() {
        let mut rng = TestRng(3);
        let maze = generate(&MazeConfig::new(301, 301), &mut rng).unwrap();
        assert!(is_connected(&maze));
    }

    #[test]
    fn from_ascii_reads_walls() {
        let maze = Maze::from_ascii(&["#####", "#...#", "###.#", "###.#", "#####"]).unwrap();
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.goal(), Coord2::new(3, 3));
        assert_eq!(maze.floor_count(), 5);
        assert_eq!(maze.tile(Coord2::new(0, 0)), Tile::Wall);
        assert_eq!(maze.tile(Coord2::new(-1, 9)), Tile::Wall);
    }

    #[test]
    fn from_ascii_rejects_bad_shapes() {
        assert!(matches!(
            Maze::from_ascii(&["#####", "#..#", "#####"]),
            Err(RaceError::InvalidMaze(_))
        ));
        assert!(matches!(
            Maze::from_ascii(&["###", "###", "###"]),
            Err(RaceError::InvalidMaze(_))
        ));
        assert!(matches!(Maze::from_ascii(&[]), Err(RaceError::InvalidMaze(_))));
    }

    #[test]
    fn floor_neighbors_follow_search_order() {
        let maze = Maze::from_ascii(&["#####", "#...#", "#...#", "#...#", "#####"]).unwrap();
        let around: Vec<Coord2> = maze.floor_neighbors(Coord2::new(2, 2)).collect();
        assert_eq!(
            around,
            alloc::vec![
                Coord2::new(2, 3),
                Coord2::new(3, 2),
                Coord2::new(2, 1),
                Coord2::new(1, 2)
            ]
        );
        assert_eq!(maze.floor_neighbors(Coord2::new(1, 1)).count(), 2);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = TestRng(9);
        for _ in 0..50 {
            let mut dirs = Dir4::ALL;
            shuffle(&mut dirs, &mut rng);
            for dir in Dir4::ALL {
                assert!(dirs.contains(&dir));
            }
        }
    }
}
