use alloc::vec::Vec;

use crate::coord::Coord2;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::neighborhood::Dir4;

#[derive(Clone, Debug)]
pub struct FloodResult {
    pub cells: Vec<Coord2>,
    pub visited: Grid<bool>,
}

/// Collects every floor cell reachable from `start` by orthogonal moves.
pub fn flood_fill(maze: &Maze, start: Coord2) -> FloodResult {
    let mut visited = Grid::new_filled(maze.width(), maze.height(), false);
    let mut cells = Vec::new();

    if !maze.is_floor(start) {
        return FloodResult { cells, visited };
    }

    let mut stack = alloc::vec![start];
    visited.set(start, true);

    while let Some(current) = stack.pop() {
        cells.push(current);
        for dir in Dir4::ALL {
            let next = current + dir.offset();
            if !maze.is_floor(next) || visited.get(next).copied().unwrap_or(true) {
                continue;
            }
            visited.set(next, true);
            stack.push(next);
        }
    }

    FloodResult { cells, visited }
}

/// True when every floor cell is reachable from the maze start.
pub fn is_connected(maze: &Maze) -> bool {
    flood_fill(maze, maze.start()).cells.len() == maze.floor_count()
}
