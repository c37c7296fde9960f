use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use log::trace;

use crate::coord::Coord2;
use crate::error::RaceError;
use crate::frontier::Frontier;
use crate::maze::Maze;
use crate::neighborhood::Dir4;

/// The four competing search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    AStar,
    Bfs,
    Dfs,
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Greedy,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::AStar => "A*",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Greedy => "Greedy",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    fn frontier(self) -> Frontier {
        match self {
            Algorithm::AStar | Algorithm::Greedy => Frontier::ranked(),
            Algorithm::Bfs => Frontier::queue(),
            Algorithm::Dfs => Frontier::stack(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const NONE_INDEX: u32 = u32::MAX;

/// Resumable search over one maze, advanced one expansion per [`Search::step`].
///
/// BFS, DFS and Greedy settle a cell's parent on first discovery. A* keeps
/// best-known costs and re-queues a cell whenever a strictly cheaper route
/// turns up; entries for cells that were already expanded are skipped when
/// they reach the front of the queue.
///
/// The maze is shared read-only with every other search of the same race.
#[derive(Clone, Debug)]
pub struct Search {
    algorithm: Algorithm,
    maze: Rc<Maze>,
    start: Coord2,
    goal: Coord2,
    width: u32,
    frontier: Frontier,
    discovered: Vec<bool>,
    visited: Vec<Coord2>,
    closed: Vec<bool>,
    came_from: Vec<u32>,
    g_scores: Vec<u32>,
    path: Option<Vec<Coord2>>,
    done: bool,
    steps: u32,
    expanded: u32,
}

impl Search {
    /// Search from the maze's start to its goal.
    pub fn new(algorithm: Algorithm, maze: &Rc<Maze>) -> Self {
        Self::build(algorithm, maze, maze.start(), maze.goal())
    }

    /// Search between arbitrary floor cells of `maze`.
    pub fn with_endpoints(
        algorithm: Algorithm,
        maze: &Rc<Maze>,
        start: Coord2,
        goal: Coord2,
    ) -> Result<Self, RaceError> {
        if !maze.is_floor(start) || !maze.is_floor(goal) {
            return Err(RaceError::InvalidMaze("search endpoints must be floor"));
        }
        Ok(Self::build(algorithm, maze, start, goal))
    }

    fn build(algorithm: Algorithm, maze: &Rc<Maze>, start: Coord2, goal: Coord2) -> Self {
        let size = maze.grid().len();
        let mut search = Self {
            algorithm,
            maze: Rc::clone(maze),
            start,
            goal,
            width: maze.width(),
            frontier: algorithm.frontier(),
            discovered: alloc::vec![false; size],
            visited: Vec::new(),
            closed: alloc::vec![false; size],
            came_from: alloc::vec![NONE_INDEX; size],
            g_scores: alloc::vec![u32::MAX; size],
            path: None,
            done: false,
            steps: 0,
            expanded: 0,
        };
        let start_idx = search.index_of(start);
        search.discovered[start_idx] = true;
        search.visited.push(start);
        search.g_scores[start_idx] = 0;
        let key = search.priority(start, 0);
        search.frontier.push(start, key);
        search
    }

    /// Performs one unit of work: pops a single cell and expands it.
    ///
    /// Calling `step` after the search is done has no effect.
    pub fn step(&mut self) {
        if self.done {
            return;
        }
        self.steps += 1;

        let Some(current) = self.pop_open() else {
            self.finish(None);
            return;
        };
        let current_idx = self.index_of(current);
        self.closed[current_idx] = true;
        self.expanded += 1;

        if current == self.goal {
            let path = self.reconstruct_path(current_idx);
            self.finish(Some(path));
            return;
        }

        for dir in Dir4::SEARCH_ORDER {
            let next = current + dir.offset();
            if !self.maze.is_floor(next) {
                continue;
            }
            match self.algorithm {
                Algorithm::AStar => self.relax(current_idx, next),
                _ => self.discover(current_idx, next),
            }
        }
    }

    fn pop_open(&mut self) -> Option<Coord2> {
        while let Some(coord) = self.frontier.pop() {
            if !self.closed[self.index_of(coord)] {
                return Some(coord);
            }
        }
        None
    }

    fn discover(&mut self, parent_idx: usize, next: Coord2) {
        let idx = self.index_of(next);
        if self.discovered[idx] {
            return;
        }
        self.mark_discovered(idx, next);
        self.came_from[idx] = parent_idx as u32;
        self.g_scores[idx] = self.g_scores[parent_idx].saturating_add(1);
        let key = self.priority(next, self.g_scores[idx]);
        self.frontier.push(next, key);
    }

    fn relax(&mut self, parent_idx: usize, next: Coord2) {
        let idx = self.index_of(next);
        if self.closed[idx] {
            return;
        }
        let tentative_g = self.g_scores[parent_idx].saturating_add(1);
        if tentative_g >= self.g_scores[idx] {
            return;
        }
        if !self.discovered[idx] {
            self.mark_discovered(idx, next);
        }
        self.g_scores[idx] = tentative_g;
        self.came_from[idx] = parent_idx as u32;
        let key = self.priority(next, tentative_g);
        self.frontier.push(next, key);
    }

    fn mark_discovered(&mut self, idx: usize, coord: Coord2) {
        self.discovered[idx] = true;
        self.visited.push(coord);
    }

    fn priority(&self, coord: Coord2, g: u32) -> u32 {
        let h = coord.manhattan_distance(self.goal);
        match self.algorithm {
            Algorithm::AStar => g.saturating_add(h),
            Algorithm::Greedy => h,
            Algorithm::Bfs | Algorithm::Dfs => 0,
        }
    }

    fn finish(&mut self, path: Option<Vec<Coord2>>) {
        trace!(
            "{} finished after {} steps, path length {:?}",
            self.algorithm,
            self.steps,
            path.as_ref().map(Vec::len)
        );
        self.path = path;
        self.done = true;
    }

    fn reconstruct_path(&self, goal_idx: usize) -> Vec<Coord2> {
        let mut reverse = Vec::new();
        let mut current = goal_idx;
        reverse.push(Coord2::from_index(current, self.width));

        loop {
            let parent = self.came_from[current];
            if parent == NONE_INDEX {
                break;
            }
            current = parent as usize;
            reverse.push(Coord2::from_index(current, self.width));
        }
        reverse.reverse();
        reverse
    }

    // Endpoints and floor neighbors are always in bounds.
    #[inline]
    fn index_of(&self, coord: Coord2) -> usize {
        coord.y as usize * self.width as usize + coord.x as usize
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn start(&self) -> Coord2 {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord2 {
        self.goal
    }

    /// Every cell discovered so far, in discovery order.
    #[inline]
    pub fn visited(&self) -> &[Coord2] {
        &self.visited
    }

    pub fn is_visited(&self, coord: Coord2) -> bool {
        coord
            .to_index(self.width)
            .and_then(|idx| self.discovered.get(idx).copied())
            .unwrap_or(false)
    }

    /// Start-to-goal path, present only once the goal has been reached.
    #[inline]
    pub fn path(&self) -> Option<&[Coord2]> {
        self.path.as_deref()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[inline]
    pub fn expanded(&self) -> u32 {
        self.expanded
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
