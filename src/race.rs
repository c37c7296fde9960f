use alloc::rc::Rc;
use alloc::vec::Vec;

use log::info;
use rand_core::RngCore;

use crate::config::MazeConfig;
use crate::coord::Coord2;
use crate::error::RaceError;
use crate::maze::{generate, Maze};
use crate::observer::{NoOpRaceObserver, RaceObserver};
use crate::search::{Algorithm, Search};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RacePhase {
    Created,
    Running,
    Finished,
}

/// Outcome of a race. Tie members are listed in [`Algorithm::ALL`] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaceResult {
    InProgress,
    Winner(Algorithm),
    Tie(Vec<Algorithm>),
    /// Every search finished and none reached the goal.
    NoWinner,
}

impl RaceResult {
    fn from_finishers(finishers: Vec<Algorithm>) -> Option<Self> {
        match finishers.len() {
            0 => None,
            1 => Some(RaceResult::Winner(finishers[0])),
            _ => Some(RaceResult::Tie(finishers)),
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, RaceResult::InProgress)
    }

    /// Algorithms credited with the win; empty while undecided or with no winner.
    pub fn winners(&self) -> &[Algorithm] {
        match self {
            RaceResult::Winner(algorithm) => core::slice::from_ref(algorithm),
            RaceResult::Tie(algorithms) => algorithms,
            RaceResult::InProgress | RaceResult::NoWinner => &[],
        }
    }
}

/// Read-only view of one contestant after the latest tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchSnapshot<'a> {
    pub algorithm: Algorithm,
    pub visited: &'a [Coord2],
    pub path: Option<&'a [Coord2]>,
    pub done: bool,
    pub frontier_len: usize,
    pub finished_at: Option<u32>,
}

/// One maze and four searches advanced in lockstep.
///
/// Each [`Race::tick`] steps every unfinished search exactly once. The first
/// tick on which any search reaches the goal decides the result: a single
/// finisher wins, several finishers tie. Later finishers never change it.
#[derive(Clone, Debug)]
pub struct Race {
    maze: Rc<Maze>,
    searches: [Search; 4],
    finished_at: [Option<u32>; 4],
    result: RaceResult,
    phase: RacePhase,
    ticks: u32,
}

impl Race {
    /// Generates a fresh maze and lines up all four searches on it.
    pub fn start(config: &MazeConfig, rng: &mut impl RngCore) -> Result<Self, RaceError> {
        let maze = generate(config, rng)?;
        Ok(Self::from_maze(maze))
    }

    pub fn from_maze(maze: Maze) -> Self {
        let maze = Rc::new(maze);
        let searches = Algorithm::ALL.map(|algorithm| Search::new(algorithm, &maze));
        Self {
            maze,
            searches,
            finished_at: [None; 4],
            result: RaceResult::InProgress,
            phase: RacePhase::Created,
            ticks: 0,
        }
    }

    /// Replaces the maze and every search. On error the current race is kept.
    pub fn restart(
        &mut self,
        config: &MazeConfig,
        rng: &mut impl RngCore,
    ) -> Result<(), RaceError> {
        *self = Self::start(config, rng)?;
        Ok(())
    }

    pub fn tick(&mut self) {
        self.tick_observed(&mut NoOpRaceObserver);
    }

    pub fn tick_observed(&mut self, observer: &mut impl RaceObserver) {
        if self.phase == RacePhase::Finished {
            return;
        }
        self.phase = RacePhase::Running;
        self.ticks += 1;
        observer.on_tick(self.ticks);

        let mut finishers = Vec::new();
        for search in self.searches.iter_mut().filter(|s| !s.is_done()) {
            search.step();
            if !search.is_done() {
                continue;
            }
            let algorithm = search.algorithm();
            self.finished_at[algorithm.index()] = Some(self.ticks);
            observer.on_search_finished(algorithm, search.path());
            if search.path().is_some() {
                finishers.push(algorithm);
            }
        }

        if !self.result.is_decided() {
            if let Some(result) = RaceResult::from_finishers(finishers) {
                self.declare(result, observer);
            }
        }

        if self.searches.iter().all(Search::is_done) {
            self.phase = RacePhase::Finished;
            if !self.result.is_decided() {
                self.reconcile(observer);
            }
        }
    }

    /// Ticks until every search is done and returns the final result.
    pub fn run_to_end(&mut self) -> &RaceResult {
        while self.phase != RacePhase::Finished {
            self.tick();
        }
        &self.result
    }

    // Searches that finish without a path never trigger the per-tick check.
    fn reconcile(&mut self, observer: &mut impl RaceObserver) {
        let finishers: Vec<Algorithm> = self
            .searches
            .iter()
            .filter(|s| s.path().is_some())
            .map(Search::algorithm)
            .collect();
        let result = RaceResult::from_finishers(finishers).unwrap_or(RaceResult::NoWinner);
        self.declare(result, observer);
    }

    fn declare(&mut self, result: RaceResult, observer: &mut impl RaceObserver) {
        match &result {
            RaceResult::Winner(algorithm) => info!("{algorithm} wins on tick {}", self.ticks),
            RaceResult::Tie(algorithms) => info!("tie on tick {}: {algorithms:?}", self.ticks),
            RaceResult::NoWinner => info!("no search reached the goal after {} ticks", self.ticks),
            RaceResult::InProgress => {}
        }
        observer.on_result(&result, self.ticks);
        self.result = result;
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    #[inline]
    pub fn result(&self) -> &RaceResult {
        &self.result
    }

    #[inline]
    pub fn search(&self, algorithm: Algorithm) -> &Search {
        &self.searches[algorithm.index()]
    }

    #[inline]
    pub fn searches(&self) -> &[Search] {
        &self.searches
    }

    pub fn visited(&self, algorithm: Algorithm) -> &[Coord2] {
        self.search(algorithm).visited()
    }

    pub fn path(&self, algorithm: Algorithm) -> Option<&[Coord2]> {
        self.search(algorithm).path()
    }

    pub fn is_done(&self, algorithm: Algorithm) -> bool {
        self.search(algorithm).is_done()
    }

    /// Tick on which `algorithm` became done, with or without a path.
    pub fn finished_at(&self, algorithm: Algorithm) -> Option<u32> {
        self.finished_at[algorithm.index()]
    }

    pub fn snapshot(&self, algorithm: Algorithm) -> SearchSnapshot<'_> {
        let search = self.search(algorithm);
        SearchSnapshot {
            algorithm,
            visited: search.visited(),
            path: search.path(),
            done: search.is_done(),
            frontier_len: search.frontier_len(),
            finished_at: self.finished_at(algorithm),
        }
    }
}
