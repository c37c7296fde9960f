use crate::coord::Coord2;
use crate::race::RaceResult;
use crate::search::Algorithm;

/// Callbacks fired while a race is ticked.
pub trait RaceObserver {
    fn on_tick(&mut self, _tick: u32) {}
    fn on_search_finished(&mut self, _algorithm: Algorithm, _path: Option<&[Coord2]>) {}
    fn on_result(&mut self, _result: &RaceResult, _tick: u32) {}
}

pub struct NoOpRaceObserver;
impl RaceObserver for NoOpRaceObserver {}
