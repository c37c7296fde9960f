#![no_std]

extern crate alloc;

pub mod config;
pub mod coord;
pub mod error;
pub mod flood;
pub mod frontier;
pub mod grid;
pub mod maze;
pub mod neighborhood;
pub mod observer;
pub mod race;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{MazeConfig, DEFAULT_SHORTCUT_RATE};
pub use coord::Coord2;
pub use error::RaceError;
pub use flood::{flood_fill, is_connected, FloodResult};
pub use grid::Grid;
pub use maze::{generate, Maze, Tile};
pub use neighborhood::Dir4;
pub use observer::{NoOpRaceObserver, RaceObserver};
pub use race::{Race, RacePhase, RaceResult, SearchSnapshot};
pub use search::{Algorithm, Search};
