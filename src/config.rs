use crate::error::RaceError;

pub const MIN_DIMENSION: u32 = 5;
/// Largest accepted side. Keeps coordinates within `i32` and every cell
/// index within `u32`.
pub const MAX_DIMENSION: u32 = 65_535;
pub const DEFAULT_SHORTCUT_RATE: f32 = 0.10;

/// Parameters for one generated maze.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    pub cols: u32,
    pub rows: u32,
    /// Probability that an eligible interior wall is knocked through.
    pub shortcut_rate: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cols: 31,
            rows: 21,
            shortcut_rate: DEFAULT_SHORTCUT_RATE,
        }
    }
}

impl MazeConfig {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn with_shortcut_rate(mut self, shortcut_rate: f32) -> Self {
        self.shortcut_rate = shortcut_rate;
        self
    }

    pub fn validate(&self) -> Result<(), RaceError> {
        let valid = |n: u32| (MIN_DIMENSION..=MAX_DIMENSION).contains(&n) && n % 2 == 1;
        if !valid(self.cols) || !valid(self.rows) {
            return Err(RaceError::InvalidDimensions {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if !(0.0..=1.0).contains(&self.shortcut_rate) {
            return Err(RaceError::InvalidConfig("shortcut_rate must lie in [0, 1]"));
        }
        Ok(())
    }
}
