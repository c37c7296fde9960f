use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaceError {
    /// Maze dimensions must both be odd and at least 5.
    InvalidDimensions { cols: u32, rows: u32 },
    InvalidConfig(&'static str),
    InvalidMaze(&'static str),
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::InvalidDimensions { cols, rows } => write!(
                f,
                "invalid maze dimensions {cols}x{rows}: both must be odd and between 5 and 65535"
            ),
            RaceError::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            RaceError::InvalidMaze(reason) => write!(f, "invalid maze: {reason}"),
        }
    }
}

impl core::error::Error for RaceError {}
