use crate::coord::Coord2;

/// 4-directional movement (Von Neumann neighborhood).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dir4 {
    North,
    East,
    South,
    West,
}

impl Dir4 {
    pub const ALL: [Dir4; 4] = [Dir4::North, Dir4::East, Dir4::South, Dir4::West];

    /// Neighbor expansion order shared by every search: down, right, up, left.
    ///
    /// DFS pops these last-in-first-out, so the order decides which branch it
    /// commits to first.
    pub const SEARCH_ORDER: [Dir4; 4] = [Dir4::South, Dir4::East, Dir4::North, Dir4::West];

    #[inline]
    pub const fn offset(self) -> Coord2 {
        match self {
            Dir4::North => Coord2::new(0, -1),
            Dir4::East => Coord2::new(1, 0),
            Dir4::South => Coord2::new(0, 1),
            Dir4::West => Coord2::new(-1, 0),
        }
    }
}
