use rand_core::RngCore;

use crate::coord::Coord2;
use crate::maze::Maze;

/// Deterministic LCG for seeded tests.
pub struct TestRng(pub u64);

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }
    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Start-to-goal walk over floor cells in unit orthogonal steps.
pub fn is_valid_path(maze: &Maze, path: &[Coord2]) -> bool {
    path.first() == Some(&maze.start())
        && path.last() == Some(&maze.goal())
        && path.iter().all(|c| maze.is_floor(*c))
        && path.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
}
