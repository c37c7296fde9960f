use alloc::vec::Vec;

use crate::coord::Coord2;

/// 2D rectangular grid backed by a flat Vec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: u32,
    height: u32,
}

impl<T: Clone> Grid<T> {
    pub fn new_filled(width: u32, height: u32, fill: T) -> Self {
        let len = width as usize * height as usize;
        Self {
            cells: alloc::vec![fill; len],
            width,
            height,
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(i32, i32) -> T) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(f(x, y));
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coord2) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width as i32
            && coord.y < self.height as i32
    }

    pub fn coord_to_index(&self, coord: Coord2) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.y as usize * self.width as usize + coord.x as usize)
    }

    #[inline]
    pub fn index_to_coord(&self, index: usize) -> Coord2 {
        Coord2::from_index(index, self.width)
    }

    pub fn get(&self, coord: Coord2) -> Option<&T> {
        self.coord_to_index(coord).and_then(|i| self.cells.get(i))
    }

    /// Writes `value` at `coord`; out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: Coord2, value: T) {
        if let Some(index) = self.coord_to_index(coord) {
            self.cells[index] = value;
        }
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = (Coord2, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Coord2::from_index(index, self.width), cell))
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}
