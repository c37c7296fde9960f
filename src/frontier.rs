use alloc::collections::{BinaryHeap, VecDeque};
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::coord::Coord2;

/// Discovered-but-unexpanded cells, ordered by one of three disciplines.
#[derive(Clone, Debug)]
pub enum Frontier {
    /// FIFO: oldest insertion pops first.
    Queue(VecDeque<Coord2>),
    /// LIFO: newest insertion pops first.
    Stack(Vec<Coord2>),
    /// Minimum key pops first; equal keys pop in insertion order.
    Ranked(RankedQueue),
}

impl Frontier {
    pub fn queue() -> Self {
        Frontier::Queue(VecDeque::new())
    }

    pub fn stack() -> Self {
        Frontier::Stack(Vec::new())
    }

    pub fn ranked() -> Self {
        Frontier::Ranked(RankedQueue::default())
    }

    /// `key` is ignored by the queue and stack disciplines.
    pub fn push(&mut self, coord: Coord2, key: u32) {
        match self {
            Frontier::Queue(queue) => queue.push_back(coord),
            Frontier::Stack(stack) => stack.push(coord),
            Frontier::Ranked(ranked) => ranked.push(coord, key),
        }
    }

    pub fn pop(&mut self) -> Option<Coord2> {
        match self {
            Frontier::Queue(queue) => queue.pop_front(),
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Ranked(ranked) => ranked.pop(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Queue(queue) => queue.len(),
            Frontier::Stack(stack) => stack.len(),
            Frontier::Ranked(ranked) => ranked.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct RankedEntry {
    key: u32,
    seq: u64,
    coord: Coord2,
}

// BinaryHeap is a max-heap, so the comparison is reversed on (key, seq).
impl Ord for RankedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.key, other.seq).cmp(&(self.key, self.seq))
    }
}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue with an insertion sequence number as the secondary key.
#[derive(Clone, Debug, Default)]
pub struct RankedQueue {
    heap: BinaryHeap<RankedEntry>,
    next_seq: u64,
}

impl RankedQueue {
    pub fn push(&mut self, coord: Coord2, key: u32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(RankedEntry { key, seq, coord });
    }

    pub fn pop(&mut self) -> Option<Coord2> {
        self.heap.pop().map(|entry| entry.coord)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut frontier: Frontier) -> Vec<Coord2> {
        let mut out = Vec::new();
        while let Some(c) = frontier.pop() {
            out.push(c);
        }
        out
    }

    #[test]
    fn queue_is_fifo() {
        let mut f = Frontier::queue();
        f.push(Coord2::new(1, 0), 9);
        f.push(Coord2::new(2, 0), 0);
        assert_eq!(drain(f), alloc::vec![Coord2::new(1, 0), Coord2::new(2, 0)]);
    }

    #[test]
    fn stack_is_lifo() {
        let mut f = Frontier::stack();
        f.push(Coord2::new(1, 0), 0);
        f.push(Coord2::new(2, 0), 9);
        assert_eq!(f.len(), 2);
        assert_eq!(drain(f), alloc::vec![Coord2::new(2, 0), Coord2::new(1, 0)]);
    }

    #[test]
    fn ranked_pops_minimum_key() {
        let mut f = Frontier::ranked();
        f.push(Coord2::new(1, 0), 5);
        f.push(Coord2::new(2, 0), 1);
        f.push(Coord2::new(3, 0), 3);
        assert_eq!(
            drain(f),
            alloc::vec![Coord2::new(2, 0), Coord2::new(3, 0), Coord2::new(1, 0)]
        );
    }

    #[test]
    fn ranked_equal_keys_pop_in_insertion_order() {
        let mut f = Frontier::ranked();
        for x in 0..20 {
            f.push(Coord2::new(x, 0), 4);
        }
        f.push(Coord2::new(99, 0), 2);
        let order = drain(f);
        assert_eq!(order[0], Coord2::new(99, 0));
        let xs: Vec<i32> = order[1..].iter().map(|c| c.x).collect();
        assert_eq!(xs, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn empty_frontier_pops_none() {
        for mut f in [Frontier::queue(), Frontier::stack(), Frontier::ranked()] {
            assert!(f.is_empty());
            assert_eq!(f.pop(), None);
        }
    }
}
