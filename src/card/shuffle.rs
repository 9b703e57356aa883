//! Two-dimensional Fisher–Yates shuffle of a bingo grid.
//!
//! Rows are walked from last to first and, inside each row, columns from last
//! to first. For every visited cell `(i, j)` a row `m` in `[0, i]` and a column
//! `n` in `[0, j]` are drawn independently and the two cells are swapped.
//! Row 0 and column 0 are never the visited cell, only swap targets.
//!
//! This is not the same permutation distribution as flattening the grid and
//! running a single-pass shuffle, and the draw order (row, then column) is
//! significant for reproducing a given sequence.

use rand::Rng;

use super::bingo_card::{Grid, GRID_SIZE};

/// Source of uniformly distributed indices used by [`shuffle_grid`]
pub trait RandomIndex {
    /// Returns an index in `0..=max`
    fn up_to(&mut self, max: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomIndex for R {
    fn up_to(&mut self, max: usize) -> usize {
        self.random_range(0..=max)
    }
}

/// Permutes the cells of `grid` in place.
pub fn shuffle_grid<T, S: RandomIndex + ?Sized>(grid: &mut Grid<T>, source: &mut S) {
    for i in (1..GRID_SIZE).rev() {
        for j in (1..GRID_SIZE).rev() {
            let m = source.up_to(i);
            let n = source.up_to(j);
            grid.as_flattened_mut()
                .swap(i * GRID_SIZE + j, m * GRID_SIZE + n);
        }
    }
}
