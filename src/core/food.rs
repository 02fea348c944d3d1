//! Food placement by rejection sampling.

use super::grid::{Cell, Grid};
use super::snake::Snake;
use rand::Rng;
use std::collections::HashSet;

/// Find a random empty cell for food (not occupied by the snake).
///
/// Returns `None` when the snake covers every cell, so the caller can end the
/// run instead of sampling forever.
pub fn place_food<R: Rng>(snake: &Snake, grid: &Grid, rng: &mut R) -> Option<Cell> {
    let occupied: HashSet<Cell> = snake
        .segments()
        .copied()
        .filter(|cell| grid.in_bounds(*cell))
        .collect();
    if occupied.len() >= grid.cell_count() {
        return None;
    }

    loop {
        let x = rng.gen_range(0..grid.size());
        let y = rng.gen_range(0..grid.size());
        let candidate = Cell::new(x, y);
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}
