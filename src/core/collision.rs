//! Wall and self collision checks.

use super::grid::Grid;
use super::snake::Snake;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Wall,
    SelfBite,
}

impl CollisionKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfBite => "bit its own tail",
        }
    }
}

/// Check the head against the walls, then against every other segment.
/// The wall check runs first so an off-board head is never compared.
pub fn detect(snake: &Snake, grid: &Grid) -> Option<CollisionKind> {
    let head = snake.head();
    if !grid.in_bounds(head) {
        return Some(CollisionKind::Wall);
    }
    if snake.segments().skip(1).any(|&seg| seg == head) {
        return Some(CollisionKind::SelfBite);
    }
    None
}
