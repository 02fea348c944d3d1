//! The snake body and its movement rules.
//!
//! Whether a step grows the snake is decided by the caller, because it
//! depends on where the food is.

use super::constants::INITIAL_SNAKE_LEN;
use super::grid::{Cell, Direction, Grid};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments. Head is at the front (index 0).
    body: VecDeque<Cell>,
}

impl Snake {
    /// A three segment snake centred on the grid, head on the right.
    pub fn centered(grid: &Grid) -> Self {
        let center = grid.center();
        let body = (0..INITIAL_SNAKE_LEN as i16)
            .map(|i| Cell::new(center.x - i, center.y))
            .collect();
        Self { body }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for an
    /// empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Where the head would land after one step in `direction`.
    pub fn next_head(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Move one cell in `direction`. Exactly one cell is prepended; the tail
    /// is dropped unless `grow` is set. Returns the new head.
    pub fn advance(&mut self, direction: Direction, grow: bool) -> Cell {
        let new_head = self.next_head(direction);
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
        new_head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_snake_layout() {
        let snake = Snake::centered(&Grid::default());
        let cells: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert_eq!(snake.head(), Cell::new(10, 10));
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::new()).is_none());
        let snake = Snake::from_segments([Cell::new(1, 1)]).unwrap();
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let mut snake = Snake::centered(&Grid::default());
        let head = snake.advance(Direction::Right, false);
        assert_eq!(head, Cell::new(11, 10));
        assert_eq!(snake.len(), 3);
        assert!(!snake.contains(Cell::new(8, 10)), "tail should be dropped");
    }

    #[test]
    fn test_advance_with_growth_adds_one() {
        let mut snake = Snake::centered(&Grid::default());
        snake.advance(Direction::Up, true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(10, 9));
        assert!(snake.contains(Cell::new(8, 10)), "tail should be kept");
    }

    #[test]
    fn test_next_head_does_not_mutate() {
        let snake = Snake::centered(&Grid::default());
        assert_eq!(snake.next_head(Direction::Down), Cell::new(10, 11));
        assert_eq!(snake.head(), Cell::new(10, 10));
    }
}
