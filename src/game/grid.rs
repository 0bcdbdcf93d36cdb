use log::debug;
use rand::Rng;

use super::error::GameError;
use super::point::Point;

/// Rejection-sampling attempts allowed per board cell before
/// `random_empty_cell` falls back to enumerating the free cells.
const SAMPLES_PER_CELL: usize = 4;

/// What the grid itself stores for a cell. Snake occupancy is not kept
/// here; callers pass it in where it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Item,
}

/// Fixed-size board, row-major (`x + width * y`)
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    item: Option<usize>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            item: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a point is within the grid bounds
    pub fn is_in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width as i32 && p.y >= 0 && p.y < self.height as i32
    }

    /// Linear index of an in-bounds point
    pub fn cell_index(&self, p: Point) -> Result<usize, GameError> {
        if !self.is_in_bounds(p) {
            return Err(GameError::OutOfBounds {
                point: p,
                width: self.width,
                height: self.height,
            });
        }
        Ok(p.x as usize + self.width * p.y as usize)
    }

    fn point_at(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn cell(&self, p: Point) -> Result<Cell, GameError> {
        Ok(self.cells[self.cell_index(p)?])
    }

    /// Current item position, if one is placed
    pub fn item(&self) -> Option<Point> {
        self.item.map(|index| self.point_at(index))
    }

    /// Put the item at `p`, removing any previous one
    pub fn place_item(&mut self, p: Point) -> Result<(), GameError> {
        let index = self.cell_index(p)?;
        self.clear_item();
        self.cells[index] = Cell::Item;
        self.item = Some(index);
        Ok(())
    }

    pub fn clear_item(&mut self) {
        if let Some(index) = self.item.take() {
            self.cells[index] = Cell::Empty;
        }
    }

    /// True when neither the item nor anything `occupied` reports sits on `p`
    pub fn is_empty(&self, p: Point, occupied: impl Fn(Point) -> bool) -> Result<bool, GameError> {
        Ok(self.cell(p)? == Cell::Empty && !occupied(p))
    }

    fn free_cells<'a>(
        &'a self,
        occupied: &'a impl Fn(Point) -> bool,
    ) -> impl Iterator<Item = Point> + 'a {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| self.point_at(index))
            .filter(move |p| !occupied(*p))
    }

    /// Pick a uniformly random empty cell.
    ///
    /// Fails with [`GameError::BoardFull`] when every cell is taken.
    pub fn random_empty_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: impl Fn(Point) -> bool,
    ) -> Result<Point, GameError> {
        let free = self.free_cells(&occupied).count();
        if free == 0 {
            return Err(GameError::BoardFull);
        }

        for _ in 0..self.cells.len() * SAMPLES_PER_CELL {
            let p = Point::new(
                rng.gen_range(0..self.width) as i32,
                rng.gen_range(0..self.height) as i32,
            );
            if self.is_empty(p, &occupied)? {
                return Ok(p);
            }
        }

        debug!("sampling missed {} free cells, picking from the free list", free);
        let pick = rng.gen_range(0..free);
        self.free_cells(&occupied)
            .nth(pick)
            .ok_or(GameError::BoardFull)
    }
}
