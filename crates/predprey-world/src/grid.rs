//! 2D cell grid with a per-tick handled mask.

use predprey_core::{Cell, Error, Position, Result};

/// A rectangular grid of cells stored in row-major order.
///
/// Both buffers may be longer than `width * height`; the excess is spare
/// capacity kept from earlier, larger sizes.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    /// True if a cell was already processed in the current tick
    handled: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        let size = width * height;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
            handled: vec![false; size],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of logical cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cells the buffers can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Flat index of a position, rejecting anything outside the grid
    pub fn index_of(&self, pos: Position) -> Result<usize> {
        if !pos.within(self.width, self.height) {
            return Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.y as usize * self.width + pos.x as usize)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index % self.width) as i32;
        let y = (index / self.width) as i32;
        Position::new(x, y)
    }

    /// Get cell at position
    pub fn get(&self, pos: Position) -> Result<Cell> {
        let index = self.index_of(pos)?;
        Ok(self.cells[index])
    }

    /// Set cell at position
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let index = self.index_of(pos)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Cell at a flat index; the index must be below `len()`
    pub fn at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub(crate) fn put(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// The logical cells in raster order
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.len()]
    }

    pub fn is_handled(&self, index: usize) -> bool {
        self.handled[index]
    }

    pub(crate) fn mark_handled(&mut self, index: usize) {
        self.handled[index] = true;
    }

    pub(crate) fn clear_handled(&mut self) {
        let len = self.len();
        self.handled[..len].fill(false);
    }

    /// Change the logical size.
    ///
    /// Growing past the current capacity reallocates both buffers to
    /// `max(requested, 1.5 * capacity)` and leaves every cell empty. Otherwise
    /// the buffers are reused and cells whose coordinates exist in both sizes
    /// keep their state.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        check_dimensions(width, height)?;
        let size = width * height;

        if size > self.capacity() {
            let capacity = size.max(self.capacity() * 3 / 2);
            self.cells = vec![Cell::Empty; capacity];
            self.handled = vec![false; capacity];
        } else if (width, height) != (self.width, self.height) {
            self.relayout(width, height);
        }

        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Move overlapping cells to their new row stride in place, then empty
    /// everything outside the overlap.
    fn relayout(&mut self, width: usize, height: usize) {
        let (old_width, rows, cols) = (self.width, height.min(self.height), width.min(self.width));
        let copy = |cells: &mut Vec<Cell>, y: usize, x: usize| {
            cells[y * width + x] = cells[y * old_width + x];
        };

        // Narrowing moves cells towards the front, widening towards the back;
        // walk so no source is overwritten before it is read.
        if width <= old_width {
            for y in 0..rows {
                for x in 0..cols {
                    copy(&mut self.cells, y, x);
                }
            }
        } else {
            for y in (0..rows).rev() {
                for x in (0..cols).rev() {
                    copy(&mut self.cells, y, x);
                }
            }
        }

        let size = width * height;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let outside = index >= size || index % width >= cols || index / width >= rows;
            if outside {
                *cell = Cell::Empty;
            }
        }
        self.handled.fill(false);
    }

    /// Reset every cell to empty without touching capacity
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.handled.fill(false);
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions, in raster order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells()
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell))
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidConfig(format!(
            "grid must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(Error::InvalidConfig(format!(
            "grid dimensions {}x{} exceed the addressable range",
            width, height
        )));
    }
    Ok(())
}
