//! Hit Grid - O(1) coordinate to component lookup.
//!
//! The renderer fills the grid with the component index drawn at each cell.
//! Pointer dispatch reads it to find the target of an event that arrives with
//! coordinates only.

use std::cell::RefCell;

const EMPTY: usize = usize::MAX;

/// A grid for O(1) pointer hit detection.
///
/// Each cell contains the component index that occupies that position,
/// or nothing if empty.
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<usize>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = width as usize * height as usize;
        self.cells.resize(size, EMPTY);
        self.clear();
    }

    /// Clear all cells.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Forget every cell owned by a component.
    pub fn clear_index(&mut self, index: usize) {
        for cell in self.cells.iter_mut().filter(|cell| **cell == index) {
            *cell = EMPTY;
        }
    }

    /// Fill a rectangle with a component index, clipped to the grid.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, index: usize) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                let idx = cy as usize * self.width as usize + cx as usize;
                self.cells[idx] = index;
            }
        }
    }

    /// Get the component index at a position.
    pub fn get(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        match self.cells.get(idx).copied() {
            Some(EMPTY) | None => None,
            Some(value) => Some(value),
        }
    }
}

// =============================================================================
// GLOBAL HIT GRID
// =============================================================================

thread_local! {
    static HIT_GRID: RefCell<HitGrid> = RefCell::new(HitGrid::new(80, 24));
}

/// Resize the global hit grid.
pub fn resize_hit_grid(width: u16, height: u16) {
    HIT_GRID.with(|g| g.borrow_mut().resize(width, height));
}

/// Remove a component from the global hit grid.
pub fn clear_hit_index(index: usize) {
    HIT_GRID.with(|g| g.borrow_mut().clear_index(index));
}

/// Fill a rectangle in the global hit grid.
pub fn fill_hit_rect(x: u16, y: u16, width: u16, height: u16, index: usize) {
    HIT_GRID.with(|g| g.borrow_mut().fill_rect(x, y, width, height, index));
}

/// Get the component at a position from the global hit grid.
pub fn hit_test(x: u16, y: u16) -> Option<usize> {
    HIT_GRID.with(|g| g.borrow().get(x, y))
}

/// Reset the global hit grid to its initial 80x24 empty state (for testing).
pub fn reset_hit_grid() {
    HIT_GRID.with(|g| g.borrow_mut().resize(80, 24));
}
