#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use element::*;
pub use error::*;
pub use grid::*;
pub use puzzle::*;
pub use types::*;

mod board;
mod element;
mod error;
mod grid;
mod puzzle;
mod types;

/// Dimensions and initial edit state of a rectangular board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub modifiable: bool,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, modifiable: bool) -> Self {
        Self { size, modifiable }
    }

    pub fn new((size_x, size_y): Coord2, modifiable: bool) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        Self::new_unchecked((size_x, size_y), modifiable)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked((1, 1), true)
    }
}

/// Result of a modification-set update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

impl From<bool> for MarkOutcome {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::NoChange }
    }
}
