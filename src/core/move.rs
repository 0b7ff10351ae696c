use serde::{Deserialize, Serialize};
use std::fmt;

/// 指し手 (マス番号 0..9, 左上から行優先)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move(pub usize);

impl Move {
    pub fn from_row_col(row: usize, col: usize) -> Self {
        Move(row * 3 + col)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn row(self) -> usize {
        self.0 / 3
    }

    pub fn col(self) -> usize {
        self.0 % 3
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row() + 1, self.col() + 1)
    }
}
