use super::r#move::Move;
use super::types::Player;
use serde::{Deserialize, Serialize};

/// マスの数 (3×3)
pub const CELLS: usize = 9;

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 各マスの状態 (None = 空き), 行優先
    cells: [Option<Player>; CELLS],
    /// 直前の指し手 (描画用)
    pub last_move: Option<Move>,
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [None; CELLS],
            last_move: None,
        }
    }

    pub fn cell(&self, index: usize) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// マスを直接埋める。検証は logic::apply_move 側で行う
    pub(crate) fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = Some(player);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
