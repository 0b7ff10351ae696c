use std::fmt;

/// ゲーム操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// 埋まっているマス・範囲外・終了後の着手
    InvalidMove { index: usize },
    /// 満杯の盤面で手を要求された (呼び出し側の前提違反)
    NoAvailableMove,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidMove { index } => {
                write!(f, "invalid move: cell {} is not playable", index)
            }
            GameError::NoAvailableMove => {
                write!(f, "no available move: the board is full")
            }
        }
    }
}

impl std::error::Error for GameError {}
