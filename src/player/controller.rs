use crate::core::{Board, GameError, Move};

/// コンピュータ側プレイヤーのtrait
pub trait PlayerController {
    /// 盤面を読んで次の一手を返す。盤面そのものは変更しない
    fn choose_move(&mut self, board: &Board) -> Result<Move, GameError>;
    fn name(&self) -> &str;
}
