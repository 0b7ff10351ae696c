use crate::core::{Board, GameError, Move, Player};
use crate::logic::WIN_LINES;
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 「かんたん」用エンジン。リーチの完成/ブロックのみ読み、残りはランダム
pub struct HeuristicAI {
    pub player_id: Player,
    pub name: String,
    rng: StdRng,
}

impl HeuristicAI {
    pub fn new(player_id: Player, name: &str) -> Self {
        Self::with_rng(player_id, name, StdRng::from_entropy())
    }

    /// 乱数源を注入する (テストで選択を再現できるように)
    pub fn with_rng(player_id: Player, name: &str, rng: StdRng) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            rng,
        }
    }

    /// 自分のリーチを完成させるマス、なければ相手のリーチを塞ぐマスを探す。
    /// 自分側を先に調べる (勝てる時はブロックより勝ちを優先)
    fn win_or_block(&self, board: &Board) -> Option<Move> {
        for player in [self.player_id, self.player_id.opponent()] {
            for line in WIN_LINES {
                let mut marks = 0;
                let mut empty = None;
                for idx in line {
                    match board.cell(idx) {
                        Some(p) if p == player => marks += 1,
                        Some(_) => {}
                        None => empty = Some(idx),
                    }
                }
                if marks == 2 {
                    if let Some(idx) = empty {
                        return Some(Move(idx));
                    }
                }
            }
        }
        None
    }
}

impl PlayerController for HeuristicAI {
    fn choose_move(&mut self, board: &Board) -> Result<Move, GameError> {
        if let Some(mv) = self.win_or_block(board) {
            return Ok(mv);
        }
        board
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .map(Move)
            .ok_or(GameError::NoAvailableMove)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::apply_move;

    fn seeded(seed: u64) -> HeuristicAI {
        HeuristicAI::with_rng(Player::Computer, "test", StdRng::seed_from_u64(seed))
    }

    fn board_with(human: &[usize], computer: &[usize]) -> Board {
        let mut board = Board::new();
        for &i in human {
            board = apply_move(&board, Move(i), Player::Human).unwrap();
        }
        for &i in computer {
            board = apply_move(&board, Move(i), Player::Computer).unwrap();
        }
        board
    }

    #[test]
    fn takes_win_over_block() {
        // Computer can complete the top row at 2; Human threatens at 5.
        let board = board_with(&[3, 4], &[0, 1]);
        let mv = seeded(1).choose_move(&board).unwrap();
        assert_eq!(mv, Move(2));
    }

    #[test]
    fn blocks_opponent_threat() {
        let board = board_with(&[0, 1], &[8]);
        let mv = seeded(2).choose_move(&board).unwrap();
        assert_eq!(mv, Move(2));
    }

    #[test]
    fn wins_at_cell_zero() {
        // The winning cell being index 0 must not be skipped.
        let board = board_with(&[4, 5], &[1, 2]);
        let mv = seeded(3).choose_move(&board).unwrap();
        assert_eq!(mv, Move(0));
    }

    #[test]
    fn blocks_at_cell_zero() {
        let board = board_with(&[1, 2], &[4]);
        let mv = seeded(4).choose_move(&board).unwrap();
        assert_eq!(mv, Move(0));
    }

    #[test]
    fn fallback_is_random_but_reproducible() {
        let board = board_with(&[4], &[0]);
        let first = seeded(42).choose_move(&board).unwrap();
        let second = seeded(42).choose_move(&board).unwrap();
        assert_eq!(first, second);
        assert!(board.is_empty(first.index()));
    }

    #[test]
    fn full_board_has_no_move() {
        let board = board_with(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        let err = seeded(5).choose_move(&board).unwrap_err();
        assert_eq!(err, GameError::NoAvailableMove);
    }
}
