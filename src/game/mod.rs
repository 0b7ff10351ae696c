use crate::core::{Board, GameError, GameResult, Move, Player};
use crate::logic::{apply_move, evaluate};
use crate::player::ai::{Engine, HeuristicAI, MinimaxAI};
use crate::player::PlayerController;

/// 難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Easy,
    Impossible,
}

/// 対局の進行役。盤面と履歴を一手ごとに管理し、
/// 人間の着手が通ったら続けてコンピュータに指させる
pub struct Game {
    board: Board,
    mode: GameMode,
    engine: Engine,
    result: GameResult,
    history: Vec<(Player, Move)>,
    last_computer_move: Option<Move>,
    starting_player: Player,
}

impl Game {
    pub fn new(mode: GameMode, starting_player: Player) -> Result<Self, GameError> {
        let engine = match mode {
            GameMode::Easy => Engine::Heuristic(HeuristicAI::new(Player::Computer, "Easy AI")),
            GameMode::Impossible => {
                Engine::Minimax(MinimaxAI::new(Player::Computer, "Minimax AI"))
            }
        };

        let mut game = Game {
            board: Board::new(),
            mode,
            engine,
            result: GameResult::InProgress,
            history: Vec::new(),
            last_computer_move: None,
            starting_player,
        };

        // コンピュータが先手なら最初の半手をここで指す
        if starting_player == Player::Computer {
            game.computer_turn()?;
        }
        Ok(game)
    }

    /// 人間の着手。終了後の着手・埋まったマス・範囲外は拒否し、盤面は変えない。
    /// 続行中ならコンピュータが即座に応手する
    pub fn apply_human_move(&mut self, mv: Move) -> Result<(), GameError> {
        if self.result.is_over() {
            return Err(GameError::InvalidMove { index: mv.index() });
        }

        self.board = apply_move(&self.board, mv, Player::Human)?;
        self.history.push((Player::Human, mv));
        self.result = evaluate(&self.board);

        if self.result == GameResult::InProgress {
            self.computer_turn()?;
        }
        Ok(())
    }

    fn computer_turn(&mut self) -> Result<(), GameError> {
        let mv = self.engine.choose_move(&self.board)?;
        self.board = apply_move(&self.board, mv, Player::Computer)?;
        self.history.push((Player::Computer, mv));
        self.last_computer_move = Some(mv);
        self.result = evaluate(&self.board);
        Ok(())
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    pub fn history(&self) -> &[(Player, Move)] {
        &self.history
    }

    /// 直前のコンピュータの着手 (描画用)
    pub fn last_computer_move(&self) -> Option<Move> {
        self.last_computer_move
    }

    pub fn set_depth_limit(&mut self, limit: usize) {
        self.engine.set_depth_limit(limit);
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.engine.depth_limit()
    }

    /// ミニマックスが必勝を検出している時だけ Some になる参考値
    pub fn moves_until_forced_loss(&self) -> Option<u32> {
        self.engine.moves_until_win()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_move_triggers_computer_reply() {
        let mut game = Game::new(GameMode::Easy, Player::Human).unwrap();
        game.apply_human_move(Move(4)).unwrap();

        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[0], (Player::Human, Move(4)));
        assert_eq!(game.history()[1].0, Player::Computer);
        assert_eq!(game.board().move_count(), 2);
        assert!(game.last_computer_move().is_some());
        assert_eq!(game.result(), GameResult::InProgress);
    }

    #[test]
    fn computer_opens_when_starting() {
        let game = Game::new(GameMode::Impossible, Player::Computer).unwrap();
        assert_eq!(game.board().move_count(), 1);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].0, Player::Computer);
        assert!(game.last_computer_move().is_some());
    }

    #[test]
    fn occupied_cell_is_rejected_and_board_unchanged() {
        let mut game = Game::new(GameMode::Easy, Player::Human).unwrap();
        game.apply_human_move(Move(4)).unwrap();

        let before = game.board().clone();
        let err = game.apply_human_move(Move(4)).unwrap_err();
        assert_eq!(err, GameError::InvalidMove { index: 4 });
        assert_eq!(game.board(), &before);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut game = Game::new(GameMode::Easy, Player::Human).unwrap();
        let err = game.apply_human_move(Move(9)).unwrap_err();
        assert_eq!(err, GameError::InvalidMove { index: 9 });
        assert_eq!(game.board().move_count(), 0);
    }

    #[test]
    fn moves_after_game_over_are_rejected() {
        let mut game = Game::new(GameMode::Easy, Player::Human).unwrap();

        // Feed the first empty cell until the game reaches a terminal state.
        while game.result() == GameResult::InProgress {
            let idx = game.board().empty_cells()[0];
            game.apply_human_move(Move(idx)).unwrap();
        }

        let before = game.board().clone();
        assert!(game.apply_human_move(Move(0)).is_err());
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn depth_limit_roundtrip_and_clamp() {
        let mut game = Game::new(GameMode::Impossible, Player::Human).unwrap();
        assert_eq!(game.depth_limit(), Some(9));

        game.set_depth_limit(1);
        assert_eq!(game.depth_limit(), Some(1));
        game.set_depth_limit(42);
        assert_eq!(game.depth_limit(), Some(9));

        let easy = Game::new(GameMode::Easy, Player::Human).unwrap();
        assert_eq!(easy.depth_limit(), None);
    }

    #[test]
    fn easy_mode_reports_no_forced_loss() {
        let mut game = Game::new(GameMode::Easy, Player::Human).unwrap();
        game.apply_human_move(Move(0)).unwrap();
        assert_eq!(game.moves_until_forced_loss(), None);
    }
}
