use crate::core::{Board, GameError, GameResult, Move, Player};
use crate::logic::{apply_move, evaluate, legal_moves};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// 勝ちの基準スコア。深さ分を引いて早い勝ち・遅い負けを高く評価する
const WIN_SCORE: i32 = 10;

/// 探索深さの上限 (3×3 は最大 9 手で決着)
pub const MAX_DEPTH: usize = 9;

/// ルート探索 1 回の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_move: Option<Move>,
}

/// 「ぜったい勝てない」用エンジン。ゲーム木を全探索する (枝刈りなし)
pub struct MinimaxAI {
    pub player_id: Player,
    pub name: String,
    depth_limit: usize,
    last_score: Option<i32>,
    rng: StdRng,
}

impl MinimaxAI {
    pub fn new(player_id: Player, name: &str) -> Self {
        Self::with_rng(player_id, name, StdRng::from_entropy())
    }

    /// 乱数源を注入する (テストで選択を再現できるように)
    pub fn with_rng(player_id: Player, name: &str, rng: StdRng) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            depth_limit: MAX_DEPTH,
            last_score: None,
            rng,
        }
    }

    /// 探索深さの上限を 1..=9 に丸めて設定する。浅いほど弱くなる
    pub fn set_depth_limit(&mut self, limit: usize) {
        self.depth_limit = limit.clamp(1, MAX_DEPTH);
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// 直近の探索で必勝を検出していれば、相手が負けるまでの残り手数を返す。
    /// 参考値であり、実際の空きマス数とは突き合わせない
    pub fn moves_until_win(&self) -> Option<u32> {
        match self.last_score {
            Some(score) if score > 0 => Some((MAX_DEPTH as i32 - score) as u32 / 2),
            _ => None,
        }
    }

    /// ミニマックス探索本体。スコアだけを返し、最善手はルート側で決める
    fn minimax(&self, board: &Board, turn: Player, depth: usize) -> i32 {
        match evaluate(board) {
            GameResult::Won(winner) => {
                if winner == self.player_id {
                    WIN_SCORE - depth as i32
                } else {
                    depth as i32 - WIN_SCORE
                }
            }
            GameResult::Draw => 0,
            GameResult::InProgress => {
                // 深さ上限での打ち切り (勝敗の判定が先)
                if depth >= self.depth_limit {
                    return 0;
                }

                let maximizing = turn == self.player_id;
                let mut best = if maximizing { i32::MIN } else { i32::MAX };
                for mv in legal_moves(board) {
                    if let Ok(next) = apply_move(board, mv, turn) {
                        let score = self.minimax(&next, turn.opponent(), depth + 1);
                        best = if maximizing {
                            best.max(score)
                        } else {
                            best.min(score)
                        };
                    }
                }
                best
            }
        }
    }

    /// ルート局面の全候補手を採点し、最高スコアの手から一様に選ぶ
    pub fn search(&mut self, board: &Board) -> Result<SearchOutcome, GameError> {
        let moves = legal_moves(board);
        if moves.is_empty() {
            return Err(GameError::NoAvailableMove);
        }

        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            if let Ok(next) = apply_move(board, mv, self.player_id) {
                let score = self.minimax(&next, self.player_id.opponent(), 1);
                scored.push((mv, score));
            }
        }

        let best = scored.iter().map(|&(_, s)| s).max().unwrap_or(0);
        let candidates: Vec<Move> = scored
            .iter()
            .filter(|&&(_, s)| s == best)
            .map(|&(mv, _)| mv)
            .collect();
        let chosen = candidates.choose(&mut self.rng).copied();

        self.last_score = Some(best);
        Ok(SearchOutcome {
            score: best,
            best_move: chosen,
        })
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&mut self, board: &Board) -> Result<Move, GameError> {
        // 初手は対称性からどのマスも同価値なので、探索せずランダムに打つ
        if board.move_count() == 0 {
            self.last_score = None;
            return board
                .empty_cells()
                .choose(&mut self.rng)
                .copied()
                .map(Move)
                .ok_or(GameError::NoAvailableMove);
        }

        let outcome = self.search(board)?;
        outcome.best_move.ok_or(GameError::NoAvailableMove)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
