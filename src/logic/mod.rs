use crate::core::{Board, GameError, GameResult, Move, Player};

/// 勝利ライン (横3・縦3・斜め2)
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // rows
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6], // columns
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8], // diagonals
    [6, 4, 2],
];

/// 合法手生成 (空きマスを番号順に列挙)
pub fn legal_moves(board: &Board) -> Vec<Move> {
    board.empty_cells().into_iter().map(Move).collect()
}

/// 指し手適用 (非破壊)。埋まっているマスと範囲外は拒否し、元の盤面は変えない
pub fn apply_move(board: &Board, mv: Move, player: Player) -> Result<Board, GameError> {
    if !board.is_empty(mv.index()) {
        return Err(GameError::InvalidMove { index: mv.index() });
    }
    let mut next = board.clone();
    next.place(mv.index(), player);
    next.last_move = Some(mv);
    Ok(next)
}

/// 勝利ラインを完成させたプレイヤーを探す
pub fn find_winner(board: &Board) -> Option<Player> {
    for player in [Player::Human, Player::Computer] {
        for line in WIN_LINES {
            if line.iter().all(|&i| board.cell(i) == Some(player)) {
                return Some(player);
            }
        }
    }
    None
}

/// 勝敗判定。勝ちの判定を引き分けより先に行う
/// (全マス埋まりでも勝利ラインがあれば勝ち)
pub fn evaluate(board: &Board) -> GameResult {
    if let Some(winner) = find_winner(board) {
        return GameResult::Won(winner);
    }
    if board.is_full() {
        return GameResult::Draw;
    }
    GameResult::InProgress
}
