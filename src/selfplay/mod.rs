use crate::core::{Board, GameError, GameResult, Player};
use crate::logic::{apply_move, evaluate};
use crate::player::ai::{HeuristicAI, MinimaxAI};
use crate::player::PlayerController;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// 自己対戦に使うエンジンの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineChoice {
    Easy,
    Impossible,
}

impl EngineChoice {
    fn build(self, player_id: Player, name: &str) -> Box<dyn PlayerController> {
        match self {
            EngineChoice::Easy => Box::new(HeuristicAI::new(player_id, name)),
            EngineChoice::Impossible => Box::new(MinimaxAI::new(player_id, name)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngineChoice::Easy => "Easy",
            EngineChoice::Impossible => "Impossible",
        }
    }
}

pub struct SelfPlayConfig {
    pub num_games: usize,
    /// 先手側のエンジン
    pub first: EngineChoice,
    /// 後手側のエンジン
    pub second: EngineChoice,
    pub save_stats: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RoundResult {
    pub winner: Option<Player>,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub first_engine: String,
    pub second_engine: String,
    pub games: Vec<RoundResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self {
            total_games: 0,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            first_engine: String::new(),
            second_engine: String::new(),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: RoundResult) {
        self.total_games += 1;
        match result.winner {
            Some(Player::Human) => self.first_wins += 1,
            Some(Player::Computer) => self.second_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

impl Default for SelfPlayStats {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    stats.first_engine = config.first.label().to_string();
    stats.second_engine = config.second.label().to_string();

    // 各対局は独立なので並列に走らせ、結果だけを集計する
    let results = (0..config.num_games)
        .into_par_iter()
        .map(|_| {
            let mut first = config.first.build(Player::Human, "AI-1");
            let mut second = config.second.build(Player::Computer, "AI-2");
            play_one_game(first.as_mut(), second.as_mut())
        })
        .collect::<Result<Vec<RoundResult>, GameError>>()?;

    for result in results {
        stats.add_result(result);
    }

    if config.save_stats {
        save_stats(&stats)?;
    }

    Ok(stats)
}

/// 1 対局を表示なしで進める。先手は Human 側のマークを使う
/// (エンジン自体は自分の player_id でしか盤面を見ない)
pub fn play_one_game<'a>(
    first: &'a mut dyn PlayerController,
    second: &'a mut dyn PlayerController,
) -> Result<RoundResult, GameError> {
    let start = Instant::now();
    let mut board = Board::new();
    let mut turn = Player::Human;
    let mut moves = 0;

    loop {
        match evaluate(&board) {
            GameResult::InProgress => {}
            GameResult::Won(winner) => {
                return Ok(RoundResult {
                    winner: Some(winner),
                    moves,
                    time_ms: start.elapsed().as_millis(),
                });
            }
            GameResult::Draw => {
                return Ok(RoundResult {
                    winner: None,
                    moves,
                    time_ms: start.elapsed().as_millis(),
                });
            }
        }

        let controller = match turn {
            Player::Human => &mut *first,
            Player::Computer => &mut *second,
        };
        let mv = controller.choose_move(&board)?;
        board = apply_move(&board, mv, turn)?;
        moves += 1;
        turn = turn.opponent();
    }
}

fn save_stats(stats: &SelfPlayStats) -> anyhow::Result<()> {
    let stats_dir = "selfplay_stats";
    std::fs::create_dir_all(stats_dir)?;

    let filename = format!(
        "{}/stats_{}.json",
        stats_dir,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    let file = std::fs::File::create(filename)?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn minimax_selfplay_always_draws() {
        // Optimal play on both sides can never produce a winner.
        for seed in 0..20 {
            let mut first =
                MinimaxAI::with_rng(Player::Human, "AI-1", StdRng::seed_from_u64(seed));
            let mut second =
                MinimaxAI::with_rng(Player::Computer, "AI-2", StdRng::seed_from_u64(seed + 1000));
            let result = play_one_game(&mut first, &mut second).unwrap();
            assert_eq!(result.winner, None, "seed {} produced a winner", seed);
            assert_eq!(result.moves, 9);
        }
    }

    #[test]
    fn minimax_never_loses_to_heuristic() {
        for seed in 0..20 {
            let mut first =
                HeuristicAI::with_rng(Player::Human, "AI-1", StdRng::seed_from_u64(seed));
            let mut second =
                MinimaxAI::with_rng(Player::Computer, "AI-2", StdRng::seed_from_u64(seed + 1000));
            let result = play_one_game(&mut first, &mut second).unwrap();
            assert_ne!(result.winner, Some(Player::Human), "seed {} lost", seed);
        }
    }

    #[test]
    fn forced_win_score_matches_remaining_moves() {
        // When the engine announces a win in N computer moves, replaying
        // optimal play on both sides must finish within that bound.
        use crate::core::Move;

        // Fork position: computer started, holds 0 and 4.
        let mut board = Board::new();
        for (idx, player) in [
            (0, Player::Computer),
            (1, Player::Human),
            (4, Player::Computer),
            (8, Player::Human),
        ] {
            board = apply_move(&board, Move(idx), player).unwrap();
        }

        let mut computer = MinimaxAI::with_rng(Player::Computer, "AI", StdRng::seed_from_u64(7));
        let outcome = computer.search(&board).unwrap();
        assert!(outcome.score > 0);
        let budget = computer.moves_until_win().unwrap();

        let mut adversary =
            MinimaxAI::with_rng(Player::Human, "adversary", StdRng::seed_from_u64(8));
        let mut turn = Player::Computer;
        let mut computer_moves = 0;

        let winner = loop {
            match evaluate(&board) {
                GameResult::InProgress => {}
                GameResult::Won(winner) => break Some(winner),
                GameResult::Draw => break None,
            }
            let mv = match turn {
                Player::Computer => {
                    computer_moves += 1;
                    computer.choose_move(&board).unwrap()
                }
                Player::Human => adversary.choose_move(&board).unwrap(),
            };
            board = apply_move(&board, mv, turn).unwrap();
            turn = turn.opponent();
        };

        assert_eq!(winner, Some(Player::Computer));
        // The first searched move is move 1; "moves until win" counts the
        // computer moves still needed after it.
        assert!(computer_moves <= budget as usize + 1);
    }

    #[test]
    fn stats_aggregation() {
        let mut stats = SelfPlayStats::new();
        stats.add_result(RoundResult {
            winner: Some(Player::Human),
            moves: 7,
            time_ms: 2,
        });
        stats.add_result(RoundResult {
            winner: None,
            moves: 9,
            time_ms: 4,
        });

        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.first_wins, 1);
        assert_eq!(stats.second_wins, 0);
        assert_eq!(stats.draws, 1);
        assert!((stats.avg_moves - 8.0).abs() < f64::EPSILON);
        assert!((stats.avg_time_ms - 3.0).abs() < f64::EPSILON);
    }
}
