use crossterm::event::{self, Event, KeyCode};
use crossterm::{cursor, execute, terminal};
use marubatsu_ai::core::{GameResult, Move, Player};
use marubatsu_ai::display::{render_board, DisplayState};
use marubatsu_ai::game::{Game, GameMode};
use marubatsu_ai::player::ai::{AIConfig, MAX_DEPTH};
use marubatsu_ai::selfplay::{run_selfplay, EngineChoice, SelfPlayConfig};
use std::io::{self, Write};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run();

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn run() -> anyhow::Result<()> {
    let config = AIConfig::load_or_default();

    loop {
        clear_screen()?;
        print!("=== Marubatsu AI (Tic-Tac-Toe) ===\r\n");
        print!("\r\nSelect mode:\r\n");
        print!("1. Play vs Computer (Easy)\r\n");
        print!("2. Play vs Computer (Impossible)\r\n");
        print!("3. Self-Play Benchmark\r\n");
        print!("q. Quit\r\n");
        io::stdout().flush()?;

        let choice = loop {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('1') => break "easy",
                        KeyCode::Char('2') => break "impossible",
                        KeyCode::Char('3') => break "selfplay",
                        KeyCode::Char('q') => return Ok(()),
                        _ => {}
                    }
                }
            }
        };

        match choice {
            "easy" => play_interactive(GameMode::Easy, &config)?,
            "impossible" => play_interactive(GameMode::Impossible, &config)?,
            _ => run_benchmark(&config)?,
        }
    }
}

fn play_interactive(mode: GameMode, config: &AIConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("Select who goes first:\r\n");
    print!("1. Human\r\n");
    print!("2. Computer\r\n");
    print!("q. Back\r\n");
    io::stdout().flush()?;

    let starting_player = loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') => break Player::Human,
                    KeyCode::Char('2') => break Player::Computer,
                    KeyCode::Char('q') => return Ok(()),
                    _ => {}
                }
            }
        }
    };

    let mut depth = config.search.default_depth_limit.clamp(1, MAX_DEPTH);

    // プレイし直しのループ
    loop {
        let mut game = Game::new(mode, starting_player)?;
        if mode == GameMode::Impossible {
            game.set_depth_limit(depth);
        }

        let mut state = DisplayState::new();
        state.starting_player = starting_player;
        state.status_msg = Some("Your turn".to_string());

        let play_again = loop {
            state.depth_limit = game.depth_limit();
            state.last_computer_move = game.last_computer_move();
            state.warning = warning_text(game.moves_until_forced_loss());

            if game.result().is_over() {
                state.show_cursor = false;
                state.status_msg = Some(result_text(game.result()).to_string());
                render_board(game.board(), &state);
                print!("\r\nPlay again? [y] Yes / [n] No\r\n");
                io::stdout().flush()?;

                break loop {
                    if event::poll(Duration::from_millis(100))? {
                        if let Event::Key(key) = event::read()? {
                            match key.code {
                                KeyCode::Char('y') => break true,
                                KeyCode::Char('n') | KeyCode::Char('q') => break false,
                                _ => {}
                            }
                        }
                    }
                };
            }

            render_board(game.board(), &state);
            print!("[Arrows]: Move | [Enter]: Place | [q]: Quit\r\n");
            io::stdout().flush()?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Up => {
                            if state.cursor >= 3 {
                                state.cursor -= 3;
                            }
                        }
                        KeyCode::Down => {
                            if state.cursor + 3 < 9 {
                                state.cursor += 3;
                            }
                        }
                        KeyCode::Left => {
                            if state.cursor % 3 > 0 {
                                state.cursor -= 1;
                            }
                        }
                        KeyCode::Right => {
                            if state.cursor % 3 < 2 {
                                state.cursor += 1;
                            }
                        }
                        KeyCode::Char(',') => {
                            if mode == GameMode::Impossible && depth > 1 {
                                depth -= 1;
                                game.set_depth_limit(depth);
                            }
                        }
                        KeyCode::Char('.') => {
                            if mode == GameMode::Impossible && depth < MAX_DEPTH {
                                depth += 1;
                                game.set_depth_limit(depth);
                            }
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            match game.apply_human_move(Move(state.cursor)) {
                                Ok(()) => {
                                    state.status_msg = Some("Your turn".to_string());
                                }
                                Err(_) => {
                                    state.status_msg =
                                        Some("That square is already taken".to_string());
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        };

        if !play_again {
            return Ok(());
        }
    }
}

fn warning_text(moves_until_loss: Option<u32>) -> Option<String> {
    match moves_until_loss {
        Some(1) => Some("You will lose in 1 move!".to_string()),
        Some(n) if n >= 2 => Some(format!("You will lose within {} moves!", n)),
        _ => None,
    }
}

fn result_text(result: GameResult) -> &'static str {
    match result {
        GameResult::Won(Player::Human) => "Well done. You won!",
        GameResult::Won(Player::Computer) => "Sorry. You lost!",
        GameResult::Draw => "It's a draw",
        GameResult::InProgress => "",
    }
}

fn run_benchmark(config: &AIConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("Select pairing (first vs second):\r\n");
    print!("1. Easy vs Easy\r\n");
    print!("2. Easy vs Impossible\r\n");
    print!("3. Impossible vs Easy\r\n");
    print!("4. Impossible vs Impossible\r\n");
    print!("q. Back\r\n");
    io::stdout().flush()?;

    let (first, second) = loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') => break (EngineChoice::Easy, EngineChoice::Easy),
                    KeyCode::Char('2') => break (EngineChoice::Easy, EngineChoice::Impossible),
                    KeyCode::Char('3') => break (EngineChoice::Impossible, EngineChoice::Easy),
                    KeyCode::Char('4') => {
                        break (EngineChoice::Impossible, EngineChoice::Impossible)
                    }
                    KeyCode::Char('q') => return Ok(()),
                    _ => {}
                }
            }
        }
    };

    let num_games = config.selfplay.num_games;
    clear_screen()?;
    print!(
        "Running {} games: {} vs {}...\r\n",
        num_games,
        first.label(),
        second.label()
    );
    io::stdout().flush()?;

    let stats = run_selfplay(&SelfPlayConfig {
        num_games,
        first,
        second,
        save_stats: true,
    })?;

    clear_screen()?;
    print!("=== Self-Play Results ===\r\n\r\n");
    print!("{} (first) vs {} (second)\r\n\r\n", stats.first_engine, stats.second_engine);
    print!(
        "First wins:  {} ({:.1}%)\r\n",
        stats.first_wins,
        stats.first_wins as f64 / stats.total_games as f64 * 100.0
    );
    print!(
        "Second wins: {} ({:.1}%)\r\n",
        stats.second_wins,
        stats.second_wins as f64 / stats.total_games as f64 * 100.0
    );
    print!(
        "Draws:       {} ({:.1}%)\r\n",
        stats.draws,
        stats.draws as f64 / stats.total_games as f64 * 100.0
    );
    print!("Avg moves: {:.1}\r\n", stats.avg_moves);
    print!("Avg time:  {:.2}ms\r\n", stats.avg_time_ms);
    print!("\r\nStats saved under selfplay_stats/\r\n");
    print!("Press any key to return\r\n");
    io::stdout().flush()?;

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}

fn clear_screen() -> anyhow::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    Ok(())
}
