use crate::core::{Board, Move, Player};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{stdout, Write};

pub struct DisplayState {
    /// カーソル位置 (マス番号)
    pub cursor: usize,
    pub show_cursor: bool,
    pub status_msg: Option<String>,
    /// ミニマックス対戦時のみ Some
    pub depth_limit: Option<usize>,
    /// 必勝警告 ("You will lose ...")
    pub warning: Option<String>,
    pub last_computer_move: Option<Move>,
    /// 先手のプレイヤー (先手が X を使う)
    pub starting_player: Player,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: 4, // 中央
            show_cursor: true,
            status_msg: None,
            depth_limit: None,
            warning: None,
            last_computer_move: None,
            starting_player: Player::Human,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 先手が X, 後手が O
pub fn mark_char(player: Player, starting_player: Player) -> char {
    if player == starting_player {
        'X'
    } else {
        'O'
    }
}

pub fn render_board(board: &Board, state: &DisplayState) {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
    .unwrap();

    print!("=== Marubatsu AI (Tic-Tac-Toe) ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }

    if let Some(depth) = state.depth_limit {
        print!("Calculation Depth: {}  [,] - / [.] +\r\n", depth);
    }
    if let Some(warning) = &state.warning {
        print!("{}\r\n", warning.clone().bold().red());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    // X軸ラベル
    print!("   ");
    for col in 0..3 {
        print!("  {} ", col + 1);
    }
    print!("\r\n");
    print!("   +---+---+---+\r\n");

    for row in 0..3 {
        print!(" {} |", row + 1);
        for col in 0..3 {
            let idx = row * 3 + col;
            let occupant = board.cell(idx);

            let is_cursor = state.show_cursor && state.cursor == idx;
            let is_last_computer = state.last_computer_move == Some(Move(idx));

            let ch = match occupant {
                Some(p) => mark_char(p, state.starting_player),
                None => ' ',
            };

            let (prefix, suffix) = if is_cursor {
                ('[', ']')
            } else if is_last_computer {
                ('{', '}')
            } else {
                (' ', ' ')
            };

            let cell_text = format!("{}{}{}", prefix, ch, suffix);

            if is_cursor {
                print!("{}", cell_text.yellow());
            } else if is_last_computer {
                print!("{}", cell_text.red());
            } else {
                match occupant {
                    Some(Player::Human) => print!("{}", cell_text.cyan()),
                    Some(Player::Computer) => print!("{}", cell_text.magenta()),
                    None => print!("{}", cell_text),
                }
            }
            print!("|");
        }
        print!("\r\n");
        print!("   +---+---+---+\r\n");
    }

    out.flush().unwrap();
}
