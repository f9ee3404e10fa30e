use std::io::{Stdout, Write, stdout};

use common::games::snake::{CellType, FruitType, GameStatus, SessionSnapshot};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::settings_editor::{SettingsEditor, SettingsField};

const BORDER_COLOR: Color = Color::DarkGrey;
const TEXT_COLOR: Color = Color::White;
const HIGHLIGHT_COLOR: Color = Color::Yellow;

/// Owns stdout for the lifetime of the game screen.
pub struct TerminalScreen {
    stdout: Stdout,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<(), String> {
        execute!(self.stdout, EnterAlternateScreen, Hide)
            .map_err(|e| format!("Failed to enter game screen: {}", e))?;
        terminal::enable_raw_mode().map_err(|e| format!("Failed to enable raw mode: {}", e))
    }

    pub fn restore(&mut self) -> Result<(), String> {
        terminal::disable_raw_mode().map_err(|e| format!("Failed to disable raw mode: {}", e))?;
        execute!(self.stdout, ResetColor, Show, LeaveAlternateScreen)
            .map_err(|e| format!("Failed to leave game screen: {}", e))
    }

    pub fn draw(
        &mut self,
        snapshot: &SessionSnapshot,
        editor: Option<&SettingsEditor>,
    ) -> Result<(), String> {
        self.queue_frame(snapshot, editor)
            .and_then(|_| self.stdout.flush())
            .map_err(|e| format!("Failed to draw frame: {}", e))
    }

    fn queue_frame(
        &mut self,
        snapshot: &SessionSnapshot,
        editor: Option<&SettingsEditor>,
    ) -> std::io::Result<()> {
        let state = &snapshot.state;
        let width = state.board_size.width as u16;
        let height = state.board_size.height as u16;
        let snake_color = parse_hex_color(&state.settings.snake_color).unwrap_or(Color::Green);

        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0), SetForegroundColor(TEXT_COLOR))?;
        queue!(self.stdout, Print(header_line(snapshot)))?;

        let border = format!("+{}+", "-".repeat(width as usize * 2));
        queue!(
            self.stdout,
            MoveTo(0, 1),
            SetForegroundColor(BORDER_COLOR),
            Print(&border),
            MoveTo(0, height + 2),
            Print(&border)
        )?;

        for (y, row) in state.cell_grid().iter().enumerate() {
            let screen_y = y as u16 + 2;
            queue!(
                self.stdout,
                MoveTo(0, screen_y),
                SetForegroundColor(BORDER_COLOR),
                Print('|')
            )?;
            for cell in row {
                let (glyph, color) = cell_style(*cell, state.settings.fruit_type, snake_color);
                queue!(self.stdout, SetForegroundColor(color), Print(glyph))?;
            }
            queue!(self.stdout, SetForegroundColor(BORDER_COLOR), Print('|'))?;
        }

        let mut line = height + 4;
        for text in status_lines(snapshot) {
            queue!(
                self.stdout,
                MoveTo(0, line),
                SetForegroundColor(TEXT_COLOR),
                Print(text)
            )?;
            line += 1;
        }

        if let Some(editor) = editor {
            self.queue_settings_panel(editor, width * 2 + 4)?;
        }

        queue!(self.stdout, ResetColor)
    }

    fn queue_settings_panel(&mut self, editor: &SettingsEditor, left: u16) -> std::io::Result<()> {
        queue!(
            self.stdout,
            MoveTo(left, 1),
            SetForegroundColor(TEXT_COLOR),
            Print("Game Settings")
        )?;

        for (i, field) in SettingsField::ALL.iter().enumerate() {
            let selected = *field == editor.selected();
            let color = if !editor.is_enabled(*field) {
                BORDER_COLOR
            } else if selected {
                HIGHLIGHT_COLOR
            } else {
                TEXT_COLOR
            };
            let marker = if selected { ">" } else { " " };
            queue!(
                self.stdout,
                MoveTo(left, 3 + i as u16),
                SetForegroundColor(color),
                Print(format!("{} {:<12} {}", marker, field.label(), editor.value_text(*field)))
            )?;
        }

        queue!(
            self.stdout,
            MoveTo(left, 4 + SettingsField::ALL.len() as u16),
            SetForegroundColor(TEXT_COLOR),
            Print("Up/Down select | Left/Right change | Enter play | Esc cancel")
        )
    }
}

pub fn header_line(snapshot: &SessionSnapshot) -> String {
    format!(
        "Score: {}  High score: {}  Mode: {}",
        snapshot.state.score,
        snapshot.high_score,
        snapshot.state.settings.game_mode.label()
    )
}

pub fn status_lines(snapshot: &SessionSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    match snapshot.state.status() {
        GameStatus::NotStarted => lines.push("Press Enter to start".to_string()),
        GameStatus::Running => {}
        GameStatus::GameOver => {
            lines.push("Game Over!".to_string());
            if snapshot.new_high_score {
                lines.push(format!("New high score: {}", snapshot.high_score));
            }
            lines.push("Press Enter to play again".to_string());
        }
    }
    lines.push("Use Arrow Keys or WASD to move".to_string());
    lines.push("Enter start/reset | Esc settings | q quit".to_string());
    lines
}

/// Two columns per cell so the board looks square in a terminal.
pub fn cell_style(cell: CellType, fruit: FruitType, snake_color: Color) -> (&'static str, Color) {
    match cell {
        CellType::Empty => ("  ", Color::Reset),
        CellType::SnakeHead => ("██", snake_color),
        CellType::SnakeBody => ("▓▓", snake_color),
        CellType::Food => ("()", fruit_color(fruit)),
    }
}

pub fn fruit_color(fruit: FruitType) -> Color {
    match fruit {
        FruitType::Apple => Color::Red,
        FruitType::Banana => Color::Yellow,
        FruitType::Cherry => Color::DarkRed,
        FruitType::Grape => Color::Magenta,
        FruitType::Orange => Color::Rgb { r: 255, g: 152, b: 0 },
        FruitType::Strawberry => Color::Rgb { r: 233, g: 30, b: 99 },
    }
}

pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}
