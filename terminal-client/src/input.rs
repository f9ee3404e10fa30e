use common::games::snake::{Direction, GameEvent, GameStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Debug, PartialEq)]
pub enum SettingsCommand {
    SelectPrevious,
    SelectNext,
    Decrease,
    Increase,
    Apply,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    Dispatch(Vec<GameEvent>),
    OpenSettings,
    Settings(SettingsCommand),
    Quit,
}

#[derive(Clone, Copy, Debug)]
pub struct InputContext {
    pub status: GameStatus,
    pub settings_open: bool,
}

pub fn map_key(key: &KeyEvent, context: InputContext) -> Option<UiCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiCommand::Quit);
    }

    if context.settings_open {
        return map_settings_key(key.code).map(UiCommand::Settings);
    }

    match key.code {
        KeyCode::Enter => match context.status {
            GameStatus::NotStarted => Some(UiCommand::Dispatch(vec![GameEvent::Start])),
            GameStatus::GameOver => Some(UiCommand::Dispatch(vec![
                GameEvent::Reset,
                GameEvent::Start,
            ])),
            GameStatus::Running => None,
        },
        KeyCode::Esc => Some(UiCommand::OpenSettings),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiCommand::Quit),
        code => direction_for(code)
            .map(|direction| UiCommand::Dispatch(vec![GameEvent::ChangeDirection(direction)])),
    }
}

fn map_settings_key(code: KeyCode) -> Option<SettingsCommand> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(SettingsCommand::SelectPrevious),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(SettingsCommand::SelectNext),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(SettingsCommand::Decrease),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(SettingsCommand::Increase),
        KeyCode::Enter => Some(SettingsCommand::Apply),
        KeyCode::Esc => Some(SettingsCommand::Cancel),
        _ => None,
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}
