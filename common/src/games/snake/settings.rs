use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{BoardSize, FruitType, GameMode};

pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const DEFAULT_BOARD_SIZE: BoardSize = BoardSize { width: 20, height: 20 };
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 150;
pub const FAST_MODE_TICK_INTERVAL_MS: u32 = 80;
pub const MULTIPLE_FOOD_DEFAULT_COUNT: u32 = 3;

pub const MIN_BOARD_WIDTH: u32 = INITIAL_SNAKE_LENGTH as u32 + 1;
pub const MAX_BOARD_DIMENSION: u32 = 100;
pub const MIN_FOOD_COUNT: u32 = 1;
pub const MAX_FOOD_COUNT: u32 = 5;
pub const MIN_TICK_INTERVAL_MS: u32 = 50;
pub const MAX_TICK_INTERVAL_MS: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub fruit_type: FruitType,
    pub game_mode: GameMode,
    pub food_count: u32,
    pub board_size: BoardSize,
    pub snake_color: String,
    pub tick_interval_ms: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            fruit_type: FruitType::Apple,
            game_mode: GameMode::Normal,
            food_count: 1,
            board_size: DEFAULT_BOARD_SIZE,
            snake_color: "#4caf50".to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SnakeSettings {
    /// Food cells kept on the board at once.
    pub fn target_food_count(&self) -> usize {
        match self.game_mode {
            GameMode::MultipleFood => self.food_count as usize,
            _ => 1,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    pub fn walls_enabled(&self) -> bool {
        self.game_mode != GameMode::NoWalls
    }

    /// Switches mode and resets food count and speed to that mode's defaults.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        self.game_mode = mode;
        self.food_count = match mode {
            GameMode::MultipleFood => MULTIPLE_FOOD_DEFAULT_COUNT,
            _ => 1,
        };
        self.tick_interval_ms = match mode {
            GameMode::FastMode => FAST_MODE_TICK_INTERVAL_MS,
            _ => DEFAULT_TICK_INTERVAL_MS,
        };
    }

    pub fn apply_patch(&mut self, patch: SettingsPatch) {
        if let Some(fruit_type) = patch.fruit_type {
            self.fruit_type = fruit_type;
        }
        if let Some(mode) = patch.game_mode {
            self.set_game_mode(mode);
        }
        if let Some(food_count) = patch.food_count {
            self.food_count = food_count.max(1);
        }
        if let Some(board_size) = patch.board_size {
            self.board_size = BoardSize::new(board_size.width.max(1), board_size.height.max(1));
        }
        if let Some(snake_color) = patch.snake_color {
            self.snake_color = snake_color;
        }
        if let Some(tick_interval_ms) = patch.tick_interval_ms {
            self.tick_interval_ms = tick_interval_ms.max(1);
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        let BoardSize { width, height } = self.board_size;
        if width < MIN_BOARD_WIDTH {
            return Err(format!("board width must be at least {}", MIN_BOARD_WIDTH));
        }
        if height < 1 {
            return Err("board height must be at least 1".to_string());
        }
        if width > MAX_BOARD_DIMENSION || height > MAX_BOARD_DIMENSION {
            return Err(format!(
                "board dimensions must not exceed {}x{}",
                MAX_BOARD_DIMENSION, MAX_BOARD_DIMENSION
            ));
        }
        if !(MIN_FOOD_COUNT..=MAX_FOOD_COUNT).contains(&self.food_count) {
            return Err(format!(
                "food_count must be between {} and {}",
                MIN_FOOD_COUNT, MAX_FOOD_COUNT
            ));
        }
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(format!(
                "tick_interval_ms must be between {} and {}",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS
            ));
        }
        if !is_hex_color(&self.snake_color) {
            return Err("snake_color must be a #rrggbb hex color".to_string());
        }
        Ok(())
    }
}

pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Partial settings update. Unset fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsPatch {
    pub fruit_type: Option<FruitType>,
    pub game_mode: Option<GameMode>,
    pub food_count: Option<u32>,
    pub board_size: Option<BoardSize>,
    pub snake_color: Option<String>,
    pub tick_interval_ms: Option<u32>,
}

impl From<SnakeSettings> for SettingsPatch {
    /// A full replacement. Mode defaults are overridden by the explicit count and speed.
    fn from(settings: SnakeSettings) -> Self {
        Self {
            fruit_type: Some(settings.fruit_type),
            game_mode: Some(settings.game_mode),
            food_count: Some(settings.food_count),
            board_size: Some(settings.board_size),
            snake_color: Some(settings.snake_color),
            tick_interval_ms: Some(settings.tick_interval_ms),
        }
    }
}
