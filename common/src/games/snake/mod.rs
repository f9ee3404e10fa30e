mod food;
mod game_state;
mod session;
mod settings;
mod snake;
mod types;

pub use food::{FOOD_PLACEMENT_ATTEMPTS, place_food};
pub use game_state::{GameEvent, SnakeGameState};
pub use session::{SessionSnapshot, SnakeSession};
pub use settings::{
    DEFAULT_BOARD_SIZE, DEFAULT_TICK_INTERVAL_MS, FAST_MODE_TICK_INTERVAL_MS,
    INITIAL_SNAKE_LENGTH, MAX_BOARD_DIMENSION, MAX_FOOD_COUNT, MAX_TICK_INTERVAL_MS,
    MIN_BOARD_WIDTH, MIN_FOOD_COUNT, MIN_TICK_INTERVAL_MS, MULTIPLE_FOOD_DEFAULT_COUNT,
    SettingsPatch, SnakeSettings, is_hex_color,
};
pub use snake::Snake;
pub use types::{BoardSize, CellType, DeathReason, Direction, FruitType, GameMode, GameStatus, Point};
