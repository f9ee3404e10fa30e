use common::games::snake::{
    BoardSize, FruitType, GameMode, MAX_FOOD_COUNT, MIN_FOOD_COUNT, SnakeSettings,
};

pub const MIN_GRID_SIZE: u32 = 10;
pub const MAX_GRID_SIZE: u32 = 25;
pub const MIN_SPEED_MS: u32 = 50;
pub const MAX_SPEED_MS: u32 = 300;
pub const SPEED_STEP_MS: u32 = 10;

pub const SNAKE_COLORS: [&str; 6] = [
    "#4caf50", "#2196f3", "#ff9800", "#e91e63", "#9c27b0", "#ffeb3b",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Fruit,
    Mode,
    FoodCount,
    GridSize,
    SnakeColor,
    Speed,
}

impl SettingsField {
    pub const ALL: [SettingsField; 6] = [
        SettingsField::Fruit,
        SettingsField::Mode,
        SettingsField::FoodCount,
        SettingsField::GridSize,
        SettingsField::SnakeColor,
        SettingsField::Speed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Fruit => "Fruit Type",
            SettingsField::Mode => "Game Mode",
            SettingsField::FoodCount => "Food Count",
            SettingsField::GridSize => "Grid Size",
            SettingsField::SnakeColor => "Snake Color",
            SettingsField::Speed => "Game Speed",
        }
    }
}

/// Local copy of the settings edited in the panel. Nothing reaches the game until applied.
#[derive(Clone, Debug)]
pub struct SettingsEditor {
    settings: SnakeSettings,
    selected: usize,
}

impl SettingsEditor {
    pub fn new(settings: SnakeSettings) -> Self {
        Self { settings, selected: 0 }
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn into_settings(self) -> SnakeSettings {
        self.settings
    }

    pub fn selected(&self) -> SettingsField {
        SettingsField::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SettingsField::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + SettingsField::ALL.len() - 1) % SettingsField::ALL.len();
    }

    /// Food count only changes in multiple-food mode.
    pub fn is_enabled(&self, field: SettingsField) -> bool {
        field != SettingsField::FoodCount || self.settings.game_mode == GameMode::MultipleFood
    }

    pub fn adjust(&mut self, forward: bool) {
        let field = self.selected();
        if !self.is_enabled(field) {
            return;
        }

        match field {
            SettingsField::Fruit => {
                self.settings.fruit_type = cycle(&FruitType::ALL, &self.settings.fruit_type, forward);
            }
            SettingsField::Mode => {
                let mode = cycle(&GameMode::ALL, &self.settings.game_mode, forward);
                self.settings.set_game_mode(mode);
            }
            SettingsField::FoodCount => {
                self.settings.food_count =
                    step(self.settings.food_count, 1, forward, MIN_FOOD_COUNT, MAX_FOOD_COUNT);
            }
            SettingsField::GridSize => {
                let size = step(
                    self.settings.board_size.width,
                    1,
                    forward,
                    MIN_GRID_SIZE,
                    MAX_GRID_SIZE,
                );
                self.settings.board_size = BoardSize::new(size, size);
            }
            SettingsField::SnakeColor => {
                let current = self.settings.snake_color.as_str();
                let next = match SNAKE_COLORS.iter().position(|c| *c == current) {
                    Some(index) => cycle(&SNAKE_COLORS, &SNAKE_COLORS[index], forward),
                    None => SNAKE_COLORS[0],
                };
                self.settings.snake_color = next.to_string();
            }
            SettingsField::Speed => {
                self.settings.tick_interval_ms = step(
                    self.settings.tick_interval_ms,
                    SPEED_STEP_MS,
                    forward,
                    MIN_SPEED_MS,
                    MAX_SPEED_MS,
                );
            }
        }
    }

    pub fn value_text(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Fruit => self.settings.fruit_type.label().to_string(),
            SettingsField::Mode => self.settings.game_mode.label().to_string(),
            SettingsField::FoodCount => self.settings.food_count.to_string(),
            SettingsField::GridSize => format!(
                "{}x{}",
                self.settings.board_size.width, self.settings.board_size.height
            ),
            SettingsField::SnakeColor => self.settings.snake_color.clone(),
            SettingsField::Speed => format!("{}ms", self.settings.tick_interval_ms),
        }
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: &T, forward: bool) -> T {
    let index = items.iter().position(|item| item == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % items.len()
    } else {
        (index + items.len() - 1) % items.len()
    };
    items[next]
}

fn step(value: u32, amount: u32, forward: bool, min: u32, max: u32) -> u32 {
    let next = if forward {
        value.saturating_add(amount)
    } else {
        value.saturating_sub(amount)
    };
    next.clamp(min, max)
}
