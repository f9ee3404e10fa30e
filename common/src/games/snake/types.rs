use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(&self, direction: Direction) -> Point {
        match direction {
            Direction::Up => Point::new(self.x, self.y - 1),
            Direction::Down => Point::new(self.x, self.y + 1),
            Direction::Left => Point::new(self.x - 1, self.y),
            Direction::Right => Point::new(self.x + 1, self.y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: u32,
    pub height: u32,
}

impl BoardSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    /// Maps a point that left the board by one cell onto the opposite edge, per axis.
    pub fn wrap(&self, point: Point) -> Point {
        Point::new(
            wrap_axis(point.x, self.width),
            wrap_axis(point.y, self.height),
        )
    }
}

fn wrap_axis(value: i32, size: u32) -> i32 {
    let size = size as i32;
    if value < 0 {
        size - 1
    } else if value >= size {
        0
    } else {
        value
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Normal,
    NoWalls,
    MultipleFood,
    FastMode,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Normal,
        GameMode::NoWalls,
        GameMode::MultipleFood,
        GameMode::FastMode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::NoWalls => "No Walls",
            GameMode::MultipleFood => "Multiple Food",
            GameMode::FastMode => "Fast Mode",
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "normal" => Ok(GameMode::Normal),
            "no-walls" => Ok(GameMode::NoWalls),
            "multiple-food" => Ok(GameMode::MultipleFood),
            "fast-mode" => Ok(GameMode::FastMode),
            other => Err(format!(
                "unknown game mode '{}', expected normal, no-walls, multiple-food or fast-mode",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitType {
    Apple,
    Banana,
    Cherry,
    Grape,
    Orange,
    Strawberry,
}

impl FruitType {
    pub const ALL: [FruitType; 6] = [
        FruitType::Apple,
        FruitType::Banana,
        FruitType::Cherry,
        FruitType::Grape,
        FruitType::Orange,
        FruitType::Strawberry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FruitType::Apple => "Apple",
            FruitType::Banana => "Banana",
            FruitType::Cherry => "Cherry",
            FruitType::Grape => "Grape",
            FruitType::Orange => "Orange",
            FruitType::Strawberry => "Strawberry",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellType {
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    GameOver,
}
