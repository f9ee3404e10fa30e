use std::collections::HashSet;

use crate::games::SessionRng;
use super::snake::Snake;
use super::types::{BoardSize, Point};

pub const FOOD_PLACEMENT_ATTEMPTS: usize = 1000;

/// Picks up to `count` free cells at random. A slot that finds no free cell within
/// `FOOD_PLACEMENT_ATTEMPTS` samples is skipped, so a crowded board can return fewer.
pub fn place_food(
    board_size: BoardSize,
    snake: &Snake,
    existing_food: &HashSet<Point>,
    count: usize,
    rng: &mut SessionRng,
) -> Vec<Point> {
    let mut placed: Vec<Point> = Vec::with_capacity(count);
    if board_size.width == 0 || board_size.height == 0 {
        return placed;
    }

    for _ in 0..count {
        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let candidate = Point::new(
                rng.random_range(0..board_size.width as i32),
                rng.random_range(0..board_size.height as i32),
            );

            if snake.occupies(&candidate)
                || existing_food.contains(&candidate)
                || placed.contains(&candidate)
            {
                continue;
            }

            placed.push(candidate);
            break;
        }
    }

    placed
}
