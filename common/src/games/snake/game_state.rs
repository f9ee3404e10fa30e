use std::collections::HashSet;

use crate::games::SessionRng;
use crate::log;
use super::food::place_food;
use super::settings::{INITIAL_SNAKE_LENGTH, SettingsPatch, SnakeSettings};
use super::snake::Snake;
use super::types::{BoardSize, CellType, DeathReason, Direction, GameStatus, Point};

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Start,
    Reset,
    ChangeDirection(Direction),
    Tick,
    UpdateSettings(SettingsPatch),
    /// Settings change followed by a fresh game, applied as one transition.
    ApplySettings(SettingsPatch),
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: HashSet<Point>,
    pub direction: Direction,
    pub score: u32,
    pub game_over: bool,
    pub game_started: bool,
    pub board_size: BoardSize,
    pub settings: SnakeSettings,
    pub game_end_reason: Option<DeathReason>,
}

impl SnakeGameState {
    /// Fresh game: a three-cell snake centered on the board heading right, plus food.
    pub fn new(settings: SnakeSettings, rng: &mut SessionRng) -> Self {
        let board_size = settings.board_size;
        let head = Point::new(
            (board_size.width / 2) as i32,
            (board_size.height / 2) as i32,
        );
        let snake = Snake::new(head, INITIAL_SNAKE_LENGTH);
        let food = place_food(
            board_size,
            &snake,
            &HashSet::new(),
            settings.target_food_count(),
            rng,
        )
        .into_iter()
        .collect();

        Self {
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            game_over: false,
            game_started: false,
            board_size,
            settings,
            game_end_reason: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.game_started {
            GameStatus::Running
        } else {
            GameStatus::NotStarted
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == GameStatus::Running
    }

    pub fn apply(self, event: GameEvent, rng: &mut SessionRng) -> Self {
        match event {
            GameEvent::Start => self.start(),
            GameEvent::Reset => Self::new(self.settings, rng),
            GameEvent::ChangeDirection(direction) => self.change_direction(direction),
            GameEvent::Tick => self.tick(rng),
            GameEvent::UpdateSettings(patch) => self.update_settings(patch),
            GameEvent::ApplySettings(patch) => {
                let updated = self.update_settings(patch);
                Self::new(updated.settings, rng)
            }
            GameEvent::GameOver => self.finish(DeathReason::Ended),
        }
    }

    fn start(self) -> Self {
        if self.status() != GameStatus::NotStarted {
            return self;
        }
        Self {
            game_started: true,
            ..self
        }
    }

    fn change_direction(self, direction: Direction) -> Self {
        if direction.is_opposite(&self.direction) {
            return self;
        }
        Self { direction, ..self }
    }

    fn update_settings(mut self, patch: SettingsPatch) -> Self {
        self.settings.apply_patch(patch);
        self.board_size = self.settings.board_size;
        log!(
            "Settings updated: mode {}, board {}x{}, {} ms per tick",
            self.settings.game_mode.label(),
            self.board_size.width,
            self.board_size.height,
            self.settings.tick_interval_ms
        );
        self
    }

    fn finish(self, reason: DeathReason) -> Self {
        if self.game_over {
            return self;
        }
        log!("Game over ({:?}) with score {}", reason, self.score);
        Self {
            game_over: true,
            game_started: false,
            game_end_reason: Some(reason),
            ..self
        }
    }

    pub fn next_head(&self) -> Point {
        let next = self.snake.head().step(self.direction);
        if self.settings.walls_enabled() {
            next
        } else {
            self.board_size.wrap(next)
        }
    }

    /// Checks `next_head` against walls and the body as it was before this tick.
    pub fn collision_at(&self, next_head: Point) -> Option<DeathReason> {
        if self.settings.walls_enabled() && !self.board_size.contains(next_head) {
            return Some(DeathReason::WallCollision);
        }
        if self.snake.blocks(&next_head) {
            return Some(DeathReason::SelfCollision);
        }
        None
    }

    fn tick(mut self, rng: &mut SessionRng) -> Self {
        if !self.is_running() {
            return self;
        }

        let next_head = self.next_head();
        if let Some(reason) = self.collision_at(next_head) {
            return self.finish(reason);
        }

        self.snake.push_head(next_head);

        if self.food.remove(&next_head) {
            self.score += 1;
            log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            let replacement = place_food(self.board_size, &self.snake, &self.food, 1, rng);
            self.food.extend(replacement);
        } else {
            self.snake.pop_tail();
        }

        self
    }

    pub fn cell_at(&self, point: Point) -> CellType {
        if self.food.contains(&point) {
            CellType::Food
        } else if self.snake.head() == point {
            CellType::SnakeHead
        } else if self.snake.occupies(&point) {
            CellType::SnakeBody
        } else {
            CellType::Empty
        }
    }

    /// Rows of cells, top to bottom. Off-board segments are not drawn.
    pub fn cell_grid(&self) -> Vec<Vec<CellType>> {
        (0..self.board_size.height as i32)
            .map(|y| {
                (0..self.board_size.width as i32)
                    .map(|x| self.cell_at(Point::new(x, y)))
                    .collect()
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn with_layout(
        settings: SnakeSettings,
        segments: &[(i32, i32)],
        food: &[(i32, i32)],
        direction: Direction,
    ) -> Self {
        Self {
            snake: Snake::from_segments(segments.iter().map(|&(x, y)| Point::new(x, y))),
            food: food.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            direction,
            score: 0,
            game_over: false,
            game_started: true,
            board_size: settings.board_size,
            settings,
            game_end_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{BoardSize, GameMode, MAX_FOOD_COUNT};

    fn settings(mode: GameMode) -> SnakeSettings {
        let mut settings = SnakeSettings::default();
        settings.set_game_mode(mode);
        settings
    }

    fn segments(state: &SnakeGameState) -> Vec<(i32, i32)> {
        state.snake.segments().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_new_state_is_centered_and_idle() {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng);

        assert_eq!(segments(&state), vec![(10, 10), (9, 10), (8, 10)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.food.len(), 1);
    }

    #[test]
    fn test_new_state_fits_every_valid_board() {
        let mut rng = SessionRng::new(5);
        for width in 4..=25 {
            for height in 1..=25 {
                let settings = SnakeSettings {
                    board_size: BoardSize::new(width, height),
                    ..settings(GameMode::MultipleFood)
                };
                let state = SnakeGameState::new(settings, &mut rng);

                assert!(state.snake.segments().all(|p| state.board_size.contains(*p)));
                assert!(state.food.iter().all(|f| state.board_size.contains(*f)));
                assert!(state.food.iter().all(|f| !state.snake.occupies(f)));
            }
        }
    }

    #[test]
    fn test_multiple_food_mode_places_food_count_cells() {
        let mut rng = SessionRng::new(11);
        let state = SnakeGameState::new(settings(GameMode::MultipleFood), &mut rng);
        assert_eq!(state.food.len(), 3);
    }

    #[test]
    fn test_tick_moves_snake_and_drops_tail() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::with_layout(
            SnakeSettings::default(),
            &[(10, 10), (9, 10), (8, 10)],
            &[(0, 0)],
            Direction::Right,
        );

        let state = state.apply(GameEvent::Tick, &mut rng);

        assert_eq!(segments(&state), vec![(11, 10), (10, 10), (9, 10)]);
        assert_eq!(state.score, 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_tick_onto_food_grows_and_replaces_food() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::with_layout(
            SnakeSettings::default(),
            &[(10, 10), (9, 10), (8, 10)],
            &[(11, 10)],
            Direction::Right,
        );

        let state = state.apply(GameEvent::Tick, &mut rng);

        assert_eq!(segments(&state), vec![(11, 10), (10, 10), (9, 10), (8, 10)]);
        assert_eq!(state.score, 1);
        assert_eq!(state.food.len(), 1);
        assert!(!state.food.contains(&Point::new(11, 10)));
        assert!(state.food.iter().all(|f| !state.snake.occupies(f)));
    }

    #[test]
    fn test_multiple_food_count_is_restored_after_eating() {
        let mut rng = SessionRng::new(2);
        let state = SnakeGameState::with_layout(
            settings(GameMode::MultipleFood),
            &[(10, 10), (9, 10), (8, 10)],
            &[(11, 10), (3, 3), (15, 4)],
            Direction::Right,
        );

        let state = state.apply(GameEvent::Tick, &mut rng);

        assert_eq!(state.score, 1);
        assert_eq!(state.food.len(), 3);
        assert!(state.food.contains(&Point::new(3, 3)));
        assert!(state.food.contains(&Point::new(15, 4)));
    }

    #[test]
    fn test_wall_collision_ends_game_without_moving() {
        let mut rng = SessionRng::new(1);
        let before = SnakeGameState::with_layout(
            SnakeSettings::default(),
            &[(19, 5), (18, 5), (17, 5)],
            &[(0, 0)],
            Direction::Right,
        );

        let after = before.clone().apply(GameEvent::Tick, &mut rng);

        assert!(after.game_over);
        assert!(!after.game_started);
        assert_eq!(after.game_end_reason, Some(DeathReason::WallCollision));
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.food, before.food);
        assert_eq!(after.score, before.score);
    }

    #[test]
    fn test_wall_collision_on_every_edge() {
        let cases = [
            ((0, 5), (1, 5), Direction::Left),
            ((5, 0), (5, 1), Direction::Up),
            ((5, 19), (5, 18), Direction::Down),
            ((19, 5), (18, 5), Direction::Right),
        ];
        for (head, neck, direction) in cases {
            let mut rng = SessionRng::new(1);
            let state = SnakeGameState::with_layout(
                SnakeSettings::default(),
                &[head, neck],
                &[(10, 10)],
                direction,
            );
            let state = state.apply(GameEvent::Tick, &mut rng);
            assert_eq!(state.status(), GameStatus::GameOver, "{:?}", direction);
        }
    }

    #[test]
    fn test_no_walls_mode_wraps_on_every_edge() {
        let cases = [
            ((19, 5), (18, 5), Direction::Right, (0, 5)),
            ((0, 5), (1, 5), Direction::Left, (19, 5)),
            ((5, 0), (5, 1), Direction::Up, (5, 19)),
            ((5, 19), (5, 18), Direction::Down, (5, 0)),
        ];
        for (head, neck, direction, expected) in cases {
            let mut rng = SessionRng::new(1);
            let state = SnakeGameState::with_layout(
                settings(GameMode::NoWalls),
                &[head, neck],
                &[(10, 10)],
                direction,
            );
            let state = state.apply(GameEvent::Tick, &mut rng);
            assert!(state.is_running());
            assert_eq!(segments(&state)[0], expected);
        }
    }

    #[test]
    fn test_moving_into_own_body_ends_game() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::with_layout(
            SnakeSettings::default(),
            &[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)],
            &[(0, 0)],
            Direction::Left,
        );

        let state = state.apply(GameEvent::Tick, &mut rng);

        assert!(state.game_over);
        assert_eq!(state.game_end_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_allowed() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::with_layout(
            SnakeSettings::default(),
            &[(5, 5), (5, 6), (4, 6), (4, 5)],
            &[(0, 0)],
            Direction::Left,
        );

        let state = state.apply(GameEvent::Tick, &mut rng);

        assert!(state.is_running());
        assert_eq!(segments(&state), vec![(4, 5), (5, 5), (5, 6), (4, 6)]);
    }

    #[test]
    fn test_reverse_direction_is_ignored() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng);

        let state = state.apply(GameEvent::ChangeDirection(Direction::Left), &mut rng);
        assert_eq!(state.direction, Direction::Right);

        let state = state.apply(GameEvent::ChangeDirection(Direction::Up), &mut rng);
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut rng = SessionRng::new(1);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng);
        let before = state.clone();

        let state = state.apply(GameEvent::Tick, &mut rng);

        assert_eq!(state, before);
    }

    #[test]
    fn test_lifecycle_start_game_over_reset() {
        let mut rng = SessionRng::new(3);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng);

        let state = state.apply(GameEvent::Start, &mut rng);
        assert_eq!(state.status(), GameStatus::Running);

        let state = state.apply(GameEvent::GameOver, &mut rng);
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.game_end_reason, Some(DeathReason::Ended));

        let state = state.apply(GameEvent::Start, &mut rng);
        assert_eq!(state.status(), GameStatus::GameOver);

        let state = state.apply(GameEvent::Reset, &mut rng);
        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_end_reason, None);
    }

    #[test]
    fn test_update_settings_replaces_board_immediately() {
        let mut rng = SessionRng::new(3);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng);

        let state = state.apply(
            GameEvent::UpdateSettings(SettingsPatch {
                board_size: Some(BoardSize::new(12, 12)),
                game_mode: Some(GameMode::FastMode),
                ..SettingsPatch::default()
            }),
            &mut rng,
        );

        assert_eq!(state.board_size, BoardSize::new(12, 12));
        assert_eq!(state.settings.tick_interval_ms, 80);
        assert_eq!(segments(&state), vec![(10, 10), (9, 10), (8, 10)]);

        let state = state.apply(GameEvent::Reset, &mut rng);
        assert_eq!(segments(&state), vec![(6, 6), (5, 6), (4, 6)]);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut rng = SessionRng::new(99);
            let mut state = SnakeGameState::new(settings(GameMode::MultipleFood), &mut rng)
                .apply(GameEvent::Start, &mut rng);
            for _ in 0..5 {
                state = state.apply(GameEvent::Tick, &mut rng);
                assert!(state.food.iter().all(|f| !state.snake.occupies(f)));
            }
            state
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_eating_after_mode_change_keeps_existing_food() {
        let mut rng = SessionRng::new(2);
        let state = SnakeGameState::with_layout(
            settings(GameMode::MultipleFood),
            &[(10, 10), (9, 10), (8, 10)],
            &[(11, 10), (3, 3), (15, 4)],
            Direction::Right,
        );

        let state = state
            .apply(
                GameEvent::UpdateSettings(SettingsPatch {
                    game_mode: Some(GameMode::Normal),
                    ..SettingsPatch::default()
                }),
                &mut rng,
            )
            .apply(GameEvent::Tick, &mut rng);

        assert_eq!(state.score, 1);
        assert_eq!(state.food.len(), 3);
        assert!(state.food.contains(&Point::new(3, 3)));
        assert!(state.food.contains(&Point::new(15, 4)));
        assert!(state.food.iter().all(|f| !state.snake.occupies(f)));
    }

    fn single_cell_game(mode: GameMode, rng: &mut SessionRng) -> SnakeGameState {
        SnakeGameState::new(settings(mode), rng)
            .apply(
                GameEvent::UpdateSettings(SettingsPatch {
                    board_size: Some(BoardSize::new(1, 1)),
                    ..SettingsPatch::default()
                }),
                rng,
            )
            .apply(GameEvent::Reset, rng)
            .apply(GameEvent::Start, rng)
    }

    #[test]
    fn test_single_cell_board_hits_wall_on_first_tick() {
        let mut rng = SessionRng::new(8);
        let mut state = single_cell_game(GameMode::Normal, &mut rng);

        assert_eq!(state.snake.head(), Point::new(0, 0));
        assert!(state.food.is_empty());
        assert!(state.is_running());

        for _ in 0..3 {
            state = state.apply(GameEvent::Tick, &mut rng);
            assert!(state.food.is_empty());
        }

        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.game_end_reason, Some(DeathReason::WallCollision));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_single_cell_board_without_walls_ends_in_self_collision() {
        let mut rng = SessionRng::new(8);
        let mut state = single_cell_game(GameMode::NoWalls, &mut rng);
        assert!(state.food.is_empty());

        state = state.apply(GameEvent::Tick, &mut rng);
        assert!(state.is_running());
        assert_eq!(state.snake.head(), Point::new(0, 0));

        for _ in 0..4 {
            state = state.apply(GameEvent::Tick, &mut rng);
            assert!(state.food.is_empty());
            assert!(state.food.iter().all(|f| !state.snake.occupies(f)));
        }

        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.game_end_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_crowded_board_keeps_food_off_the_snake() {
        let mut rng = SessionRng::new(21);
        let mut state = SnakeGameState::new(
            SnakeSettings {
                board_size: BoardSize::new(4, 2),
                food_count: MAX_FOOD_COUNT,
                ..settings(GameMode::MultipleFood)
            },
            &mut rng,
        )
        .apply(GameEvent::Start, &mut rng);

        for direction in [Direction::Up, Direction::Left, Direction::Left, Direction::Down] {
            state = state
                .apply(GameEvent::ChangeDirection(direction), &mut rng)
                .apply(GameEvent::Tick, &mut rng);
            assert!(state.food.len() <= MAX_FOOD_COUNT as usize);
            assert!(state.food.iter().all(|f| state.board_size.contains(*f)));
            assert!(state.food.iter().all(|f| !state.snake.occupies(f)));
        }
    }

    #[test]
    fn test_apply_settings_resets_in_one_transition() {
        let mut rng = SessionRng::new(3);
        let state = SnakeGameState::new(SnakeSettings::default(), &mut rng)
            .apply(GameEvent::Start, &mut rng)
            .apply(GameEvent::Tick, &mut rng);
        assert!(state.is_running());

        let state = state.apply(
            GameEvent::ApplySettings(SettingsPatch {
                board_size: Some(BoardSize::new(12, 12)),
                ..SettingsPatch::default()
            }),
            &mut rng,
        );

        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.board_size, BoardSize::new(12, 12));
        assert_eq!(segments(&state), vec![(6, 6), (5, 6), (4, 6)]);
        assert_eq!(state.food.len(), 1);
        assert!(state.food.iter().all(|f| state.board_size.contains(*f)));

        let state = state.apply(GameEvent::Tick, &mut rng);
        assert_eq!(segments(&state), vec![(6, 6), (5, 6), (4, 6)]);
    }

    #[test]
    fn test_cell_grid_marks_head_body_and_food() {
        let state = SnakeGameState::with_layout(
            SnakeSettings {
                board_size: BoardSize::new(4, 2),
                ..SnakeSettings::default()
            },
            &[(2, 0), (1, 0), (0, 0)],
            &[(3, 1)],
            Direction::Right,
        );

        let grid = state.cell_grid();

        assert_eq!(grid.len(), 2);
        assert_eq!(
            grid[0],
            vec![CellType::SnakeBody, CellType::SnakeBody, CellType::SnakeHead, CellType::Empty]
        );
        assert_eq!(
            grid[1],
            vec![CellType::Empty, CellType::Empty, CellType::Empty, CellType::Food]
        );
    }
}
