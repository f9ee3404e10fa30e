use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::games::{SessionRng, SnapshotBroadcaster};
use crate::high_score::{HighScoreStore, HighScoreTracker};
use crate::log;
use super::game_state::{GameEvent, SnakeGameState};
use super::settings::SnakeSettings;

#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub state: SnakeGameState,
    pub tick: u64,
    pub high_score: u32,
    pub new_high_score: bool,
}

/// Owns one game and drives it: ticks on a timer while running, applies input events in order.
pub struct SnakeSession {
    state: SnakeGameState,
    rng: SessionRng,
    high_scores: HighScoreTracker,
    tick: u64,
}

impl SnakeSession {
    pub fn new(settings: SnakeSettings, seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        let mut rng = SessionRng::new(seed);
        let state = SnakeGameState::new(settings, &mut rng);
        Self::from_state(state, rng, HighScoreTracker::new(store))
    }

    pub fn from_state(state: SnakeGameState, rng: SessionRng, high_scores: HighScoreTracker) -> Self {
        Self {
            state,
            rng,
            high_scores,
            tick: 0,
        }
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    /// Applies one event. Returns true when it ended the game with a new high score.
    pub fn dispatch(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::Tick if self.state.is_running() => self.tick += 1,
            GameEvent::Reset | GameEvent::ApplySettings(_) => self.tick = 0,
            _ => {}
        }

        let was_over = self.state.game_over;
        self.state = self.state.clone().apply(event, &mut self.rng);

        if !was_over && self.state.game_over {
            return self.high_scores.record(self.state.score);
        }
        false
    }

    pub fn snapshot(&self, new_high_score: bool) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            tick: self.tick,
            high_score: self.high_scores.best(),
            new_high_score,
        }
    }

    /// Runs until `events` closes and returns the last state.
    pub async fn run<B: SnapshotBroadcaster>(
        mut self,
        mut events: mpsc::UnboundedReceiver<GameEvent>,
        broadcaster: B,
    ) -> SnakeGameState {
        log!("Snake session started with seed {}", self.rng.seed());
        broadcaster.broadcast_state(self.snapshot(false)).await;

        let mut armed_period = self.state.settings.tick_interval();
        let mut ticker = arm_ticker(armed_period);
        let mut was_running = self.state.is_running();

        loop {
            let running = self.state.is_running();
            let event = tokio::select! {
                _ = ticker.tick(), if running => GameEvent::Tick,
                received = events.recv() => match received {
                    Some(event) => event,
                    None => break,
                },
            };

            let new_high_score = self.dispatch(event);
            broadcaster
                .broadcast_state(self.snapshot(new_high_score))
                .await;

            let period = self.state.settings.tick_interval();
            let running = self.state.is_running();
            if period != armed_period || (running && !was_running) {
                ticker = arm_ticker(period);
                armed_period = period;
            }
            was_running = running;
        }

        log!(
            "Snake session finished after {} ticks, score {}",
            self.tick,
            self.state.score
        );
        self.state
    }
}

/// First tick fires one full period from now.
fn arm_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
