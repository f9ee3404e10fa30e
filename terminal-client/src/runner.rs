use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use common::games::snake::{GameEvent, SessionSnapshot, SettingsPatch, SnakeSession, SnakeSettings};
use common::high_score::FileHighScoreStore;
use common::log;
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use crate::broadcaster::LocalBroadcaster;
use crate::config::{ClientConfig, ClientConfigManager};
use crate::input::{InputContext, SettingsCommand, UiCommand, map_key};
use crate::render::TerminalScreen;
use crate::settings_editor::SettingsEditor;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn run_game(
    config: ClientConfig,
    config_manager: ClientConfigManager,
    seed: u64,
) -> Result<(), String> {
    let mut screen = TerminalScreen::new();
    screen.setup()?;
    let result = run_loop(&mut screen, config, config_manager, seed).await;
    let restored = screen.restore();
    result.and(restored)
}

async fn run_loop(
    screen: &mut TerminalScreen,
    config: ClientConfig,
    config_manager: ClientConfigManager,
    seed: u64,
) -> Result<(), String> {
    let store = FileHighScoreStore::from_yaml_file(config.high_score_file.clone());
    let session = SnakeSession::new(config.snake.clone(), seed, Box::new(store));

    let (event_tx, event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let (snapshot_tx, mut snapshot_rx) = mpsc::unbounded_channel::<SessionSnapshot>();
    let mut session_handle = tokio::spawn(session.run(event_rx, LocalBroadcaster::new(snapshot_tx)));

    let stop_input = Arc::new(AtomicBool::new(false));
    let (key_tx, mut key_rx) = mpsc::unbounded_channel::<KeyEvent>();
    let input_handle = spawn_input_reader(key_tx, stop_input.clone());

    let mut latest: Option<SessionSnapshot> = None;
    let mut editor: Option<SettingsEditor> = None;

    loop {
        tokio::select! {
            snapshot = snapshot_rx.recv() => {
                let Some(snapshot) = snapshot else {
                    break;
                };
                screen.draw(&snapshot, editor.as_ref())?;
                latest = Some(snapshot);
            }
            key = key_rx.recv() => {
                let Some(key) = key else {
                    break;
                };
                let Some(current) = latest.as_ref() else {
                    continue;
                };
                let context = InputContext {
                    status: current.state.status(),
                    settings_open: editor.is_some(),
                };
                let Some(command) = map_key(&key, context) else {
                    continue;
                };

                match command {
                    UiCommand::Dispatch(events) => {
                        for event in events {
                            send_event(&event_tx, event)?;
                        }
                    }
                    UiCommand::OpenSettings => {
                        editor = Some(SettingsEditor::new(current.state.settings.clone()));
                    }
                    UiCommand::Settings(settings_command) => {
                        handle_settings_command(
                            settings_command,
                            &mut editor,
                            &event_tx,
                            &config,
                            &config_manager,
                        )?;
                    }
                    UiCommand::Quit => break,
                }
                screen.draw(current, editor.as_ref())?;
            }
            result = &mut session_handle => {
                stop_input.store(true, Ordering::Relaxed);
                return result
                    .map(|_| ())
                    .map_err(|e| format!("Game session failed: {}", e));
            }
        }
    }

    stop_input.store(true, Ordering::Relaxed);
    drop(event_tx);
    let final_state = session_handle
        .await
        .map_err(|e| format!("Game session failed: {}", e))?;
    log!("Leaving game with score {}", final_state.score);
    let _ = input_handle.await;
    Ok(())
}

fn handle_settings_command(
    command: SettingsCommand,
    editor: &mut Option<SettingsEditor>,
    event_tx: &mpsc::UnboundedSender<GameEvent>,
    config: &ClientConfig,
    config_manager: &ClientConfigManager,
) -> Result<(), String> {
    let Some(current) = editor.as_mut() else {
        return Ok(());
    };

    match command {
        SettingsCommand::SelectPrevious => current.select_previous(),
        SettingsCommand::SelectNext => current.select_next(),
        SettingsCommand::Decrease => current.adjust(false),
        SettingsCommand::Increase => current.adjust(true),
        SettingsCommand::Cancel => *editor = None,
        SettingsCommand::Apply => {
            if let Some(applied) = editor.take() {
                let settings = applied.into_settings();
                remember_settings(config, config_manager, &settings);
                send_event(event_tx, GameEvent::ApplySettings(SettingsPatch::from(settings)))?;
            }
        }
    }
    Ok(())
}

fn remember_settings(
    config: &ClientConfig,
    config_manager: &ClientConfigManager,
    settings: &SnakeSettings,
) {
    let updated = ClientConfig {
        snake: settings.clone(),
        ..config.clone()
    };
    if let Err(e) = config_manager.set_config(&updated) {
        log!("Failed to save settings: {}", e);
    }
}

fn send_event(event_tx: &mpsc::UnboundedSender<GameEvent>, event: GameEvent) -> Result<(), String> {
    event_tx
        .send(event)
        .map_err(|_| "Game session is no longer running".to_string())
}

/// crossterm reads block, so keys are polled on a blocking thread and forwarded.
fn spawn_input_reader(
    key_tx: mpsc::UnboundedSender<KeyEvent>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if key_tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    log!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
        }
    })
}
