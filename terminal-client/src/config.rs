use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::SnakeSettings;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "snake_terminal_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub type ClientConfigManager =
    ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer>;

pub fn get_config_manager(path_override: Option<&str>) -> ClientConfigManager {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub snake: SnakeSettings,
    pub high_score_file: String,
    pub log_file: String,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        if self.high_score_file.trim().is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        if self.log_file.trim().is_empty() {
            return Err("log_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            snake: SnakeSettings::default(),
            high_score_file: "snake_high_score.yaml".to_string(),
            log_file: "snake_terminal.log".to_string(),
        }
    }
}
