use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub best_score: u32,
    /// RFC 3339 timestamp of the game that set the record.
    pub achieved_at: String,
}

pub trait HighScoreStore: Send + Sync {
    fn load(&self) -> Result<Option<HighScoreRecord>, String>;
    fn save(&self, record: &HighScoreRecord) -> Result<(), String>;
}

pub struct FileHighScoreStore<TSerializer = YamlConfigSerializer>
where
    TSerializer: ConfigSerializer<HighScoreRecord>,
{
    content_provider: FileContentConfigProvider,
    serializer: TSerializer,
}

impl FileHighScoreStore<YamlConfigSerializer> {
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self {
            content_provider: FileContentConfigProvider::new(file_path),
            serializer: YamlConfigSerializer::new(),
        }
    }
}

impl<TSerializer> HighScoreStore for FileHighScoreStore<TSerializer>
where
    TSerializer: ConfigSerializer<HighScoreRecord> + Send + Sync,
{
    fn load(&self) -> Result<Option<HighScoreRecord>, String> {
        match self.content_provider.get_config_content()? {
            Some(content) => self.serializer.deserialize(&content).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, record: &HighScoreRecord) -> Result<(), String> {
        let content = self.serializer.serialize(record)?;
        self.content_provider.set_config_content(&content)
    }
}

#[derive(Default)]
pub struct InMemoryHighScoreStore {
    record: Mutex<Option<HighScoreRecord>>,
}

impl InMemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HighScoreRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&self) -> Result<Option<HighScoreRecord>, String> {
        self.record
            .lock()
            .map(|record| record.clone())
            .map_err(|_| "High score lock poisoned".to_string())
    }

    fn save(&self, record: &HighScoreRecord) -> Result<(), String> {
        let mut current = self
            .record
            .lock()
            .map_err(|_| "High score lock poisoned".to_string())?;
        *current = Some(record.clone());
        Ok(())
    }
}
