use std::io::ErrorKind;
use std::path::PathBuf;

/// Raw text storage behind a config or score file. `Ok(None)` means nothing was saved yet.
pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!(
                "Failed to read {}: {}",
                self.file_path.display(),
                err
            )),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write {}: {}", self.file_path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path(name: &str) -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("snake_{}_{}.yaml", name, random_number))
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let provider = FileContentConfigProvider::new("this_file_does_not_exist.yaml");
        assert_eq!(provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_written_content_is_read_back() {
        let path = get_temp_file_path("provider");
        let provider = FileContentConfigProvider::new(path.clone());

        assert!(provider.set_config_content("best_score: 7\n").is_ok());
        assert_eq!(
            provider.get_config_content(),
            Ok(Some("best_score: 7\n".to_string()))
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_write_creates_missing_parent_directory() {
        let dir = get_temp_file_path("dir");
        let path = dir.join("nested.yaml");
        let provider = FileContentConfigProvider::new(path.clone());

        assert!(provider.set_config_content("x: 1\n").is_ok());
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(dir);
    }
}
