use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::world::DEFAULT_WORLD_SEED;

type ConfigResult<T> = Result<T, String>;

/// World shape and generation seed. Loaded from `assets/config.json` when
/// present; every field falls back to its default, so a partial file is
/// fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Chunk-grid width; at least one chunk.
    pub width: i32,
    /// Chunk-grid height; at least one chunk.
    pub height: i32,
    /// Generation seed; identical seeds produce identical worlds.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            seed: DEFAULT_WORLD_SEED,
        }
    }
}

impl WorldConfig {
    fn sanitized(mut self) -> Self {
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        self
    }
}

pub fn load_world_config(path: &Path) -> ConfigResult<WorldConfig> {
    if !path.exists() {
        info!(path = %path.display(), "world_config_missing_using_defaults");
        return Ok(WorldConfig::default());
    }

    let raw = fs::read_to_string(path)
        .map_err(|error| format!("failed to read world config at {}: {error}", path.display()))?;
    let deserializer = &mut serde_json::Deserializer::from_str(&raw);
    let config: WorldConfig = serde_path_to_error::deserialize(deserializer)
        .map_err(|error| format!("failed to parse world config at {}: {error}", path.display()))?;
    Ok(config.sanitized())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = load_world_config(&dir.path().join("absent.json")).expect("defaults");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_absent_fields() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, r#"{"seed": 42}"#);

        let config = load_world_config(&path).expect("config");
        assert_eq!(config.seed, 42);
        assert_eq!(config.width, WorldConfig::default().width);
    }

    #[test]
    fn malformed_file_reports_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, "{broken");
        assert!(load_world_config(&path).is_err());
    }

    #[test]
    fn unknown_fields_report_their_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, r#"{"widht": 4}"#);

        let error = load_world_config(&path).expect_err("unknown field");
        assert!(error.contains("widht"), "error={error}");
    }

    #[test]
    fn degenerate_dimensions_are_clamped_to_one_chunk() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_config(&dir, r#"{"width": 0, "height": -3}"#);

        let config = load_world_config(&path).expect("config");
        assert_eq!((config.width, config.height), (1, 1));
    }
}
