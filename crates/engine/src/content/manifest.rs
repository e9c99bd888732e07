use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sprite_keys::{validate_sprite_key, SpriteKeyError};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read sprite manifest at {path}: {source}")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse sprite manifest at {path}: {message}")]
    ParseManifest { path: PathBuf, message: String },
    #[error("invalid sprite key '{key}' in manifest: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: SpriteKeyError,
    },
    #[error("duplicate sprite key '{key}' in manifest")]
    DuplicateKey { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpriteManifestEntry {
    pub key: String,
    /// Image path relative to the assets directory.
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpriteManifest {
    pub sprites: Vec<SpriteManifestEntry>,
}

impl SpriteManifest {
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for entry in &self.sprites {
            validate_sprite_key(&entry.key).map_err(|source| ContentError::InvalidKey {
                key: entry.key.clone(),
                source,
            })?;
            if !seen.insert(entry.key.as_str()) {
                return Err(ContentError::DuplicateKey {
                    key: entry.key.clone(),
                });
            }
        }
        Ok(())
    }
}

pub fn read_sprite_manifest(path: &Path) -> Result<SpriteManifest, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: SpriteManifest =
        serde_json::from_str(&raw).map_err(|error| ContentError::ParseManifest {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    manifest.validate()?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn entry(key: &str, path: &str) -> SpriteManifestEntry {
        SpriteManifestEntry {
            key: key.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn reads_valid_manifest_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("sprites.json");
        fs::write(
            &path,
            r#"{"sprites":[{"key":"tiles.grass","path":"sprites/grass.png"}]}"#,
        )
        .expect("write manifest");

        let manifest = read_sprite_manifest(&path).expect("manifest");
        assert_eq!(
            manifest.sprites,
            vec![entry("tiles.grass", "sprites/grass.png")]
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let result = read_sprite_manifest(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ContentError::ReadManifest { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("sprites.json");
        fs::write(&path, "{not json").expect("write manifest");

        let result = read_sprite_manifest(&path);
        assert!(matches!(result, Err(ContentError::ParseManifest { .. })));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let manifest = SpriteManifest {
            sprites: vec![entry("player", "a.png"), entry("player", "b.png")],
        };
        assert!(matches!(
            manifest.validate(),
            Err(ContentError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn invalid_keys_are_rejected() {
        let manifest = SpriteManifest {
            sprites: vec![entry("Tiles.Grass", "a.png")],
        };
        assert!(matches!(
            manifest.validate(),
            Err(ContentError::InvalidKey { .. })
        ));
    }
}
