use std::collections::HashMap;
use std::path::Path;

use image::ImageReader;
use tracing::warn;

use super::manifest::SpriteManifest;

/// Opaque drawable handle. `PLACEHOLDER` never resolves to an image and is
/// drawn as a flat quad; lookups of keys missing from the database degrade
/// to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(u32);

impl SpriteId {
    pub const PLACEHOLDER: Self = Self(u32::MAX);
}

#[derive(Debug, Clone)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Immutable sprite table loaded once at startup and passed by reference
/// into everything that draws. Entries that fail to load keep their key but
/// resolve to no image, so the world renders placeholders instead of
/// failing.
#[derive(Debug, Default)]
pub struct SpriteDatabase {
    images: Vec<Option<SpriteImage>>,
    ids_by_key: HashMap<String, SpriteId>,
}

impl SpriteDatabase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes every manifest entry relative to `assets_dir`. Load failures
    /// warn once and leave a placeholder entry.
    pub fn load(assets_dir: &Path, manifest: &SpriteManifest) -> Self {
        let mut database = Self::default();
        for entry in &manifest.sprites {
            let path = assets_dir.join(&entry.path);
            let image = match load_sprite_rgba(&path) {
                Ok(image) => Some(image),
                Err(reason) => {
                    warn!(
                        sprite_key = entry.key.as_str(),
                        path = %path.display(),
                        reason = reason.as_str(),
                        "sprite_load_failed_using_placeholder"
                    );
                    None
                }
            };
            database.insert(&entry.key, image);
        }
        database
    }

    pub fn sprite_id(&self, key: &str) -> Option<SpriteId> {
        self.ids_by_key.get(key).copied()
    }

    /// Handle for `key`, or `SpriteId::PLACEHOLDER` when the database does
    /// not know it.
    pub fn sprite_id_or_placeholder(&self, key: &str) -> SpriteId {
        self.sprite_id(key).unwrap_or(SpriteId::PLACEHOLDER)
    }

    pub fn image(&self, id: SpriteId) -> Option<&SpriteImage> {
        self.images.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn sprite_size(&self, id: SpriteId) -> Option<(u32, u32)> {
        self.image(id).map(|image| (image.width, image.height))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn insert(&mut self, key: &str, image: Option<SpriteImage>) -> SpriteId {
        let id = SpriteId(self.images.len() as u32);
        self.images.push(image);
        self.ids_by_key.insert(key.to_string(), id);
        id
    }

    /// Registers a decoded image directly; used by tests and tools that
    /// bypass the manifest.
    pub fn insert_image(&mut self, key: &str, image: SpriteImage) -> SpriteId {
        self.insert(key, Some(image))
    }
}

fn load_sprite_rgba(path: &Path) -> Result<SpriteImage, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(SpriteImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::manifest::SpriteManifestEntry;
    use tempfile::TempDir;

    fn solid_image(width: u32, height: u32, color: [u8; 4]) -> SpriteImage {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            rgba.extend_from_slice(&color);
        }
        SpriteImage {
            width,
            height,
            rgba,
        }
    }

    #[test]
    fn unknown_key_resolves_to_placeholder() {
        let database = SpriteDatabase::empty();
        assert_eq!(database.sprite_id("player"), None);
        assert_eq!(
            database.sprite_id_or_placeholder("player"),
            SpriteId::PLACEHOLDER
        );
        assert!(database.image(SpriteId::PLACEHOLDER).is_none());
    }

    #[test]
    fn inserted_image_round_trips() {
        let mut database = SpriteDatabase::empty();
        let id = database.insert_image("tiles.grass", solid_image(4, 4, [0, 255, 0, 255]));
        assert_eq!(database.sprite_id("tiles.grass"), Some(id));
        assert_eq!(database.sprite_size(id), Some((4, 4)));
    }

    #[test]
    fn manifest_entry_with_missing_file_keeps_key_without_image() {
        let dir = TempDir::new().expect("tempdir");
        let manifest = SpriteManifest {
            sprites: vec![SpriteManifestEntry {
                key: "player".to_string(),
                path: "sprites/absent.png".to_string(),
            }],
        };

        let database = SpriteDatabase::load(dir.path(), &manifest);
        let id = database.sprite_id("player").expect("key registered");
        assert!(database.image(id).is_none());
        assert_eq!(database.len(), 1);
    }
}
