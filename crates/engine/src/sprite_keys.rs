use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not contain path separators")]
    PathSeparator,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Manifest keys name sprites, not files: lowercase segments joined with
/// '.', e.g. `tiles.grass`.
pub(crate) fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.contains('/') || key.contains('\\') {
        return Err(SpriteKeyError::PathSeparator);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '.' | '-') {
            continue;
        }
        return Err(SpriteKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_sprite_key;

    #[test]
    fn accepts_valid_keys() {
        for key in ["player", "tiles.grass", "background.layer_1", "a-b.c_d"] {
            assert!(validate_sprite_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", "a/b", r"a\b", "a..b", "A", "tiles grass"] {
            assert!(validate_sprite_key(key).is_err(), "key={key}");
        }
    }
}
