//! Player sprite asset
//!
//! The sprite is a small text-art file, loaded once at start-up and owned by
//! the front end for the rest of the process. A missing or empty file is not
//! fatal: the actor is drawn as a placeholder circle instead.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Rows beyond this are ignored
pub const MAX_SPRITE_ROWS: usize = 16;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sprite file {0} has no visible characters")]
    Empty(PathBuf),
}

/// Text art, one string per terminal row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<String>,
    width: usize,
}

impl Sprite {
    /// Build a sprite from text, trimming blank rows above and below.
    ///
    /// Returns None if no row has a visible character.
    pub fn from_text(text: &str) -> Option<Self> {
        let rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        let first = rows.iter().position(|r| !r.trim().is_empty())?;
        let last = rows.iter().rposition(|r| !r.trim().is_empty())?;
        let rows: Vec<String> = rows[first..=last]
            .iter()
            .take(MAX_SPRITE_ROWS)
            .cloned()
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        Some(Self { rows, width })
    }

    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let text = fs::read_to_string(path).map_err(|source| SpriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text).ok_or_else(|| SpriteError::Empty(path.to_path_buf()))
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Width in terminal columns
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// How the actor is drawn
#[derive(Debug, Clone)]
pub enum PlayerSprite {
    Art(Sprite),
    Placeholder,
}

impl PlayerSprite {
    /// Load the sprite, falling back to the placeholder.
    ///
    /// The second value is a short notice for the player when the asset was unusable.
    pub fn load_or_placeholder(path: &Path) -> (Self, Option<String>) {
        match Sprite::load(path) {
            Ok(sprite) => {
                log::info!(
                    "Loaded sprite {} ({}x{})",
                    path.display(),
                    sprite.width(),
                    sprite.height()
                );
                (PlayerSprite::Art(sprite), None)
            }
            Err(e) => {
                log::warn!("{}; drawing placeholder", e);
                let notice = format!("Sprite not found: {}", path.display());
                (PlayerSprite::Placeholder, Some(notice))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_trims_blank_rows() {
        let sprite = Sprite::from_text("\n\n  /\\  \n (oo)\n  ||\n\n").unwrap();
        assert_eq!(sprite.height(), 3);
        assert_eq!(sprite.width(), 5);
        assert_eq!(sprite.rows()[0], "  /\\");
    }

    #[test]
    fn test_blank_text_is_not_a_sprite() {
        assert!(Sprite::from_text("").is_none());
        assert!(Sprite::from_text("   \n \t \n").is_none());
    }

    #[test]
    fn test_rows_are_capped() {
        let text = "x\n".repeat(40);
        let sprite = Sprite::from_text(&text).unwrap();
        assert_eq!(sprite.height(), MAX_SPRITE_ROWS);
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholder() {
        let (sprite, notice) =
            PlayerSprite::load_or_placeholder(Path::new("no/such/dir/player.txt"));
        assert!(matches!(sprite, PlayerSprite::Placeholder));
        assert!(notice.unwrap().contains("player.txt"));
    }

    #[test]
    fn test_bundled_sprite_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/player.txt");
        let (sprite, notice) = PlayerSprite::load_or_placeholder(&path);
        assert!(matches!(sprite, PlayerSprite::Art(_)));
        assert!(notice.is_none());
    }
}
