//! User settings persisted between runs (TOML in the platform config dir).

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::rename::DEFAULT_PATTERN;

pub const APP_NAME: &str = "Tagwright";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings file name inside the config directory.
const SETTINGS_FILE_NAME: &str = "settings.toml";

pub const DEFAULT_WIDTH: f32 = 1280.0;
pub const DEFAULT_HEIGHT: f32 = 720.0;
pub const MIN_WIDTH: f32 = 1100.0;
pub const MIN_HEIGHT: f32 = 700.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub width: f32,
    pub height: f32,
    /// Unset until the window has been moved once.
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: None,
            y: None,
        }
    }
}

impl WindowGeometry {
    /// Never smaller than the minimum window size.
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(MIN_WIDTH),
            height: self.height.max(MIN_HEIGHT),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Required for MusicBrainz requests; `None` disables them.
    pub contact_email: Option<String>,
    pub rename_pattern: String,
    pub window: WindowGeometry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            contact_email: None,
            rename_pattern: DEFAULT_PATTERN.to_string(),
            window: WindowGeometry::default(),
        }
    }
}

/// Good enough for a User-Agent contact: non-empty and has an '@'.
pub fn is_valid_contact_email(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && s.contains('@')
}

/// `<config dir>/settings.toml`, if the platform has a config dir.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tagwright").map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
}

impl Settings {
    /// The stored contact email, if it is usable.
    pub fn contact(&self) -> Option<&str> {
        self.contact_email
            .as_deref()
            .map(str::trim)
            .filter(|s| is_valid_contact_email(s))
    }

    pub fn load() -> Self {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no config directory; using default settings");
                Self::default()
            }
        }
    }

    /// Missing file: defaults. Unreadable or corrupt file: defaults, with a warning.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read settings");
                return Self::default();
            }
        };

        match toml::from_str::<Settings>(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt settings; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = settings_path()
            .ok_or_else(|| Error::Settings("no config directory on this platform".to_string()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))?;
        fs::write(path, text).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check() {
        assert!(is_valid_contact_email("me@example.org"));
        assert!(is_valid_contact_email("  me@host "));
        assert!(!is_valid_contact_email(""));
        assert!(!is_valid_contact_email("   "));
        assert!(!is_valid_contact_email("nobody"));
    }

    #[test]
    fn round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let settings = Settings {
            contact_email: Some("me@example.org".into()),
            rename_pattern: "%track% %title%".into(),
            window: WindowGeometry {
                width: 1400.0,
                height: 900.0,
                x: Some(10.0),
                y: Some(20.0),
            },
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn missing_and_corrupt_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        assert_eq!(Settings::load_from(&path), Settings::default());

        std::fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "contact_email = \"a@b\"\n").unwrap();

        let s = Settings::load_from(&path);
        assert_eq!(s.contact(), Some("a@b"));
        assert_eq!(s.rename_pattern, DEFAULT_PATTERN);
        assert_eq!(s.window, WindowGeometry::default());
    }

    #[test]
    fn geometry_is_clamped_to_minimum() {
        let g = WindowGeometry {
            width: 300.0,
            height: 2000.0,
            x: Some(5.0),
            y: None,
        };
        let c = g.clamped();
        assert_eq!((c.width, c.height), (MIN_WIDTH, 2000.0));
        assert_eq!(c.x, Some(5.0));
    }
}
