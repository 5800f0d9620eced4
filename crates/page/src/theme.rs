use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{PageError, Result};

/// Default storage key for the persisted theme.
pub const THEME_STORAGE_KEY: &str = "portfolio_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Accepts exactly `"light"` or `"dark"`; anything else is unset.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Theme selected by a toggle from `current` (unset toggles to light).
    pub fn toggled(current: Option<Self>) -> Self {
        match current {
            Some(Self::Light) => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single persisted theme slot.
pub trait ThemeStore: Send + Sync {
    fn get(&self) -> Option<Theme>;

    fn set(&self, theme: Theme) -> Result<()>;
}

/// Process-local store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<String>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with a raw value, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self) -> Option<Theme> {
        self.raw().as_deref().and_then(Theme::parse)
    }

    fn set(&self, theme: Theme) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| PageError::Storage("theme store lock poisoned".to_string()))?;
        *guard = Some(theme.as_str().to_string());
        Ok(())
    }
}

/// Key-value JSON file holding the theme under a single key.
///
/// Other keys in the file are preserved on write. A missing or unreadable
/// file reads as unset.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
    key: String,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_slice(&raw).unwrap_or_else(|err| {
            warn!(
                "ignoring unreadable theme store {}: {err}",
                self.path.display()
            );
            BTreeMap::new()
        })
    }
}

impl ThemeStore for FileThemeStore {
    fn get(&self) -> Option<Theme> {
        self.read_entries()
            .get(&self.key)
            .and_then(|raw| Theme::parse(raw))
    }

    fn set(&self, theme: Theme) -> Result<()> {
        let mut entries = self.read_entries();
        entries.insert(self.key.clone(), theme.as_str().to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_vec_pretty(&entries)?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}
