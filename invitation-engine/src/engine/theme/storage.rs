use constants::palette::{THEME_STORAGE_KEY, THEME_STORAGE_VERSION};
use serde::{Deserialize, Serialize};

use crate::error::InvitationResult;
use crate::platform;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ThemeRecord {
    pub color: String,
}

/// Versioned envelope around the persisted record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct PersistedTheme {
    state: ThemeRecord,
    version: u32,
}

pub fn encode(color: &str) -> InvitationResult<String> {
    let persisted = PersistedTheme {
        state: ThemeRecord {
            color: color.to_string(),
        },
        version: THEME_STORAGE_VERSION,
    };
    Ok(serde_json::to_string(&persisted)?)
}

/// Decode a stored record. Records written under another version are ignored.
pub fn decode(raw: &str) -> InvitationResult<Option<ThemeRecord>> {
    let persisted: PersistedTheme = serde_json::from_str(raw)?;
    if persisted.version != THEME_STORAGE_VERSION {
        return Ok(None);
    }
    Ok(Some(persisted.state))
}

/// Key-value slot holding the serialized theme record.
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> InvitationResult<Option<String>>;
    fn save(&mut self, raw: &str) -> InvitationResult<()>;
}

/// Browser `localStorage` on the web, a JSON file in the user config dir natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformThemeStore;

impl ThemeStore for PlatformThemeStore {
    fn load(&self) -> InvitationResult<Option<String>> {
        platform::storage_get(THEME_STORAGE_KEY)
    }

    fn save(&mut self, raw: &str) -> InvitationResult<()> {
        platform::storage_set(THEME_STORAGE_KEY, raw)
    }
}

/// In-process store, for tests and for when persistence is unavailable.
#[derive(Debug, Default, Clone)]
pub struct MemoryThemeStore {
    pub raw: Option<String>,
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> InvitationResult<Option<String>> {
        Ok(self.raw.clone())
    }

    fn save(&mut self, raw: &str) -> InvitationResult<()> {
        self.raw = Some(raw.to_string());
        Ok(())
    }
}
