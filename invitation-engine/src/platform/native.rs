use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;

use crate::engine::loading::probe::DocumentState;
use crate::error::{InvitationError, InvitationResult};

const APP_DIR: &str = "wedding-invitation";

/// A desktop window has no document to wait for.
pub fn document_state() -> DocumentState {
    DocumentState::Complete
}

/// Native builds always start on the home page.
pub fn current_path() -> String {
    "/".to_string()
}

pub fn push_history(path: &str) -> InvitationResult<()> {
    debug!("History push to {} ignored on native", path);
    Ok(())
}

pub fn open_in_new_context(url: &str) -> InvitationResult<()> {
    info!("Would open {} in a new browser tab", url);
    Ok(())
}

fn storage_path(key: &str) -> InvitationResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(format!("{key}.json")))
        .ok_or_else(|| InvitationError::storage("no user config directory"))
}

pub fn storage_get(key: &str) -> InvitationResult<Option<String>> {
    let path = storage_path(key)?;
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

pub fn storage_set(key: &str, value: &str) -> InvitationResult<()> {
    let path = storage_path(key)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, value)?;
    Ok(())
}
