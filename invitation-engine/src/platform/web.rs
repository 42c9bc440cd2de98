use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use crate::engine::loading::probe::DocumentState;
use crate::error::{InvitationError, InvitationResult};

fn window() -> InvitationResult<Window> {
    web_sys::window().ok_or_else(|| InvitationError::browser("no global window"))
}

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn local_storage() -> InvitationResult<Storage> {
    window()?
        .local_storage()
        .map_err(|err| InvitationError::storage(describe(err)))?
        .ok_or_else(|| InvitationError::storage("localStorage unavailable"))
}

/// `document.readyState`, or `Loading` while there is no document yet.
pub fn document_state() -> DocumentState {
    web_sys::window()
        .and_then(|window| window.document())
        .map(|document| DocumentState::parse(&document.ready_state()))
        .unwrap_or(DocumentState::Loading)
}

/// Path of the current location, used to pick the initial route.
pub fn current_path() -> String {
    window()
        .and_then(|window| {
            window
                .location()
                .pathname()
                .map_err(|err| InvitationError::browser(describe(err)))
        })
        .unwrap_or_else(|_| "/".to_string())
}

/// Push a history entry so the address bar follows in-app navigation.
pub fn push_history(path: &str) -> InvitationResult<()> {
    window()?
        .history()
        .map_err(|err| InvitationError::browser(describe(err)))?
        .push_state_with_url(&JsValue::NULL, "", Some(path))
        .map_err(|err| InvitationError::browser(describe(err)))
}

/// Open `url` in a new browsing context.
pub fn open_in_new_context(url: &str) -> InvitationResult<()> {
    window()?
        .open_with_url_and_target(url, "_blank")
        .map_err(|err| InvitationError::browser(describe(err)))?;
    Ok(())
}

pub fn storage_get(key: &str) -> InvitationResult<Option<String>> {
    local_storage()?
        .get_item(key)
        .map_err(|err| InvitationError::storage(describe(err)))
}

pub fn storage_set(key: &str, value: &str) -> InvitationResult<()> {
    local_storage()?
        .set_item(key, value)
        .map_err(|err| InvitationError::storage(describe(err)))
}
