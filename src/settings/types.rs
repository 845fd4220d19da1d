use super::store::KvStore;
use crate::account_usage::types::SessionCredential;
use anyhow::Result;

/// Storage keys shared with earlier releases of the widget.
pub mod keys {
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const COOKIE: &str = "cookie";
    pub const BOX_BG: &str = "boxBg";
    pub const TEXT_COLOR: &str = "textColor";
    pub const TRANSPARENT_BG: &str = "transparentBg";
}

/// `boxBg` value meaning "use the stored transparent background image".
pub const TRANSPARENT_BACKGROUND: &str = "透明背景";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Color, image link or [`TRANSPARENT_BACKGROUND`]
    pub box_bg: Option<String>,
    pub text_color: Option<String>,
    /// Path of the cropped wallpaper image
    pub transparent_bg: Option<String>,
}

/// Read-only view of the stored settings, taken once per render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub phone_number: String,
    pub cookie: Option<String>,
    pub display: DisplaySettings,
}

impl Settings {
    pub fn load(store: &dyn KvStore) -> Self {
        Self {
            phone_number: non_empty(store, keys::PHONE_NUMBER).unwrap_or_default(),
            cookie: non_empty(store, keys::COOKIE),
            display: DisplaySettings {
                box_bg: non_empty(store, keys::BOX_BG),
                text_color: non_empty(store, keys::TEXT_COLOR),
                transparent_bg: non_empty(store, keys::TRANSPARENT_BG),
            },
        }
    }

    pub fn credential(&self) -> Option<SessionCredential> {
        let token = self.cookie.clone()?;
        Some(SessionCredential {
            token,
            subscriber_id: self.phone_number.clone(),
        })
    }
}

/// Stores the subscriber number and cookie together, as the settings form does.
pub fn save_account(store: &mut dyn KvStore, phone_number: &str, cookie: &str) -> Result<()> {
    store.set(keys::PHONE_NUMBER, phone_number.trim());
    store.set(keys::COOKIE, cookie.trim());
    store.save()
}

/// Stores background and text colors. Empty input restores the default.
pub fn save_colors(store: &mut dyn KvStore, box_bg: &str, text_color: &str) -> Result<()> {
    store.set(keys::BOX_BG, box_bg.trim());
    store.set(keys::TEXT_COLOR, text_color.trim());
    store.save()
}

/// Points the background at a transparent wallpaper image.
pub fn save_transparent_background(store: &mut dyn KvStore, image_path: &str) -> Result<()> {
    store.set(keys::TRANSPARENT_BG, image_path.trim());
    store.set(keys::BOX_BG, TRANSPARENT_BACKGROUND);
    store.save()
}

fn non_empty(store: &dyn KvStore, key: &str) -> Option<String> {
    store
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
