//! Operator settings: subscriber number, session cookie and widget colors.

pub mod store;
pub mod types;

pub use store::{FileKvStore, KvStore};
pub use types::{
    keys, save_account, save_colors, save_transparent_background, DisplaySettings, Settings,
    TRANSPARENT_BACKGROUND,
};
