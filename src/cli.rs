use crate::notify::{Notification, Notifier};
use crate::settings::{self, keys, KvStore};
use crate::widget::WidgetSize;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unicom-usage")]
#[command(about = "China Unicom balance, data and minutes at a glance")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to ~/.unicom-usage/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive menu (the default)
    Menu,
    /// Render the widget once, as the background refresh does
    Render(RenderArgs),
    /// Render the widget once from the app, without requiring a cookie
    Preview(RenderArgs),
    /// Open the login page and wait for the cookie copy button
    Login,
    /// Store settings without prompting
    Set(SetArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RenderArgs {
    #[arg(long, value_enum, default_value_t = WidgetSize::Medium)]
    pub size: WidgetSize,

    /// Plain text output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SetArgs {
    #[arg(long)]
    pub phone: Option<String>,

    /// Cookie copied from the login page
    #[arg(long)]
    pub cookie: Option<String>,

    /// Background color or image link; empty restores the default
    #[arg(long)]
    pub box_bg: Option<String>,

    /// Text color; empty restores the default
    #[arg(long)]
    pub text_color: Option<String>,

    /// Wallpaper crop used as a transparent background
    #[arg(long)]
    pub transparent_bg: Option<PathBuf>,
}

impl SetArgs {
    pub fn apply(&self, store: &mut dyn KvStore, notifier: &dyn Notifier) -> Result<()> {
        let simple = [
            (keys::PHONE_NUMBER, &self.phone),
            (keys::COOKIE, &self.cookie),
            (keys::BOX_BG, &self.box_bg),
            (keys::TEXT_COLOR, &self.text_color),
        ];
        if simple.iter().all(|(_, v)| v.is_none()) && self.transparent_bg.is_none() {
            bail!(
                "Nothing to set; pass at least one of \
                 --phone, --cookie, --box-bg, --text-color, --transparent-bg"
            );
        }

        for (key, value) in simple {
            if let Some(value) = value {
                store.set(key, value.trim());
            }
        }

        if let Some(path) = &self.transparent_bg {
            if !path.is_file() {
                bail!("Background image not found: {}", path.display());
            }
            let path = path
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", path.display()))?;
            settings::save_transparent_background(store, &path.to_string_lossy())?;
        } else {
            store.save()?;
        }

        notifier.notify(&Notification::success(crate::menu::SAVED_TITLE));
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
