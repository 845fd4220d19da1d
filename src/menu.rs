//! Interactive menu shown when the tool runs inside the host app.

use crate::account_usage::api_client::AccountApi;
use crate::config::AppConfig;
use crate::login::{self, chromium::ChromiumSurface};
use crate::notify::{Notification, Notifier};
use crate::prompt::{InputField, Prompter};
use crate::runner::Renderer;
use crate::settings::{self, keys, KvStore, Settings};
use crate::widget::{RenderOptions, WidgetSize};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub const MENU_TITLE: &str = "菜单";
pub const MENU_ITEMS: [&str; 5] = [
    "登录获取cookie",
    "设置手机号和cookie",
    "设置颜色",
    "设置透明背景",
    "预览组件",
];
pub const SAVED_TITLE: &str = "设置完成";
pub const TRANSPARENT_SAVED_TITLE: &str = "设置透明背景成功";
const PREVIEW_SIZES: [&str; 3] = ["小号", "中号", "大号"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Login,
    SetAccount,
    SetColors,
    SetTransparentBackground,
    Preview,
}

impl MenuAction {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Login),
            1 => Some(Self::SetAccount),
            2 => Some(Self::SetColors),
            3 => Some(Self::SetTransparentBackground),
            4 => Some(Self::Preview),
            _ => None,
        }
    }
}

pub struct Menu<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub store: &'a mut dyn KvStore,
    pub api: &'a dyn AccountApi,
    pub notifier: &'a dyn Notifier,
    pub config: &'a AppConfig,
    pub out: &'a mut dyn Write,
    pub render_options: RenderOptions,
}

impl Menu<'_> {
    /// Shows the action sheet and runs the chosen action.
    pub async fn run(&mut self) -> Result<Option<MenuAction>> {
        let Some(action) = self
            .prompter
            .select(MENU_TITLE, &MENU_ITEMS)?
            .and_then(MenuAction::from_index)
        else {
            return Ok(None);
        };
        tracing::info!(?action, "menu action");

        match action {
            MenuAction::Login => {
                let config = self.config;
                let outcome =
                    login::login_interactively(&mut *self.prompter, config, || {
                        ChromiumSurface::launch(config)
                    })
                    .await?;
                tracing::info!(?outcome, "login finished");
            }
            MenuAction::SetAccount => self.set_account()?,
            MenuAction::SetColors => self.set_colors()?,
            MenuAction::SetTransparentBackground => self.set_transparent_background()?,
            MenuAction::Preview => self.preview().await?,
        }
        Ok(Some(action))
    }

    fn set_account(&mut self) -> Result<()> {
        let fields = [
            InputField::new(self.stored(keys::PHONE_NUMBER), "这里填你的手机号"),
            InputField::new(self.stored(keys::COOKIE), "这里填cookie"),
        ];
        let Some(values) = self.prompter.inputs(
            "设置手机号和cookie",
            "请务必先登录，在登录处复制好 cookie 再来，不懂就仔细看登录说明",
            &fields,
        )?
        else {
            return Ok(());
        };
        let [phone, cookie] = two_values(values);
        log_save_failure(settings::save_account(&mut *self.store, &phone, &cookie));
        self.notifier.notify(&Notification::success(SAVED_TITLE));
        Ok(())
    }

    fn set_colors(&mut self) -> Result<()> {
        let fields = [
            InputField::new(self.stored(keys::BOX_BG), "全局背景：可以是颜色、图链接"),
            InputField::new(self.stored(keys::TEXT_COLOR), "这里填文字颜色"),
        ];
        let Some(values) =
            self.prompter
                .inputs("设置全局背景和颜色", "如果为空，则还原默认", &fields)?
        else {
            return Ok(());
        };
        let [box_bg, text_color] = two_values(values);
        log_save_failure(settings::save_colors(&mut *self.store, &box_bg, &text_color));
        self.notifier.notify(&Notification::success(SAVED_TITLE));
        Ok(())
    }

    fn set_transparent_background(&mut self) -> Result<()> {
        let fields = [InputField::new(
            self.stored(keys::TRANSPARENT_BG),
            "图片路径",
        )];
        let Some(values) = self.prompter.inputs(
            "设置透明背景",
            "填写按组件位置裁剪好的桌面截图",
            &fields,
        )?
        else {
            return Ok(());
        };
        let path = values.into_iter().next().unwrap_or_default();
        let path = path.trim();
        if path.is_empty() || !Path::new(path).is_file() {
            tracing::warn!("Transparent background image not found: {path:?}");
            eprintln!("图片不存在: {path}");
            return Ok(());
        }
        log_save_failure(settings::save_transparent_background(&mut *self.store, path));
        self.notifier
            .notify(&Notification::success(TRANSPARENT_SAVED_TITLE));
        Ok(())
    }

    async fn preview(&mut self) -> Result<()> {
        let size = match self.prompter.select("预览组件", &PREVIEW_SIZES)? {
            Some(0) => WidgetSize::Small,
            Some(1) => WidgetSize::Medium,
            Some(2) => WidgetSize::Large,
            _ => return Ok(()),
        };
        let settings = Settings::load(&*self.store);
        let renderer = Renderer {
            api: self.api,
            notifier: self.notifier,
            config: self.config,
        };
        renderer
            .render_once(&settings, size, true, &mut *self.out, &self.render_options)
            .await?;
        Ok(())
    }

    fn stored(&self, key: &str) -> String {
        self.store.get(key).unwrap_or_default()
    }
}

/// First two form values; missing ones are empty.
fn two_values(values: Vec<String>) -> [String; 2] {
    let mut values = values.into_iter();
    [
        values.next().unwrap_or_default(),
        values.next().unwrap_or_default(),
    ]
}

/// Settings writes from the menu are fire-and-forget; the in-memory values
/// still apply for the rest of the session.
fn log_save_failure(result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to save settings: {e:#}");
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
