mod account_usage;
mod app_paths;
mod cli;
mod config;
mod logging;
mod login;
mod menu;
mod notify;
mod prompt;
mod runner;
mod settings;
mod widget;

use account_usage::api_client::UreqAccountApi;
use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, RenderArgs};
use config::AppConfig;
use login::chromium::ChromiumSurface;
use login::AcquireOutcome;
use menu::Menu;
use notify::DesktopNotifier;
use prompt::RustylinePrompter;
use runner::Renderer;
use settings::{FileKvStore, KvStore, Settings};
use std::io::IsTerminal;
use widget::{RenderOptions, WidgetSize};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("UNICOM_USAGE_GIT_SHA"),
        "unicom-usage starting"
    );

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(&app_paths::config_path()?)?,
    };
    let mut store = FileKvStore::open_default()?;
    let notifier = DesktopNotifier;
    let api = UreqAccountApi::new(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let mut prompter = RustylinePrompter::new()?;
            let mut menu = Menu {
                prompter: &mut prompter,
                store: &mut store,
                api: &api,
                notifier: &notifier,
                config: &config,
                out: &mut out,
                render_options: render_options(WidgetSize::Large, false),
            };
            menu.run().await?;
        }
        Command::Render(args) => {
            render(&api, &notifier, &config, &store, &args, false, &mut out).await?;
        }
        Command::Preview(args) => {
            render(&api, &notifier, &config, &store, &args, true, &mut out).await?;
        }
        Command::Login => {
            let mut prompter = RustylinePrompter::new()?;
            let outcome = login::login_interactively(&mut prompter, &config, || {
                ChromiumSurface::launch(&config)
            })
            .await?;
            if outcome == AcquireOutcome::CancelledByUser {
                eprintln!("已取消登录");
            }
        }
        Command::Set(args) => {
            args.apply(&mut store, &notifier)?;
            eprintln!("{}", menu::SAVED_TITLE);
        }
    }

    Ok(())
}

async fn render(
    api: &UreqAccountApi,
    notifier: &DesktopNotifier,
    config: &AppConfig,
    store: &dyn KvStore,
    args: &RenderArgs,
    inside_app: bool,
    out: &mut dyn std::io::Write,
) -> Result<()> {
    let settings = Settings::load(store);
    let renderer = Renderer {
        api,
        notifier,
        config,
    };
    renderer
        .render_once(
            &settings,
            args.size,
            inside_app,
            out,
            &render_options(args.size, args.no_color),
        )
        .await?;
    Ok(())
}

fn render_options(size: WidgetSize, no_color: bool) -> RenderOptions {
    RenderOptions {
        color: !no_color && std::io::stdout().is_terminal(),
        width: match size {
            WidgetSize::Small => 28,
            WidgetSize::Medium | WidgetSize::Large => 36,
        },
    }
}
