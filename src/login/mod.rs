//! Interactive capture of the session cookie.
//!
//! A login page is opened in a browser and probed once per interval. When the
//! session cookie appears, a copy button is injected for the operator. The
//! cookie is never stored here; the operator pastes it into settings.

pub mod chromium;
pub mod controller;
pub mod poll;
pub mod probe;
pub mod surface;

use crate::config::AppConfig;
use crate::prompt::Prompter;
use anyhow::Result;
use std::future::Future;
use std::time::Duration;

pub use controller::{AcquireOutcome, CredentialController};
pub use surface::WebSurface;

pub const LOGIN_TITLE: &str = "为什么要登录";
pub const LOGIN_EXPLANATION: &str = "获取手机号码信息需要 cookie，而 cookie 不登录获取不到\n\n登录完成后，网页底部会出现复制按钮\n\n点击按钮复制 cookie ，然后关闭浏览器去设置cookie\n\n若 cookie 失效，再次登录复制即可";
pub const LOGIN_CONFIRM: &str = "去登录";

/// Explains the flow, opens the surface from `launch` and runs the
/// controller. Returns once the operator has closed the surface.
pub async fn login_interactively<S, F, Fut>(
    prompter: &mut dyn Prompter,
    config: &AppConfig,
    launch: F,
) -> Result<AcquireOutcome>
where
    S: WebSurface,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<S>>,
{
    if !prompter.confirm(LOGIN_TITLE, LOGIN_EXPLANATION, LOGIN_CONFIRM)? {
        tracing::info!("Login declined");
        return Ok(AcquireOutcome::CancelledByUser);
    }

    let mut surface = launch().await?;
    let outcome = CredentialController::new(&mut surface, &config.login)
        .acquire(&config.login_url)
        .await;

    if outcome != AcquireOutcome::CancelledByUser {
        eprintln!("{}", outcome_hint(outcome));
        let interval = Duration::from_millis(config.login.poll_interval_ms);
        wait_until_closed(&mut surface, interval).await;
    }
    Ok(outcome)
}

fn outcome_hint(outcome: AcquireOutcome) -> &'static str {
    match outcome {
        AcquireOutcome::Completed => "点击网页底部按钮复制 cookie，完成后关闭浏览器",
        _ => "等待登录超时，可继续在浏览器中操作，完成后关闭浏览器",
    }
}

async fn wait_until_closed(surface: &mut dyn WebSurface, interval: Duration) {
    while surface.is_open().await {
        tokio::time::sleep(interval).await;
    }
    tracing::debug!("Login surface closed");
}
