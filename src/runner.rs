//! One widget render: fetch, build, draw.

use crate::account_usage::api_client::AccountApi;
use crate::account_usage::fetcher::UsagePipeline;
use crate::config::AppConfig;
use crate::notify::{Notification, Notifier};
use crate::settings::Settings;
use crate::widget::{self, RenderOptions, WidgetSize, WidgetTree};
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;

pub struct Renderer<'a> {
    pub api: &'a dyn AccountApi,
    pub notifier: &'a dyn Notifier,
    pub config: &'a AppConfig,
}

impl Renderer<'_> {
    /// Renders the widget once. Fetch failures become the failure view; only
    /// output errors are returned.
    pub async fn render_once(
        &self,
        settings: &Settings,
        size: WidgetSize,
        inside_app: bool,
        out: &mut dyn Write,
        options: &RenderOptions,
    ) -> Result<WidgetTree> {
        if inside_app {
            self.notifier.notify(&Notification::render_starting());
        }

        let credential = settings.credential();
        if let Some(c) = &credential {
            tracing::debug!(subscriber = %c.subscriber_id, "using stored cookie");
        }
        let pipeline = UsagePipeline::new(self.api, self.notifier, inside_app);
        let view = pipeline
            .fetch_snapshot(
                &settings.phone_number,
                credential.as_ref().map(|c| c.token.as_str()),
            )
            .await;

        let tree = widget::build(
            &view,
            size,
            &settings.display,
            chrono::Local::now(),
            Duration::from_secs(self.config.widget.refresh_interval_secs),
        );
        widget::render(&tree, out, options).context("Failed to write widget")?;
        tracing::debug!(?size, inside_app, "widget rendered");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account_usage::api_client::StaticApi;
    use crate::notify::{NotificationKind, RecordingNotifier};
    use crate::widget::tree::{Row, WidgetBody};

    const BODY: &str = r#"{"flush_date_time":"2024-01-01 00:00","data":{"dataList":[{"type":"flow","usedTitle":"已用40%","number":"6","unit":"GB","remainTitle":"剩余流量"}]}}"#;

    fn settings(phone: &str, cookie: Option<&str>) -> Settings {
        Settings {
            phone_number: phone.to_string(),
            cookie: cookie.map(String::from),
            ..Default::default()
        }
    }

    fn plain() -> RenderOptions {
        RenderOptions {
            color: false,
            width: 36,
        }
    }

    #[tokio::test]
    async fn test_render_outside_app_needs_cookie() {
        let api = StaticApi::new(BODY);
        let notifier = RecordingNotifier::default();
        let config = AppConfig::default();
        let renderer = Renderer {
            api: &api,
            notifier: &notifier,
            config: &config,
        };
        let mut out = Vec::new();

        let tree = renderer
            .render_once(
                &settings("18600000000", None),
                WidgetSize::Small,
                false,
                &mut out,
                &plain(),
            )
            .await
            .unwrap();

        assert!(matches!(tree.body, WidgetBody::Failure { .. }));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("missing credential, please authenticate"));
        assert!(api.calls().is_empty());
        assert!(notifier.taken().is_empty());
    }

    #[tokio::test]
    async fn test_render_inside_app_announces_and_fetches_without_cookie() {
        let api = StaticApi::new(BODY);
        let notifier = RecordingNotifier::default();
        let config = AppConfig::default();
        let renderer = Renderer {
            api: &api,
            notifier: &notifier,
            config: &config,
        };
        let mut out = Vec::new();

        let tree = renderer
            .render_once(
                &settings("18600000000", None),
                WidgetSize::Small,
                true,
                &mut out,
                &plain(),
            )
            .await
            .unwrap();

        let sent = notifier.taken();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::Info);
        assert_eq!(sent[0].title, "稍等片刻");
        assert_eq!(api.calls(), vec![("18600000000".to_string(), String::new())]);
        match tree.body {
            WidgetBody::Usage { rows, .. } => {
                assert_eq!(rows, vec![Row::Line("剩余流量 6GB".to_string())]);
            }
            other => panic!("unexpected body {other:?}"),
        }
        assert!(String::from_utf8(out).unwrap().contains("剩余流量 6GB"));
    }

    #[tokio::test]
    async fn test_render_sends_cookie() {
        let api = StaticApi::new(BODY);
        let notifier = RecordingNotifier::default();
        let config = AppConfig::default();
        let renderer = Renderer {
            api: &api,
            notifier: &notifier,
            config: &config,
        };
        let mut out = Vec::new();

        renderer
            .render_once(
                &settings("18600000000", Some("JSESSIONID=abc")),
                WidgetSize::Large,
                false,
                &mut out,
                &plain(),
            )
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![("18600000000".to_string(), "JSESSIONID=abc".to_string())]
        );
    }
}
