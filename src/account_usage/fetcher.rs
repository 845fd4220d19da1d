//! Usage fetcher that coordinates precondition checks, the API call and
//! normalization.

use super::api_client::AccountApi;
use super::error::FetchError;
use super::normalize::parse_snapshot;
use super::types::UsageSnapshot;
use crate::notify::{Notification, Notifier};

/// Stages of one pipeline run, logged as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    ValidatingInput,
    Fetching,
    Parsing,
    Succeeded,
    Failed,
}

pub struct UsagePipeline<'a> {
    api: &'a dyn AccountApi,
    notifier: &'a dyn Notifier,
    inside_app: bool,
}

impl<'a> UsagePipeline<'a> {
    /// `inside_app` allows fetching without a stored cookie.
    pub fn new(api: &'a dyn AccountApi, notifier: &'a dyn Notifier, inside_app: bool) -> Self {
        Self {
            api,
            notifier,
            inside_app,
        }
    }

    /// Runs one fetch. Every failure comes back as a displayable `FetchError`;
    /// upstream failures also raise a notification.
    pub async fn fetch_snapshot(
        &self,
        subscriber_id: &str,
        credential: Option<&str>,
    ) -> Result<UsageSnapshot, FetchError> {
        let result = self.run(subscriber_id, credential).await;

        match &result {
            Ok(snapshot) => {
                enter(FetchStage::Succeeded);
                tracing::info!("Fetched {} usage records", snapshot.records.len());
            }
            Err(e) => {
                enter(FetchStage::Failed);
                if e.is_upstream() {
                    let detail = e.detail().unwrap_or_default();
                    tracing::warn!("Failed to fetch account usage: {}", detail);
                    self.notifier.notify(&Notification::fetch_failed(detail));
                } else {
                    tracing::info!("Usage fetch skipped: {}", e);
                }
            }
        }

        result
    }

    async fn run(
        &self,
        subscriber_id: &str,
        credential: Option<&str>,
    ) -> Result<UsageSnapshot, FetchError> {
        enter(FetchStage::ValidatingInput);
        let subscriber_id = subscriber_id.trim();
        if subscriber_id.is_empty() {
            return Err(FetchError::InputInvalid);
        }
        let credential = credential.filter(|c| !c.is_empty());
        if !self.inside_app && credential.is_none() {
            return Err(FetchError::Unauthenticated);
        }

        enter(FetchStage::Fetching);
        let body = self
            .api
            .query_user_info(subscriber_id, credential.unwrap_or(""))
            .await
            .map_err(|e| FetchError::UpstreamUnreachable {
                detail: format!("{:#}", e),
            })?;

        enter(FetchStage::Parsing);
        parse_snapshot(&body)
    }
}

fn enter(stage: FetchStage) {
    tracing::debug!(?stage, "usage pipeline");
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
