//! HTTP client for the account service.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

const QUERY_PATH: &str = "/mobileService/home/queryUserInfoSeven.htm";

/// Source of raw `queryUserInfoSeven` bodies.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Fetches the response body as text. Non-success statuses are errors.
    async fn query_user_info(&self, subscriber_id: &str, cookie: &str) -> Result<String>;
}

/// Builds the usage endpoint URL for a subscriber.
pub fn user_info_url(host: &str, subscriber_id: &str) -> String {
    format!(
        "https://{}{}?showType=3&version=iphone_c@7.0600&desmobiel={}",
        host, QUERY_PATH, subscriber_id
    )
}

/// Blocking `ureq` client run on the blocking pool.
pub struct UreqAccountApi {
    agent: ureq::Agent,
    host: String,
    user_agent: String,
}

impl UreqAccountApi {
    pub fn new(config: &AppConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.request_timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            host: config.endpoint_host.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl AccountApi for UreqAccountApi {
    async fn query_user_info(&self, subscriber_id: &str, cookie: &str) -> Result<String> {
        let agent = self.agent.clone();
        let url = user_info_url(&self.host, subscriber_id);
        let user_agent = self.user_agent.clone();
        let cookie = cookie.to_string();

        tokio::task::spawn_blocking(move || -> Result<String> {
            agent
                .get(&url)
                .header("user-agent", &user_agent)
                .header("cookie", &cookie)
                .call()
                .context("Failed to query account usage")?
                .body_mut()
                .read_to_string()
                .context("Failed to read account usage response")
        })
        .await
        .context("Account usage request task failed")?
    }
}

/// Serves one fixed body and records the requests it saw.
#[cfg(test)]
pub struct StaticApi {
    pub body: String,
    pub calls: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl StaticApi {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl AccountApi for StaticApi {
    async fn query_user_info(&self, subscriber_id: &str, cookie: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((subscriber_id.to_string(), cookie.to_string()));
        }
        Ok(self.body.clone())
    }
}
