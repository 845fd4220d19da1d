use anyhow::Result;
use async_trait::async_trait;

/// An operator-facing web page the login flow can drive.
#[async_trait]
pub trait WebSurface: Send {
    async fn load_url(&mut self, url: &str) -> Result<()>;
    /// Brings the surface in front of the operator.
    async fn present(&mut self) -> Result<()>;
    /// Runs `script` in the current page and returns its JSON value.
    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value>;
    /// False once the operator has closed the surface.
    async fn is_open(&mut self) -> bool;
}
