//! Failure taxonomy for the usage pipeline.
//!
//! `Display` is the exact text shown in place of the usage widget. The
//! technical cause of upstream failures is kept in `detail` for logs and
//! notifications.

use thiserror::Error;

pub const SUBSCRIBER_REQUIRED_MESSAGE: &str = "subscriber id required";
pub const CREDENTIAL_MISSING_MESSAGE: &str = "missing credential, please authenticate";
pub const FETCH_FAILED_MESSAGE: &str =
    "failed to retrieve account info\ncheck network or re-authenticate";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No subscriber number configured.
    #[error("subscriber id required")]
    InputInvalid,

    /// Running outside the host app with no stored cookie.
    #[error("missing credential, please authenticate")]
    Unauthenticated,

    /// Transport failure or non-success status.
    #[error("failed to retrieve account info\ncheck network or re-authenticate")]
    UpstreamUnreachable { detail: String },

    /// Body was not JSON or lacked `data.dataList`.
    #[error("failed to retrieve account info\ncheck network or re-authenticate")]
    UpstreamMalformed { detail: String },
}

impl FetchError {
    /// Technical cause, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            FetchError::UpstreamUnreachable { detail }
            | FetchError::UpstreamMalformed { detail } => Some(detail),
            _ => None,
        }
    }

    /// Upstream failures trigger the "fetch failed" notification.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            FetchError::UpstreamUnreachable { .. } | FetchError::UpstreamMalformed { .. }
        )
    }
}
