//! Account usage retrieval and normalization.
//!
//! This module turns one `queryUserInfoSeven` call into a [`types::UsageSnapshot`]:
//! - Validates the subscriber number and stored cookie before any request
//! - Fetches the body over HTTP with the mobile user-agent
//! - Parses percent phrases, clamps them, and maps category tags
//! - Collapses every failure into a short displayable message

pub mod api_client;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod percent;
pub mod types;
