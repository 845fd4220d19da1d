//! Data types for account usage snapshots.

use serde::{Deserialize, Deserializer, Serialize};

/// Category of a usage line item.
///
/// Upstream tags are matched exactly; anything else is kept as `Unknown` so
/// new line items still reach the display instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum UsageCategory {
    Flow,
    Fee,
    Voice,
    Point,
    Credit,
    Voucher,
    Unknown(String),
}

impl UsageCategory {
    /// Maps an upstream `type` tag to a category.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "flow" => UsageCategory::Flow,
            "fee" => UsageCategory::Fee,
            "voice" => UsageCategory::Voice,
            "point" => UsageCategory::Point,
            "credit" => UsageCategory::Credit,
            "woPay" => UsageCategory::Voucher,
            other => UsageCategory::Unknown(other.to_string()),
        }
    }

    /// Short display name used in table rows.
    pub fn display_name(&self) -> &str {
        match self {
            UsageCategory::Flow => "流量",
            UsageCategory::Fee => "话费",
            UsageCategory::Voice => "语音",
            UsageCategory::Point => "积分",
            UsageCategory::Credit => "信用分",
            UsageCategory::Voucher => "电子券",
            UsageCategory::Unknown(raw) => raw,
        }
    }

    /// Categories shown on the small and medium widgets.
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            UsageCategory::Flow | UsageCategory::Fee | UsageCategory::Voice
        )
    }
}

impl std::fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One line item as received from `queryUserInfoSeven`.
///
/// The payload carries dozens of presentation fields; only the ones the
/// normalizer reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUsageEntry {
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(rename = "usedTitle")]
    pub used_title: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default)]
    pub unit: String,
    #[serde(rename = "remainTitle", default)]
    pub remain_title: String,
}

/// Top-level response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    #[serde(default)]
    pub flush_date_time: String,
    pub data: UserInfoData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoData {
    #[serde(rename = "dataList")]
    pub data_list: Vec<RawUsageEntry>,
}

/// A normalized usage line item ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
    pub category: UsageCategory,
    /// Always within `[0, 100]`.
    pub percent_remaining: f64,
    /// Full precision; rounding happens at presentation.
    pub remaining_quantity: f64,
    pub unit: String,
    pub label: String,
}

/// Result of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSnapshot {
    /// Opaque upstream refresh timestamp, displayed verbatim.
    pub refreshed_at: String,
    pub records: Vec<UsageRecord>,
}

/// Session cookie captured through the login window, scoped to one number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    pub token: String,
    pub subscriber_id: String,
}

/// Accepts `"6"` as well as `6` / `6.5` for quantity fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
