//! Shapes a `queryUserInfoSeven` body into a [`UsageSnapshot`].

use super::error::FetchError;
use super::percent::PercentReading;
use super::types::{RawUsageEntry, UsageCategory, UsageRecord, UsageSnapshot, UserInfoResponse};

/// Parses the response body. Any JSON or shape problem is `UpstreamMalformed`.
pub fn parse_snapshot(body: &str) -> Result<UsageSnapshot, FetchError> {
    let response: UserInfoResponse =
        serde_json::from_str(body).map_err(|e| FetchError::UpstreamMalformed {
            detail: e.to_string(),
        })?;
    Ok(normalize_response(response))
}

/// Converts every entry, preserving upstream order.
pub fn normalize_response(response: UserInfoResponse) -> UsageSnapshot {
    let records = response
        .data
        .data_list
        .iter()
        .map(normalize_entry)
        .collect();

    UsageSnapshot {
        refreshed_at: response.flush_date_time,
        records,
    }
}

pub fn normalize_entry(entry: &RawUsageEntry) -> UsageRecord {
    let reading = PercentReading::parse(&entry.used_title);
    if reading == PercentReading::Unrecognized {
        tracing::debug!(
            "No percent in usedTitle {:?} for {}, using fallback",
            entry.used_title,
            entry.category
        );
    }

    UsageRecord {
        category: UsageCategory::from_tag(&entry.category),
        percent_remaining: reading.remaining_percent(),
        remaining_quantity: parse_quantity(&entry.number),
        unit: entry.unit.clone(),
        label: entry.remain_title.clone(),
    }
}

/// Empty or unparsable quantities count as zero.
fn parse_quantity(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::warn!("Unparsable quantity {:?}, treating as 0", raw);
            0.0
        }
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
