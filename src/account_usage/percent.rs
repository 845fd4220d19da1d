//! Percent extraction from the human-readable `usedTitle` string.
//!
//! Upstream reports either how much is used ("已用40%") or how much is left
//! ("剩余60%"). The English forms "used 40%" / "remaining 60%" are accepted
//! too. Anything else falls back to [`FALLBACK_PERCENT`].

use regex::Regex;
use std::sync::OnceLock;

/// Remaining percent reported when `usedTitle` carries no usable figure.
pub const FALLBACK_PERCENT: f64 = 0.0;

/// What the title says about the line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentReading {
    /// "剩余X%": X is the remaining share.
    Remaining(f64),
    /// "已用X%": remaining is `100 - X`.
    Used(f64),
    /// No recognizable pattern, or the figure did not parse.
    Unrecognized,
}

fn percent_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(已用|剩余|used|remaining)\s*(-?[\d.]+)?\s*%").ok())
        .as_ref()
}

impl PercentReading {
    /// Parses the first percent phrase found in `title`.
    pub fn parse(title: &str) -> Self {
        let Some(caps) = percent_pattern().and_then(|re| re.captures(title)) else {
            return PercentReading::Unrecognized;
        };

        let value = match caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()) {
            Some(v) if v.is_finite() => v,
            _ => return PercentReading::Unrecognized,
        };

        match caps.get(1).map(|m| m.as_str().to_lowercase()).as_deref() {
            Some("剩余") | Some("remaining") => PercentReading::Remaining(value),
            Some("已用") | Some("used") => PercentReading::Used(value),
            _ => PercentReading::Unrecognized,
        }
    }

    /// Remaining percent, clamped into `[0, 100]`.
    pub fn remaining_percent(self) -> f64 {
        let raw = match self {
            PercentReading::Remaining(x) => x,
            PercentReading::Used(x) => 100.0 - x,
            PercentReading::Unrecognized => FALLBACK_PERCENT,
        };
        clamp_percent(raw)
    }
}

/// Clamps into `[0, 100]`; NaN maps to the fallback.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        FALLBACK_PERCENT
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
#[path = "tests/percent_tests.rs"]
mod tests;
