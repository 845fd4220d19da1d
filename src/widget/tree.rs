use crate::account_usage::error::FetchError;
use crate::account_usage::types::{UsageRecord, UsageSnapshot};
use crate::settings::{DisplaySettings, TRANSPARENT_BACKGROUND};
use chrono::{DateTime, Local};
use std::time::Duration;

pub const LOGO_URL: &str = "https://p.pstatp.com/origin/1381a0002e9cbaedbc301";
pub const TITLE: &str = "中国联通";
pub const TABLE_HEADER: [&str; 3] = ["类型", "剩余百分比", "剩余量"];
pub const PROGRESS_COLOR: &str = "#39b54a";
pub const PROGRESS_TRACK: &str = "#dddddd";
pub const FAILURE_FONT_SIZE: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WidgetSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// White in light mode, black in dark mode
    Default,
    Color(String),
    /// Image link or local file
    Image(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetTree {
    pub background: Background,
    /// `None` means the default dynamic text color
    pub text_color: Option<String>,
    /// When the host should render again
    pub refresh_after: Option<DateTime<Local>>,
    pub body: WidgetBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetBody {
    /// Centered failure message
    Failure { message: String, font_size: u16 },
    Usage {
        header: Header,
        rows: Vec<Row>,
        /// Upstream refresh time
        footer: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub logo: ImageNode,
    pub title: String,
}

// Geometry is for image-capable hosts; the terminal draws a marker.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNode {
    pub src: String,
    pub width: u16,
    pub height: u16,
    pub border_radius: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// `"{label} {qty}{unit}"` on the small widget
    Line(String),
    TableHeader([String; 3]),
    TableRow {
        kind: String,
        progress: ProgressBar,
        amount: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub color: String,
    pub track: String,
    pub width: u16,
    #[allow(dead_code)]
    pub height: u16,
    #[allow(dead_code)]
    pub border_radius: u16,
    /// Within `[0, 1]`
    pub fraction: f64,
}

/// Builds the widget for one pipeline result. No I/O.
pub fn build(
    view: &Result<UsageSnapshot, FetchError>,
    size: WidgetSize,
    display: &DisplaySettings,
    now: DateTime<Local>,
    refresh_interval: Duration,
) -> WidgetTree {
    let snapshot = match view {
        Ok(snapshot) => snapshot,
        Err(err) => {
            return WidgetTree {
                background: Background::Default,
                text_color: None,
                refresh_after: None,
                body: WidgetBody::Failure {
                    message: err.to_string(),
                    font_size: FAILURE_FONT_SIZE,
                },
            }
        }
    };

    let rows = match size {
        WidgetSize::Small => snapshot
            .records
            .iter()
            .filter(|r| r.category.is_primary())
            .map(small_line)
            .collect(),
        WidgetSize::Medium => table(snapshot.records.iter().filter(|r| r.category.is_primary())),
        WidgetSize::Large => table(snapshot.records.iter()),
    };

    let refresh_after = chrono::Duration::from_std(refresh_interval)
        .ok()
        .and_then(|d| now.checked_add_signed(d));

    WidgetTree {
        background: resolve_background(display),
        text_color: display.text_color.clone(),
        refresh_after,
        body: WidgetBody::Usage {
            header: Header {
                logo: ImageNode {
                    src: LOGO_URL.to_string(),
                    width: 20,
                    height: 20,
                    border_radius: 4,
                },
                title: TITLE.to_string(),
            },
            rows,
            footer: snapshot.refreshed_at.clone(),
        },
    }
}

/// `boxBg` wins when set; the transparent sentinel swaps in the wallpaper.
pub fn resolve_background(display: &DisplaySettings) -> Background {
    match display.box_bg.as_deref() {
        None => Background::Default,
        Some(bg) if bg.contains(TRANSPARENT_BACKGROUND) => display
            .transparent_bg
            .clone()
            .map_or(Background::Default, Background::Image),
        Some(bg) if bg.starts_with("http://") || bg.starts_with("https://") => {
            Background::Image(bg.to_string())
        }
        Some(bg) => Background::Color(bg.to_string()),
    }
}

/// At most one decimal place, without a trailing `.0`.
pub fn format_quantity(value: f64) -> String {
    let rounded = round_tenth(value);
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn round_tenth(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10.0).round() / 10.0
    } else {
        0.0
    }
}

fn small_line(record: &UsageRecord) -> Row {
    Row::Line(format!(
        "{} {}{}",
        record.label,
        format_quantity(record.remaining_quantity),
        record.unit
    ))
}

fn table<'r>(records: impl Iterator<Item = &'r UsageRecord>) -> Vec<Row> {
    let mut rows = vec![Row::TableHeader(TABLE_HEADER.map(String::from))];
    rows.extend(records.map(|record| Row::TableRow {
        kind: record.category.display_name().to_string(),
        progress: ProgressBar {
            color: PROGRESS_COLOR.to_string(),
            track: PROGRESS_TRACK.to_string(),
            width: 80,
            height: 10,
            border_radius: 5,
            fraction: (round_tenth(record.percent_remaining) / 100.0).clamp(0.0, 1.0),
        },
        amount: format!(
            "{}{}",
            format_quantity(record.remaining_quantity),
            record.unit
        ),
    }));
    rows
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
