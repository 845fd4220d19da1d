//! Draws a [`WidgetTree`] as text.

use super::tree::{Background, ProgressBar, Row, WidgetBody, WidgetTree};
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Columns for the kind, progress and amount cells.
const CELL_WIDTHS: [usize; 3] = [8, 14, 10];
/// Layout points per terminal cell for progress bars.
const POINTS_PER_CELL: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            width: 36,
        }
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

struct Segment {
    text: String,
    fg: Option<Color>,
    bold: bool,
    dim: bool,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
            bold: false,
            dim: false,
        }
    }
}

pub fn render(tree: &WidgetTree, out: &mut dyn Write, options: &RenderOptions) -> io::Result<()> {
    let painter = Painter::new(tree, options);

    match &tree.body {
        WidgetBody::Failure { message, font_size } => {
            for line in message.lines() {
                let mut segment = painter.text(pad(line, options.width, Align::Center));
                segment.bold = *font_size > 14;
                painter.line(out, vec![segment])?;
            }
        }
        WidgetBody::Usage {
            header,
            rows,
            footer,
        } => {
            tracing::trace!(logo = %header.logo.src, "logo drawn as marker");
            let mut title = painter.text(format!("◼ {}", header.title));
            title.bold = true;
            title.dim = true;
            painter.line(out, vec![title])?;
            painter.line(out, Vec::new())?;

            for row in rows {
                painter.line(out, painter.row(row))?;
            }

            painter.line(out, Vec::new())?;
            let mut stamp = painter.text(pad(footer, options.width, Align::Right));
            stamp.dim = true;
            painter.line(out, vec![stamp])?;
        }
    }

    if let Some(at) = tree.refresh_after {
        let hint = format!("下次刷新 {}", at.format("%H:%M:%S"));
        let mut segment = Segment::plain(pad(&hint, options.width, Align::Right));
        segment.dim = true;
        painter.line(out, vec![segment])?;
    }
    out.flush()
}

struct Painter {
    color: bool,
    width: usize,
    text_fg: Option<Color>,
    bg: Option<Color>,
}

impl Painter {
    fn new(tree: &WidgetTree, options: &RenderOptions) -> Self {
        let bg = match &tree.background {
            Background::Color(value) => parse_color(value),
            Background::Image(src) => {
                tracing::debug!("Image background {src} is not drawn in the terminal");
                None
            }
            Background::Default => None,
        };
        Self {
            color: options.color,
            width: options.width,
            text_fg: tree.text_color.as_deref().and_then(parse_color),
            bg,
        }
    }

    fn text(&self, text: impl Into<String>) -> Segment {
        Segment {
            fg: self.text_fg,
            ..Segment::plain(text)
        }
    }

    fn row(&self, row: &Row) -> Vec<Segment> {
        match row {
            Row::Line(text) => vec![self.text(text.clone())],
            Row::TableHeader(cells) => self.cells(
                self.text(pad(&cells[0], CELL_WIDTHS[0], Align::Left)),
                vec![self.text(pad(&cells[1], CELL_WIDTHS[1], Align::Center))],
                self.text(pad(&cells[2], CELL_WIDTHS[2], Align::Right)),
            ),
            Row::TableRow {
                kind,
                progress,
                amount,
            } => {
                let cells = bar_cells(progress);
                let lead = (CELL_WIDTHS[1] - cells) / 2;
                let mut bar = vec![Segment::plain(" ".repeat(lead))];
                bar.extend(self.progress(progress, cells));
                bar.push(Segment::plain(" ".repeat(CELL_WIDTHS[1] - cells - lead)));
                self.cells(
                    self.text(pad(kind, CELL_WIDTHS[0], Align::Left)),
                    bar,
                    self.text(pad(amount, CELL_WIDTHS[2], Align::Right)),
                )
            }
        }
    }

    /// Lays out three cells with the slack split between the two gaps.
    fn cells(&self, first: Segment, middle: Vec<Segment>, last: Segment) -> Vec<Segment> {
        let used: usize = CELL_WIDTHS.iter().sum();
        let slack = self.width.saturating_sub(used);
        let mut segments = vec![first, Segment::plain(" ".repeat(slack / 2))];
        segments.extend(middle);
        segments.push(Segment::plain(" ".repeat(slack - slack / 2)));
        segments.push(last);
        segments
    }

    fn progress(&self, bar: &ProgressBar, cells: usize) -> Vec<Segment> {
        let filled = ((bar.fraction.clamp(0.0, 1.0) * cells as f64).round() as usize).min(cells);
        let (done, rest) = if self.color { ("█", "█") } else { ("█", "░") };
        vec![
            Segment {
                fg: parse_color(&bar.color),
                ..Segment::plain(done.repeat(filled))
            },
            Segment {
                fg: parse_color(&bar.track),
                ..Segment::plain(rest.repeat(cells - filled))
            },
        ]
    }

    fn line(&self, out: &mut dyn Write, segments: Vec<Segment>) -> io::Result<()> {
        let used: usize = segments.iter().map(|s| s.text.width()).sum();
        let mut segments = segments;
        segments.push(Segment::plain(" ".repeat(self.width.saturating_sub(used))));

        for segment in segments {
            if !self.color {
                write!(out, "{}", segment.text)?;
                continue;
            }
            let mut styled = style(segment.text);
            if let Some(fg) = segment.fg {
                styled = styled.with(fg);
            }
            if let Some(bg) = self.bg {
                styled = styled.on(bg);
            }
            if segment.bold {
                styled = styled.bold();
            }
            if segment.dim {
                styled = styled.dim();
            }
            write!(out, "{styled}")?;
        }
        writeln!(out)
    }
}

fn bar_cells(bar: &ProgressBar) -> usize {
    usize::from(bar.width / POINTS_PER_CELL).clamp(1, CELL_WIDTHS[1])
}

/// Pads `text` to `width` display columns. Wider text is left as is.
fn pad(text: &str, width: usize, align: Align) -> String {
    let space = width.saturating_sub(text.width());
    let (left, right) = match align {
        Align::Left => (0, space),
        Align::Right => (space, 0),
        Align::Center => (space / 2, space - space / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// `#rgb`, `#rrggbb` or a color name.
fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        let digits: Vec<char> = hex.chars().collect();
        return match digits.len() {
            3 => {
                let expand = |c: char| channel(&format!("{c}{c}"));
                Some(Color::Rgb {
                    r: expand(digits[0])?,
                    g: expand(digits[1])?,
                    b: expand(digits[2])?,
                })
            }
            6 => {
                let pair = |i: usize| channel(&digits[i..i + 2].iter().collect::<String>());
                Some(Color::Rgb {
                    r: pair(0)?,
                    g: pair(2)?,
                    b: pair(4)?,
                })
            }
            _ => None,
        };
    }
    Color::try_from(value).ok()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
