//! Horizontal grouped bar chart for the country breakdown
//!
//! Each country gets two bars, delivered then failed, scaled against the
//! largest value in the chart:
//!
//! ```text
//! US      ████████████████████████ 8
//!         ███ 1
//! Unknown ██████ 2
//!         ██████ 2
//! ```

use crate::output::format_number;
use colored::Colorize;
use wabastat_core::summary::CountrySummary;

const MIN_WIDTH: usize = 40;
const MAX_WIDTH: usize = 120;
const FALLBACK_WIDTH: usize = 80;
const MAX_LABEL_WIDTH: usize = 20;
const MIN_BAR_WIDTH: usize = 10;

const DELIVERED_GLYPH: char = '█';
const FAILED_GLYPH: char = '▒';

// Series colors: green for delivered, red for failed
const DELIVERED_RGB: (u8, u8, u8) = (0x4a, 0xde, 0x80);
const FAILED_RGB: (u8, u8, u8) = (0xf8, 0x71, 0x71);

/// Chart width from the terminal, clamped to a readable range
pub fn detect_chart_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| usize::from(w))
        .unwrap_or(FALLBACK_WIDTH)
        .clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Bar chart renderer
#[derive(Debug, Clone)]
pub struct BarChart {
    width: usize,
    color: bool,
}

impl BarChart {
    /// Create a renderer for the given total width
    pub fn new(width: usize, color: bool) -> Self {
        Self {
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            color,
        }
    }

    /// Render the chart with a legend
    pub fn render(&self, countries: &[CountrySummary]) -> String {
        if countries.is_empty() {
            return String::new();
        }

        let label_width = countries
            .iter()
            .map(|c| c.country.chars().count())
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);
        let max_value = countries
            .iter()
            .map(|c| c.delivered.max(c.failed))
            .max()
            .unwrap_or(0);
        let value_width = format_number(max_value).len();
        let bar_width = self
            .width
            .saturating_sub(label_width + value_width + 2)
            .max(MIN_BAR_WIDTH);

        let mut output = String::new();
        for summary in countries {
            let label = truncate_label(&summary.country, label_width);
            output.push_str(&format!(
                "{:<label_width$} {} {}\n",
                label,
                self.bar(summary.delivered, max_value, bar_width, DELIVERED_GLYPH, DELIVERED_RGB),
                format_number(summary.delivered)
            ));
            output.push_str(&format!(
                "{:<label_width$} {} {}\n",
                "",
                self.bar(summary.failed, max_value, bar_width, FAILED_GLYPH, FAILED_RGB),
                format_number(summary.failed)
            ));
        }

        output.push_str(&format!(
            "\n{} delivered  {} failed\n",
            self.paint(DELIVERED_GLYPH.to_string(), DELIVERED_RGB),
            self.paint(FAILED_GLYPH.to_string(), FAILED_RGB)
        ));
        output
    }

    fn bar(&self, value: u64, max_value: u64, bar_width: usize, glyph: char, rgb: (u8, u8, u8)) -> String {
        let length = scaled_length(value, max_value, bar_width);
        self.paint(glyph.to_string().repeat(length), rgb)
    }

    fn paint(&self, text: String, (r, g, b): (u8, u8, u8)) -> String {
        if self.color {
            text.truecolor(r, g, b).to_string()
        } else {
            text
        }
    }
}

/// Bar length for a value; any non-zero value gets at least one cell
fn scaled_length(value: u64, max_value: u64, bar_width: usize) -> usize {
    if value == 0 || max_value == 0 {
        return 0;
    }
    let scaled = (value as u128 * bar_width as u128 / max_value as u128) as usize;
    scaled.max(1)
}

fn truncate_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
