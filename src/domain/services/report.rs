#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::Extractor;
use crate::domain::models::AnalysisResult;

/// Indigo, red, green, orange and violet, cycled per data point.
const PALETTE: [Color; 5] = [
    Color::Rgb(165, 180, 252),
    Color::Rgb(252, 165, 165),
    Color::Rgb(134, 239, 172),
    Color::Rgb(253, 186, 116),
    Color::Rgb(196, 181, 253),
];

const ACCENT: Color = Color::Rgb(129, 140, 248);
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 50;

/// Splits text on spaces into lines no wider than `line_max_width`. Words
/// longer than the width get a line of their own.
pub fn wrap(text: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = vec![];

    for full_line in text.split('\n') {
        if full_line.trim().is_empty() {
            lines.push("".to_string());
            continue;
        }

        let mut char_count = 0;
        let mut current_words: Vec<&str> = vec![];

        for word in full_line.split(' ') {
            let word_len = word.chars().count();
            if !current_words.is_empty() && word_len + char_count > line_max_width {
                lines.push(current_words.join(" ").trim_end().to_string());
                current_words = vec![];
                char_count = 0;
            }

            current_words.push(word);
            char_count += word_len + 1;
        }

        if !current_words.is_empty() {
            lines.push(current_words.join(" ").trim_end().to_string());
        }
    }

    return lines;
}

fn format_percentage(percentage: f64) -> String {
    if percentage.fract() == 0.0 {
        return format!("{percentage:.0}%");
    }
    return format!("{percentage:.1}%");
}

/// Number of filled cells for a percentage, clamped to the bar.
pub fn bar_cells(percentage: f64, bar_width: usize) -> usize {
    let clamped = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };

    return ((clamped / 100.0) * bar_width as f64).round() as usize;
}

fn heading(text: &str) -> Line<'static> {
    return Line::from(Span::styled(
        text.to_uppercase(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
}

fn paragraph(text: &str, width: usize, indent: &str, lines: &mut Vec<Line<'static>>) {
    let text_width = width.saturating_sub(indent.chars().count()).max(1);
    for line in wrap(text, text_width) {
        lines.push(Line::from(format!("{indent}{line}")));
    }
}

fn list_item(marker: &str, text: &str, width: usize, lines: &mut Vec<Line<'static>>) {
    let hanging = " ".repeat(marker.chars().count());
    let text_width = width.saturating_sub(hanging.len()).max(1);

    for (idx, line) in wrap(text, text_width).into_iter().enumerate() {
        if idx == 0 {
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(ACCENT)),
                Span::from(line),
            ]));
        } else {
            lines.push(Line::from(format!("{hanging}{line}")));
        }
    }
}

fn chart(result: &AnalysisResult, width: usize, lines: &mut Vec<Line<'static>>) {
    let name_width = result
        .chart_data
        .iter()
        .map(|point| return point.name.chars().count())
        .max()
        .unwrap_or(0);

    // name, space, bar, space, "100.0%"
    let bar_width = width
        .saturating_sub(name_width + 8)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

    for (idx, point) in result.chart_data.iter().enumerate() {
        let filled = bar_cells(point.percentage, bar_width);
        let colour = PALETTE[idx % PALETTE.len()];

        lines.push(Line::from(vec![
            Span::from(format!("{:<name_width$} ", point.name)),
            Span::styled("█".repeat(filled), Style::default().fg(colour)),
            Span::styled(
                "░".repeat(bar_width - filled),
                Style::default().fg(Color::DarkGray),
            ),
            Span::from(format!(" {}", format_percentage(point.percentage))),
        ]));
    }
}

pub struct Report {}

impl Report {
    /// Renders a finished analysis as pre-wrapped terminal lines for a
    /// viewport `width` cells wide.
    pub fn lines(result: &AnalysisResult, width: u16, show_visual: bool) -> Vec<Line<'static>> {
        let width = usize::from(width).max(MIN_BAR_WIDTH * 2);
        let mut lines: Vec<Line<'static>> = vec![];

        lines.push(Line::from(Span::styled(
            "ANALYSIS COMPLETE",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            result.theme.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from("Your personal shadow work report"));
        lines.push(Line::from(""));

        lines.push(heading("Mental Landscape"));
        chart(result, width, &mut lines);
        lines.push(Line::from(""));

        lines.push(heading("The Vibe Check"));
        paragraph(&result.vibe_check, width, "", &mut lines);
        lines.push(Line::from(""));

        lines.push(heading("Deep Dive"));
        for item in result.deep_dive.iter() {
            list_item("• ", item, width, &mut lines);
        }
        lines.push(Line::from(""));

        lines.push(heading("Reality Check"));
        paragraph(&result.reality_check, width, "", &mut lines);
        lines.push(Line::from(""));

        lines.push(heading("Healing Era Roadmap"));
        for (idx, item) in result.healing_roadmap.iter().enumerate() {
            list_item(&format!("{}. ", idx + 1), item, width, &mut lines);
        }
        lines.push(Line::from(""));

        lines.push(heading("Visual Anchor"));
        paragraph(&format!("Theme: {}", result.theme), width, "", &mut lines);
        let image_line = match Extractor::image_bytes(&result.image_url) {
            Some(bytes) => format!(
                "Image: {:.1} KB PNG. Press s to save it.",
                bytes.len() as f64 / 1024.0
            ),
            None => "Image: unavailable".to_string(),
        };
        paragraph(&image_line, width, "", &mut lines);

        if show_visual {
            lines.push(Line::from(""));
            lines.push(heading("Visual Interpretation"));
            paragraph(&result.visual_description, width, "  ", &mut lines);
            lines.push(Line::from(Span::styled(
                "Press v to close",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Press v to read the visual interpretation",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press r to start a new journey",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        return lines;
    }
}
