use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::colors::UiColors;

pub const STAR_MAX: u8 = 5;
pub const STAR_FILLED: &str = "★";
pub const STAR_HOLLOW: &str = "☆";

/// Analyst rating as a five-star row, clamped to the scale.
pub fn rating_line(rating: u8, colors: &UiColors) -> Line<'static> {
    let filled = rating.min(STAR_MAX);
    let mut text = STAR_FILLED.repeat(filled as usize);
    text.push_str(&STAR_HOLLOW.repeat((STAR_MAX - filled) as usize));
    Line::from(Span::styled(text, Style::new().fg(colors.star_fg)))
}
