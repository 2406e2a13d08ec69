use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::config::RISK_CELL_COUNT;
use crate::ui::colors::{risk_cell_color, UiColors};

pub const CELL_FILLED: &str = "██";
pub const CELL_EMPTY: &str = "░░";
pub const NO_DATA: &str = "No SRRI provided";

/// SRRI indicator: a fixed run of colored cells plus a "score/10" label.
/// Cells below the score render filled, the cell at score - 1 is additionally
/// marked current, and every cell takes its interpolated slot color.
pub fn risk_line(srri: u8, colors: &UiColors) -> Line<'static> {
    if srri == 0 {
        return Line::from(Span::styled(NO_DATA, Style::new().fg(colors.value_fg)));
    }

    let mut spans = Vec::with_capacity(RISK_CELL_COUNT as usize * 2 + 1);
    for index in 0..RISK_CELL_COUNT {
        let mut style = Style::new().fg(risk_cell_color(index, RISK_CELL_COUNT));
        let glyph = if index < srri { CELL_FILLED } else { CELL_EMPTY };
        if index + 1 == srri {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(glyph, style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("Risk Level: {srri}/10"),
        Style::new().fg(colors.value_fg),
    ));
    Line::from(spans)
}
