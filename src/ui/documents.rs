use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::data::Document;
use crate::ui::colors::UiColors;

/// Document controls as a row of buttons labeled by type; the selected one
/// is the target of the next open action.
pub fn documents_line(
    documents: &[Document],
    selected: usize,
    colors: &UiColors,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(documents.len() * 2);
    for (index, doc) in documents.iter().enumerate() {
        let mut style = Style::new().fg(colors.button_fg).bg(colors.button_bg);
        if index == selected {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", doc.doc_type), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
