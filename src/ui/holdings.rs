use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::data::Holding;
use crate::ui::colors::UiColors;

const BAR_WIDTH: f64 = 30.0;
const LABEL_WIDTH: usize = 12;

/// Ranked holdings as horizontal bars, one per holding, labeled by the first
/// word of the name and scaled against the largest weighting. The highlighted
/// row shows the full name instead of the short label.
pub fn holdings_lines(
    holdings: &[Holding],
    highlighted: Option<usize>,
    colors: &UiColors,
) -> Vec<Line<'static>> {
    let max_weight = holdings
        .iter()
        .map(|h| h.weighting)
        .fold(f64::MIN, f64::max)
        .max(f64::EPSILON);

    holdings
        .iter()
        .enumerate()
        .map(|(index, holding)| {
            let is_highlighted = highlighted == Some(index);
            let filled = ((holding.weighting / max_weight) * BAR_WIDTH).round() as usize;
            let label = if is_highlighted {
                holding.name.clone()
            } else {
                format!("{:<width$}", holding.short_name(), width = LABEL_WIDTH)
            };
            let mut label_style = Style::new().fg(colors.label_fg);
            if is_highlighted {
                label_style = Style::new()
                    .fg(colors.highlight_fg)
                    .add_modifier(Modifier::REVERSED);
            }
            let mut spans = vec![Span::styled(label, label_style)];
            if !is_highlighted {
                spans.push(Span::styled(
                    "▇".repeat(filled.max(1)),
                    Style::new().fg(colors.bar_fg),
                ));
                spans.push(Span::styled(
                    format!(" {:.1}%", holding.weighting),
                    Style::new().fg(colors.value_fg),
                ));
            } else {
                spans.push(Span::styled(
                    format!("  {:.1}%", holding.weighting),
                    Style::new().fg(colors.value_fg),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PALETTES;

    fn holdings() -> Vec<Holding> {
        vec![
            Holding {
                name: "Acme Industrial Holdings".to_string(),
                weighting: 5.2,
            },
            Holding {
                name: "Globex Corporation".to_string(),
                weighting: 2.6,
            },
        ]
    }

    #[test]
    fn bars_are_labeled_by_first_word() {
        let lines = holdings_lines(&holdings(), None, &UiColors::new(&PALETTES[0]));
        assert!(lines[0].spans[0].content.starts_with("Acme"));
        assert!(!lines[0].spans[0].content.contains("Industrial"));
        assert!(lines[1].spans[0].content.starts_with("Globex"));
    }

    #[test]
    fn bars_scale_against_the_largest_weighting() {
        let lines = holdings_lines(&holdings(), None, &UiColors::new(&PALETTES[0]));
        assert_eq!(lines[0].spans[1].content.chars().count(), 30);
        assert_eq!(lines[1].spans[1].content.chars().count(), 15);
    }

    #[test]
    fn highlighted_row_shows_the_full_name() {
        let lines = holdings_lines(&holdings(), Some(0), &UiColors::new(&PALETTES[0]));
        assert_eq!(lines[0].spans[0].content, "Acme Industrial Holdings");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn ranking_order_is_preserved() {
        let lines = holdings_lines(&holdings(), None, &UiColors::new(&PALETTES[0]));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].spans[0].content.starts_with("Acme"));
    }
}
