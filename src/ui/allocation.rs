use itertools::Itertools;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::data::AssetAllocation;
use crate::ui::colors::UiColors;

const BAR_WIDTH: f64 = 30.0;
const LABEL_WIDTH: usize = 14;

/// Asset-allocation breakdown as proportional bars, largest class first.
pub fn allocation_lines(asset: &[AssetAllocation], colors: &UiColors) -> Vec<Line<'static>> {
    asset
        .iter()
        .sorted_by(|a, b| b.weighting.total_cmp(&a.weighting))
        .map(|slice| {
            let filled = ((slice.weighting / 100.0) * BAR_WIDTH).round() as usize;
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", truncated(&slice.name), width = LABEL_WIDTH),
                    Style::new().fg(colors.label_fg),
                ),
                Span::styled("▇".repeat(filled.max(1)), Style::new().fg(colors.bar_fg)),
                Span::styled(
                    format!(" {:.1}%", slice.weighting),
                    Style::new().fg(colors.value_fg),
                ),
            ])
        })
        .collect()
}

fn truncated(name: &str) -> String {
    if name.chars().count() > LABEL_WIDTH {
        let cut: String = name.chars().take(LABEL_WIDTH - 1).collect();
        format!("{cut}…")
    } else {
        name.to_string()
    }
}
