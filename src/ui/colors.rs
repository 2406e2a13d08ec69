use ratatui::style::{palette::tailwind, Color};

pub struct UiColors {
    pub buffer_bg: Color,
    pub header_fg: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,
    pub label_fg: Color,
    pub value_fg: Color,
    pub section_fg: Color,
    pub star_fg: Color,
    pub bar_fg: Color,
    pub highlight_fg: Color,
    pub button_bg: Color,
    pub button_fg: Color,
    pub footer_border_color: Color,
}

impl UiColors {
    pub const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            header_fg: tailwind::SLATE.c100,
            badge_bg: color.c900,
            badge_fg: color.c300,
            label_fg: color.c400,
            value_fg: tailwind::SLATE.c200,
            section_fg: color.c300,
            star_fg: tailwind::AMBER.c400,
            bar_fg: color.c500,
            highlight_fg: color.c300,
            button_bg: color.c700,
            button_fg: tailwind::SLATE.c100,
            footer_border_color: color.c400,
        }
    }
}

/// Color of one risk cell: red scales 0 -> 255 and green 255 -> 0 across the
/// sequence, so the first cell is green and the last is red.
pub fn risk_cell_color(index: u8, count: u8) -> Color {
    let ratio = f64::from(index) / f64::from(count.saturating_sub(1).max(1));
    let red = (255.0 * ratio).floor() as u8;
    let green = (255.0 * (1.0 - ratio)).floor() as u8;
    Color::Rgb(red, green, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_cells_run_green_to_red() {
        assert_eq!(risk_cell_color(0, 10), Color::Rgb(0, 255, 0));
        assert_eq!(risk_cell_color(9, 10), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn midpoint_mixes_both_channels() {
        let Color::Rgb(red, green, blue) = risk_cell_color(5, 10) else {
            panic!("expected an rgb color");
        };
        assert!(red > 100 && red < 160);
        assert!(green > 100 && green < 160);
        assert_eq!(blue, 0);
    }
}
