use ratatui::style::palette::tailwind;

pub const PALETTES: [tailwind::Palette; 4] = [
    tailwind::BLUE,
    tailwind::EMERALD,
    tailwind::INDIGO,
    tailwind::RED,
];

pub const INFO_TEXT: [&str; 2] = [
    "(Esc) quit | (j/k) scroll | (Tab) next document | (Enter) open document",
    "(/) select fund | (Shift + →/←) cycle color",
];

pub const POLL_DURATION_MS: u64 = 50;
pub const NOTICE_DURATION_MS: u64 = 1500;

/// Number of discrete cells in the SRRI risk indicator.
pub const RISK_CELL_COUNT: u8 = 10;

/// Fraction of the deferred-section anchor that must be visible before the
/// heavy visualizations are mounted.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

pub const MSG_SELECT_FUND: &str = "Select a fund to see its details";
pub const MSG_LOADING: &str = " Loading data...";
pub const MSG_FETCH_FAILED: &str = "Failed to load fund details. Please try again later.";

pub const API_URL_ENV: &str = "FUNDVIEW_API_URL";
pub const DEFAULT_API_URL: &str = "https://funds.example.com";

/// Base URL for the fund data API, taken from the environment with a
/// compiled-in fallback.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { base_url }
    }
}
