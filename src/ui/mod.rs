pub mod allocation;
pub mod app;
pub mod colors;
pub mod documents;
pub mod holdings;
pub mod rating;
pub mod risk;

pub use app::TuiApp;
pub use colors::UiColors;
