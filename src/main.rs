//! Terminal detail viewer for financial funds.
//!
//! Fetches a fund record by identifier and renders identity, ratings, risk,
//! portfolio composition, and documents. The portfolio visualizations are
//! mounted lazily, once scrolled into view.

pub mod app;
pub mod config;
pub mod data;
pub mod fetch;
pub mod launch;
pub mod request;
pub mod state;
pub mod ui;

use crate::app::App;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let initial_fund = std::env::args().nth(1).filter(|id| !id.is_empty());
    let app = App::new(initial_fund);
    app.run().await
}
