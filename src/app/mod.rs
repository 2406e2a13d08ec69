use color_eyre::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::ApiConfig;
use crate::fetch::{create_fetch_task, FetchOutcome, FetchRequest};
use crate::launch::SystemOpener;
use crate::request::HttpFundClient;
use crate::ui::TuiApp;

/// Wires the fetch worker to the UI loop: requests flow one way, outcomes
/// flow back, and all view state lives inside the UI task.
#[derive(Debug, Clone)]
pub struct App {
    initial_fund: Option<String>,
}

impl App {
    pub fn new(initial_fund: Option<String>) -> Self {
        Self { initial_fund }
    }

    pub async fn run(&self) -> Result<()> {
        let (request_tx, request_rx) = mpsc::unbounded_channel::<FetchRequest>();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<FetchOutcome>();

        let client = HttpFundClient::new(&ApiConfig::from_env());
        let fetch_task = create_fetch_task(client, request_rx, outcome_tx);

        let initial_fund = self.initial_fund.clone();
        let ui_task = tokio::task::spawn_blocking(move || {
            let terminal = ratatui::init();
            let app = TuiApp::new(initial_fund, request_tx, Arc::new(SystemOpener));
            let app_result = app.run(terminal, outcome_rx);
            ratatui::restore();
            app_result
        });

        // The UI owns the request sender; when it returns the channel closes
        // and the worker drains out on its own.
        let ui_result = ui_task.await?;
        let _ = fetch_task.await?;
        ui_result
    }
}
