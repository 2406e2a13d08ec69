use color_eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data::FundRecord;
use crate::request::{FetchError, FundClient};

/// Ask the worker to fetch one fund record.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub fund_id: String,
}

/// Settlement of one request, keyed by the identifier it was issued for so
/// the UI can discard outcomes superseded by a newer selection.
#[derive(Debug)]
pub struct FetchOutcome {
    pub fund_id: String,
    pub result: Result<FundRecord, FetchError>,
}

/// Spawn the background fetch task. Requests arrive over `req_rx`, outcomes
/// leave over `outcome_tx`; the task ends when the request channel closes.
pub fn create_fetch_task<C>(
    client: C,
    mut req_rx: mpsc::UnboundedReceiver<FetchRequest>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
) -> JoinHandle<Result<()>>
where
    C: FundClient + 'static,
{
    tokio::spawn(async move {
        while let Some(FetchRequest { fund_id }) = req_rx.recv().await {
            log::debug!("fetching record for {fund_id}");
            let result = client.fund_record(&fund_id).await;
            if let Err(err) = &result {
                log::warn!("fetch for {fund_id} failed: {err}");
            }
            if outcome_tx.send(FetchOutcome { fund_id, result }).is_err() {
                // UI is gone; nothing left to report to.
                break;
            }
        }
        Ok(())
    })
}
