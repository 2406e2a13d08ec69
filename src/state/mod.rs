use crate::data::FundRecord;
use crate::request::FetchError;

/// Load lifecycle of the detail container. Exactly one variant holds at a
/// time; transitions are driven by fund selection and fetch settlement only.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// No fund selected yet.
    Empty,
    /// A fetch for `fund_id` is outstanding.
    Loading { fund_id: String },
    /// The record for `fund_id` is on screen.
    Loaded {
        fund_id: String,
        record: Box<FundRecord>,
    },
    /// The fetch for `fund_id` rejected. The cause is collapsed to this flag.
    Failed { fund_id: String },
}

impl LoadState {
    /// Identifier the state currently refers to, if any.
    pub fn fund_id(&self) -> Option<&str> {
        match self {
            LoadState::Empty => None,
            LoadState::Loading { fund_id }
            | LoadState::Loaded { fund_id, .. }
            | LoadState::Failed { fund_id } => Some(fund_id),
        }
    }

    /// A new identifier was committed. Returns true when a fetch should be
    /// issued; an empty identifier is terminal and never fetches.
    pub fn select(&mut self, fund_id: &str) -> bool {
        if fund_id.is_empty() {
            *self = LoadState::Empty;
            return false;
        }
        *self = LoadState::Loading {
            fund_id: fund_id.to_string(),
        };
        true
    }

    /// A fetch settled. Outcomes are keyed by the identifier they were
    /// requested for; anything that does not match the identifier currently
    /// loading is stale and discarded, so a late response can never
    /// overwrite newer state.
    pub fn settle(&mut self, fund_id: &str, result: Result<FundRecord, FetchError>) {
        let expected = match self {
            LoadState::Loading { fund_id } => fund_id.as_str(),
            _ => {
                log::debug!("discarding settle for {fund_id}: no fetch outstanding");
                return;
            }
        };
        if expected != fund_id {
            log::debug!("discarding stale settle for {fund_id}: now loading {expected}");
            return;
        }
        *self = match result {
            Ok(record) => LoadState::Loaded {
                fund_id: fund_id.to_string(),
                record: Box::new(record),
            },
            Err(err) => {
                log::warn!("fetch for {fund_id} failed: {err}");
                LoadState::Failed {
                    fund_id: fund_id.to_string(),
                }
            }
        };
    }
}

/// One-way gate for the deferred visualizations. Flips true once the anchor
/// has been seen intersecting the viewport past the threshold and never
/// reverts, surviving scroll-out and later fetch cycles.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityLatch {
    threshold: f64,
    visible: bool,
}

impl VisibilityLatch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    /// Feed the currently visible fraction of the anchor (0.0..=1.0).
    pub fn observe(&mut self, visible_fraction: f64) {
        if !self.visible && visible_fraction >= self.threshold {
            self.visible = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
