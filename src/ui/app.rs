use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::config::{
    INFO_TEXT, MSG_FETCH_FAILED, MSG_LOADING, MSG_SELECT_FUND, NOTICE_DURATION_MS, PALETTES,
    POLL_DURATION_MS, VISIBILITY_THRESHOLD,
};
use crate::data::FundRecord;
use crate::fetch::{FetchOutcome, FetchRequest};
use crate::launch::{LinkOpener, OpenRequest};
use crate::state::{LoadState, VisibilityLatch};
use crate::ui::colors::UiColors;
use crate::ui::{allocation, documents, holdings, rating, risk};

pub struct TuiApp {
    state: LoadState,
    latch: VisibilityLatch,
    colors: UiColors,
    color_index: usize,
    scroll: u16,
    doc_selected: usize,
    holding_highlight: Option<usize>,
    popup: bool,
    popup_input: String,
    notice: Option<(String, Instant)>,
    viewport_rows: u16,
    body_rows: usize,
    request_tx: mpsc::UnboundedSender<FetchRequest>,
    opener: Arc<dyn LinkOpener>,
}

impl TuiApp {
    pub fn new(
        initial_fund: Option<String>,
        request_tx: mpsc::UnboundedSender<FetchRequest>,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        let mut app = Self {
            state: LoadState::Empty,
            latch: VisibilityLatch::new(VISIBILITY_THRESHOLD),
            colors: UiColors::new(&PALETTES[0]),
            color_index: 0,
            scroll: 0,
            doc_selected: 0,
            holding_highlight: None,
            popup: false,
            popup_input: String::new(),
            notice: None,
            viewport_rows: 0,
            body_rows: 0,
            request_tx,
            opener,
        };
        if let Some(fund_id) = initial_fund {
            app.select_fund(&fund_id);
        }
        app
    }

    /// Commit a selected identifier. A non-empty identifier resets the view
    /// to loading and issues exactly one fetch; an empty one is terminal.
    /// The visibility latch deliberately survives the reset.
    fn select_fund(&mut self, fund_id: &str) {
        self.scroll = 0;
        self.doc_selected = 0;
        self.holding_highlight = None;
        if self.state.select(fund_id) {
            let request = FetchRequest {
                fund_id: fund_id.to_string(),
            };
            if self.request_tx.send(request).is_err() {
                log::warn!("fetch worker is gone; selection not served");
            }
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        self.state.settle(&outcome.fund_id, outcome.result);
    }

    fn loaded_record(&self) -> Option<&FundRecord> {
        match &self.state {
            LoadState::Loaded { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Everything below the fold of the current state, plus the row index of
    /// the deferred-section anchor when a record is on screen.
    fn body_lines(&self) -> (Vec<Line<'static>>, Option<usize>) {
        match &self.state {
            LoadState::Empty => (vec![Line::from(MSG_SELECT_FUND)], None),
            LoadState::Failed { .. } => (vec![Line::from(MSG_FETCH_FAILED)], None),
            LoadState::Loading { .. } => (vec![Line::from(MSG_LOADING)], None),
            LoadState::Loaded { record, .. } => self.detail_lines(record),
        }
    }

    fn detail_lines(&self, record: &FundRecord) -> (Vec<Line<'static>>, Option<usize>) {
        let quote = &record.quote;
        let label = |text: &str| Span::styled(format!("{text} "), Style::new().fg(self.colors.label_fg).add_modifier(Modifier::BOLD));
        let value = |text: String| Span::styled(text, Style::new().fg(self.colors.value_fg));
        let section = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::new()
                    .fg(self.colors.section_fg)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    quote.name.clone(),
                    Style::new()
                        .fg(self.colors.header_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!(" {} ", quote.abbreviation()),
                    Style::new().fg(self.colors.badge_fg).bg(self.colors.badge_bg),
                ),
            ]),
            Line::default(),
            Line::from(vec![label("Market Code:"), value(quote.market_code.clone())]),
            Line::from(vec![
                label("Last Price:"),
                value(format!(
                    "{} {} (as of {})",
                    quote.last_price,
                    quote.currency,
                    quote.last_price_date.format("%-d %b %Y")
                )),
            ]),
            Line::from(vec![
                label("Ongoing Charge:"),
                value(format!("{}%", quote.ongoing_charge)),
            ]),
            Line::from(vec![label("Sector:"), value(quote.sector_name.clone())]),
            Line::default(),
            section("Analyst Rating:"),
            rating::rating_line(record.ratings.analyst_rating, &self.colors),
            Line::default(),
            section("Risk (SRRI):"),
            risk::risk_line(record.ratings.srri, &self.colors),
            Line::default(),
            section("Objective:"),
            Line::from(value(record.profile.objective.clone())),
        ];

        // Anchor row for the deferred visualizations. They mount only once
        // this row has been seen in the viewport, and then stay mounted.
        let anchor = lines.len();
        lines.push(Line::default());

        if self.latch.is_visible() {
            lines.push(section("Portfolio Allocation:"));
            lines.extend(allocation::allocation_lines(
                &record.portfolio.asset,
                &self.colors,
            ));
            lines.push(Line::default());
            lines.push(section("Top 10 Holdings:"));
            lines.push(Line::from(Span::styled(
                "(n) to highlight a holding for its full name".to_string(),
                Style::new().fg(self.colors.label_fg),
            )));
            lines.extend(holdings::holdings_lines(
                &record.portfolio.top10_holdings,
                self.holding_highlight,
                &self.colors,
            ));
        }

        lines.push(Line::default());
        lines.push(section("Documents:"));
        lines.push(documents::documents_line(
            &record.documents,
            self.doc_selected,
            &self.colors,
        ));

        (lines, Some(anchor))
    }

    /// Feed the latch with the visible fraction of the anchor row for the
    /// given viewport. A single row is either in view or not, so the
    /// fraction is 0 or 1 measured against the configured threshold.
    fn observe_viewport(&mut self, viewport_rows: u16) {
        let (_, anchor) = self.body_lines();
        let Some(anchor) = anchor else { return };
        let top = self.scroll as usize;
        let bottom = top + viewport_rows as usize;
        let fraction = if anchor >= top && anchor < bottom {
            1.0
        } else {
            0.0
        };
        self.latch.observe(fraction);
    }

    fn scroll_down(&mut self) {
        let max = self.body_rows.saturating_sub(self.viewport_rows as usize) as u16;
        self.scroll = (self.scroll + 1).min(max);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn next_document(&mut self) {
        if let Some(record) = self.loaded_record() {
            let count = record.documents.len();
            if count > 0 {
                self.doc_selected = (self.doc_selected + 1) % count;
            }
        }
    }

    fn next_holding(&mut self) {
        if !self.latch.is_visible() {
            return;
        }
        if let Some(record) = self.loaded_record() {
            let count = record.portfolio.top10_holdings.len();
            if count == 0 {
                return;
            }
            self.holding_highlight = Some(match self.holding_highlight {
                Some(i) if i + 1 < count => i + 1,
                Some(_) => 0,
                None => 0,
            });
        }
    }

    /// Activate the selected document control: exactly one open request with
    /// the isolation policy attached, via the opener boundary.
    fn open_selected_document(&mut self) {
        let Some(record) = self.loaded_record() else {
            return;
        };
        let Some(doc) = record.documents.get(self.doc_selected) else {
            return;
        };
        let request = OpenRequest::isolated(&doc.url);
        if let Err(err) = self.opener.open(&request) {
            log::warn!("could not open {}: {err}", doc.url);
            self.notice = Some(("Could not open document".to_string(), Instant::now()));
        }
    }

    fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
    }

    fn previous_color(&mut self) {
        let count = PALETTES.len();
        self.color_index = (self.color_index + count - 1) % count;
    }

    fn set_colors(&mut self) {
        self.colors = UiColors::new(&PALETTES[self.color_index]);
    }

    fn toggle_popup(&mut self) {
        self.popup = !self.popup;
    }

    pub fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut rx: mpsc::UnboundedReceiver<FetchOutcome>,
    ) -> Result<()> {
        loop {
            // Drain settlements
            while let Ok(outcome) = rx.try_recv() {
                self.apply_outcome(outcome);
            }

            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(POLL_DURATION_MS))? {
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            let shift = key.modifiers.contains(KeyModifiers::SHIFT);
                            if !self.popup {
                                match key.code {
                                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                                    KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
                                    KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
                                    KeyCode::Char('l') | KeyCode::Right if shift => {
                                        self.next_color()
                                    }
                                    KeyCode::Char('h') | KeyCode::Left if shift => {
                                        self.previous_color()
                                    }
                                    KeyCode::Tab => self.next_document(),
                                    KeyCode::Char('n') => self.next_holding(),
                                    KeyCode::Enter => self.open_selected_document(),
                                    KeyCode::Char('/') => {
                                        self.popup_input.clear();
                                        self.toggle_popup()
                                    }
                                    _ => {}
                                }
                            } else {
                                match key.code {
                                    KeyCode::Char('/') | KeyCode::Esc => self.toggle_popup(),
                                    KeyCode::Backspace => {
                                        let _ = self.popup_input.pop();
                                    }
                                    KeyCode::Char(c) => self.popup_input.push(c),
                                    KeyCode::Enter => {
                                        self.toggle_popup();
                                        let fund_id = self.popup_input.trim().to_string();
                                        self.select_fund(&fund_id);
                                        self.popup_input.clear();
                                    }
                                    _ => {}
                                }
                            }
                        }
                        Event::Mouse(_)
                        | Event::Resize(_, _)
                        | Event::FocusGained
                        | Event::FocusLost
                        | Event::Paste(_) => {}
                        _ => {}
                    }
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let vertical = &Layout::vertical([Constraint::Min(5), Constraint::Length(4)]);
        let rects = vertical.split(frame.area());
        self.set_colors();
        self.render_detail(frame, rects[0]);
        self.render_footer(frame, rects[1]);
        if self.popup {
            self.render_select_popup(frame);
        }
        let notice_expired = self
            .notice
            .as_ref()
            .is_some_and(|(_, since)| since.elapsed().as_millis() > NOTICE_DURATION_MS.into());
        if notice_expired {
            self.notice = None;
        }
        if self.notice.is_some() {
            self.render_notice(frame);
        }
    }

    fn render_detail(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.colors.footer_border_color));
        let inner_rows = area.height.saturating_sub(2);
        self.observe_viewport(inner_rows);

        let (lines, _) = self.body_lines();
        self.viewport_rows = inner_rows;
        self.body_rows = lines.len();
        let max = self.body_rows.saturating_sub(inner_rows as usize) as u16;
        self.scroll = self.scroll.min(max);

        let body = Paragraph::new(Text::from(lines))
            .style(Style::new().bg(self.colors.buffer_bg))
            .scroll((self.scroll, 0))
            .block(block);
        frame.render_widget(body, area);
    }

    fn render_select_popup(&mut self, frame: &mut Frame) {
        let area = self.popup_area(frame.area(), 60, 20);
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(self.popup_input.as_str())
            .block(Block::bordered().title("Select fund"))
            .style(Style::default())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_notice(&mut self, frame: &mut Frame) {
        let message = self
            .notice
            .as_ref()
            .map(|(m, _)| m.clone())
            .unwrap_or_default();
        let area = self.popup_area(frame.area(), 40, 20);
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(message)
            .block(Block::bordered().title("Notice"))
            .style(Style::default())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn popup_area(&self, area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
        let [area] = vertical.areas(area);
        let [area] = horizontal.areas(area);
        area
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let info_footer = Paragraph::new(Text::from_iter(INFO_TEXT))
            .style(
                Style::new()
                    .fg(self.colors.value_fg)
                    .bg(self.colors.buffer_bg),
            )
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(Style::new().fg(self.colors.footer_border_color)),
            );
        frame.render_widget(info_footer, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        AssetAllocation, Document, Holding, Portfolio, Profile, Quote, Ratings,
    };
    use crate::launch::RecordingOpener;
    use crate::request::FetchError;
    use chrono::NaiveDate;

    fn test_record() -> FundRecord {
        FundRecord {
            quote: Quote {
                name: "Test Fund".to_string(),
                market_code: "TSTF".to_string(),
                last_price: 123.45,
                last_price_date: NaiveDate::from_ymd_opt(2026, 8, 21).unwrap(),
                ongoing_charge: 0.85,
                sector_name: "Test Sector".to_string(),
                currency: "GBP".to_string(),
            },
            ratings: Ratings {
                analyst_rating: 4,
                srri: 6,
            },
            profile: Profile {
                objective: "Test Objective".to_string(),
            },
            portfolio: Portfolio {
                asset: vec![AssetAllocation {
                    name: "Equity".to_string(),
                    weighting: 100.0,
                }],
                top10_holdings: vec![Holding {
                    name: "Acme Industrial Holdings".to_string(),
                    weighting: 5.2,
                }],
            },
            documents: vec![Document {
                id: "doc-1".to_string(),
                url: "http://example.com".to_string(),
                doc_type: "PDF".to_string(),
            }],
        }
    }

    struct Harness {
        app: TuiApp,
        req_rx: mpsc::UnboundedReceiver<FetchRequest>,
        opener: Arc<RecordingOpener>,
    }

    fn harness(initial_fund: Option<&str>) -> Harness {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let opener = Arc::new(RecordingOpener::new());
        let app = TuiApp::new(
            initial_fund.map(str::to_string),
            req_tx,
            opener.clone() as Arc<dyn LinkOpener>,
        );
        Harness {
            app,
            req_rx,
            opener,
        }
    }

    fn rendered_text(app: &TuiApp) -> String {
        let (lines, _) = app.body_lines();
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_harness() -> Harness {
        let mut h = harness(Some("test-fund"));
        h.app.apply_outcome(FetchOutcome {
            fund_id: "test-fund".to_string(),
            result: Ok(test_record()),
        });
        h
    }

    #[test]
    fn empty_selection_renders_prompt_and_never_fetches() {
        let mut h = harness(None);
        assert_eq!(rendered_text(&h.app), MSG_SELECT_FUND);
        assert!(h.req_rx.try_recv().is_err());
    }

    #[test]
    fn selection_issues_exactly_one_fetch() {
        let mut h = harness(Some("test-fund"));
        assert_eq!(h.req_rx.try_recv().unwrap().fund_id, "test-fund");
        assert!(h.req_rx.try_recv().is_err());
        assert_eq!(rendered_text(&h.app), MSG_LOADING);
    }

    #[test]
    fn resolved_record_renders_all_detail_fields() {
        let h = loaded_harness();
        let text = rendered_text(&h.app);
        assert!(text.contains("Test Fund"));
        assert!(text.contains("TF"));
        assert!(text.contains("Test Sector"));
        assert!(text.contains("Test Objective"));
        assert!(text.contains("123.45 GBP"));
    }

    #[test]
    fn rejected_fetch_renders_only_the_failure_message() {
        let mut h = harness(Some("test-fund"));
        h.app.apply_outcome(FetchOutcome {
            fund_id: "test-fund".to_string(),
            result: Err(FetchError::Status(500)),
        });
        assert_eq!(rendered_text(&h.app), MSG_FETCH_FAILED);
    }

    #[test]
    fn stale_outcome_does_not_overwrite_newer_selection() {
        let mut h = harness(Some("fund-a"));
        h.app.select_fund("fund-b");
        h.app.apply_outcome(FetchOutcome {
            fund_id: "fund-a".to_string(),
            result: Ok(test_record()),
        });
        assert_eq!(rendered_text(&h.app), MSG_LOADING);
    }

    #[test]
    fn activating_a_document_opens_it_isolated() {
        let mut h = loaded_harness();
        h.app.open_selected_document();
        let calls = h.opener.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "http://example.com");
        assert_eq!(calls[0].target, "_blank");
        assert_eq!(calls[0].features, "noopener,noreferrer");
    }

    #[test]
    fn deferred_sections_are_absent_until_the_anchor_is_seen() {
        let mut h = loaded_harness();
        let text = rendered_text(&h.app);
        assert!(!text.contains("Portfolio Allocation:"));
        assert!(!text.contains("Top 10 Holdings:"));
        // Documents render regardless of the latch.
        assert!(text.contains("Documents:"));

        // Viewport too short to reach the anchor: latch stays closed.
        h.app.observe_viewport(5);
        assert!(!rendered_text(&h.app).contains("Portfolio Allocation:"));

        // Scrolled far enough that the anchor enters the viewport.
        h.app.scroll = 12;
        h.app.observe_viewport(5);
        let text = rendered_text(&h.app);
        assert!(text.contains("Portfolio Allocation:"));
        assert!(text.contains("Top 10 Holdings:"));
        assert!(text.contains("Acme"));
    }

    #[test]
    fn deferred_sections_stay_mounted_after_scrolling_away() {
        let mut h = loaded_harness();
        h.app.scroll = 12;
        h.app.observe_viewport(5);
        h.app.scroll = 0;
        h.app.observe_viewport(5);
        assert!(rendered_text(&h.app).contains("Portfolio Allocation:"));
    }

    #[test]
    fn latch_survives_a_new_fetch_cycle() {
        let mut h = loaded_harness();
        h.app.scroll = 12;
        h.app.observe_viewport(5);
        h.app.select_fund("fund-b");
        h.app.apply_outcome(FetchOutcome {
            fund_id: "fund-b".to_string(),
            result: Ok(test_record()),
        });
        assert!(rendered_text(&h.app).contains("Portfolio Allocation:"));
    }

    #[test]
    fn srri_indicator_is_present_with_label() {
        let h = loaded_harness();
        assert!(rendered_text(&h.app).contains("Risk Level: 6/10"));
    }
}
