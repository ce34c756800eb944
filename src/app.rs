//! Application state.
//!
//! [`App`] owns everything the UI renders plus the fetch coordinator. The
//! coordinator's contract: the triple (resource, page, search) determines
//! the request in flight, every change to the triple issues exactly one
//! fetch, and only the outcome of the most recently issued fetch is ever
//! applied. Outcomes travel back over an unbounded channel tagged with a
//! sequence number; anything stale is dropped on arrival.

use anyhow::Result;
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use crate::api::{format_api_error, ApiClient, Page};
use crate::resource::ResourceKind;

/// Input modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Table navigation.
    Normal,
    /// Editing the character name search.
    Search,
    /// Command box open.
    Command,
    /// Help overlay.
    Help,
    /// Full JSON of the selected item.
    Detail,
}

/// What a finished fetch reports back to the event loop.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Sequence number of the request this outcome answers.
    pub seq: u64,
    pub result: Result<Page>,
}

/// Application state.
pub struct App {
    pub client: ApiClient,

    // The coordinator's inputs.
    pub kind: ResourceKind,
    pub page: u32,
    pub search: String,

    // What the latest applied fetch produced.
    pub data: Option<Page>,
    pub loading: bool,
    pub error_message: Option<String>,

    // Presentation state.
    pub mode: Mode,
    pub selected: usize,
    pub detail_scroll: usize,
    pub search_input: String,
    pub command_text: String,
    pub command_suggestions: Vec<String>,
    pub command_suggestion_selected: usize,
    pub command_preview: Option<String>,
    pub notice: Option<String>,

    // Click targets recorded during the last render.
    pub tab_hits: Vec<(Rect, ResourceKind)>,
    pub pager_hits: Vec<(Rect, u32)>,

    // Request sequencing.
    seq: u64,
    outcomes_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl App {
    /// Build the app from a client and the outcome of the fetch performed
    /// during the splash sequence.
    pub fn from_initialized(client: ApiClient, initial: Result<Page>) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            client,
            kind: ResourceKind::Character,
            page: 1,
            search: String::new(),
            data: None,
            loading: false,
            error_message: None,
            mode: Mode::Normal,
            selected: 0,
            detail_scroll: 0,
            search_input: String::new(),
            command_text: String::new(),
            command_suggestions: Vec::new(),
            command_suggestion_selected: 0,
            command_preview: None,
            notice: None,
            tab_hits: Vec::new(),
            pager_hits: Vec::new(),
            seq: 0,
            outcomes_tx,
            outcomes_rx,
        };

        match initial {
            Ok(page) => app.data = Some(page),
            Err(e) => app.error_message = Some(format_api_error(&e)),
        }
        app
    }

    // ------------------------------------------------------------------
    // Fetch coordination
    // ------------------------------------------------------------------

    /// Issue a fetch for the current (resource, page, search) triple.
    ///
    /// Each call supersedes whatever is still in flight. Superseded
    /// requests are not cancelled, they run to completion and their
    /// outcomes are discarded by [`App::apply_outcome`].
    pub fn refresh(&mut self) {
        self.seq += 1;
        let seq = self.seq;
        self.loading = true;
        self.error_message = None;

        let client = self.client.clone();
        let kind = self.kind;
        let page = self.page;
        let name = self.search.clone();
        let tx = self.outcomes_tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_page(kind, page, &name).await;
            // Send only fails on shutdown, when nobody is listening anyway.
            let _ = tx.send(FetchOutcome { seq, result });
        });
    }

    /// Sequence number of the most recently issued fetch.
    pub fn current_seq(&self) -> u64 {
        self.seq
    }

    /// Drain finished fetches. Returns true when visible state changed.
    pub fn poll_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    /// Apply one fetch outcome.
    ///
    /// A stale sequence number is discarded without touching any state,
    /// including the loading flag: the newer request is still in flight and
    /// its own outcome will clear it.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.seq {
            tracing::debug!(
                seq = outcome.seq,
                latest = self.seq,
                "Dropping stale fetch outcome"
            );
            return false;
        }

        self.loading = false;
        match outcome.result {
            Ok(page) => {
                if self.selected >= page.results.len() {
                    self.selected = page.results.len().saturating_sub(1);
                }
                self.data = Some(page);
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!("Fetch failed: {:#}", e);
                self.data = None;
                self.selected = 0;
                self.error_message = Some(format_api_error(&e));
            }
        }
        true
    }

    /// True when the last fetch failed and the error view owns the screen.
    pub fn in_error_state(&self) -> bool {
        self.error_message.is_some()
    }

    // ------------------------------------------------------------------
    // Coordinator inputs
    // ------------------------------------------------------------------

    /// Switch to a resource. Always resets to page 1 and clears the search
    /// term, even when the resource is already active.
    pub fn switch_resource(&mut self, kind: ResourceKind) {
        self.kind = kind;
        self.page = 1;
        self.search.clear();
        self.search_input.clear();
        self.selected = 0;
        self.refresh();
    }

    /// Commit the pending search input and fetch page 1 of the filtered
    /// collection. Ignored for resources without search support.
    pub fn apply_search(&mut self) {
        if !self.kind.supports_search() {
            return;
        }
        self.search = self.search_input.trim().to_string();
        self.page = 1;
        self.selected = 0;
        self.refresh();
    }

    /// Drop any active search term and refetch the unfiltered collection.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        if !self.search.is_empty() {
            self.search.clear();
            self.page = 1;
            self.selected = 0;
            self.refresh();
        }
    }

    /// The active search term, if one is committed.
    pub fn active_search(&self) -> Option<&str> {
        if self.search.is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }

    /// Total pages of the current dataset, zero before any data arrived.
    pub fn total_pages(&self) -> u32 {
        self.data.as_ref().map(|d| d.info.pages).unwrap_or(0)
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages() {
            self.page += 1;
            self.selected = 0;
            self.refresh();
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
            self.refresh();
        }
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        let last = self.total_pages();
        if last > 0 {
            self.go_to_page(last);
        }
    }

    /// Jump to a specific page, clamped into the known range.
    pub fn go_to_page(&mut self, page: u32) {
        let total = self.total_pages();
        let target = if total == 0 { 1 } else { page.clamp(1, total) };
        if target != self.page {
            self.page = target;
            self.selected = 0;
            self.refresh();
        }
    }

    /// Re-issue the identical last request. This is the error view's retry.
    pub fn retry(&mut self) {
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Row selection
    // ------------------------------------------------------------------

    pub fn result_count(&self) -> usize {
        self.data.as_ref().map(|d| d.results.len()).unwrap_or(0)
    }

    pub fn selected_item(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()?.results.get(self.selected)
    }

    pub fn next_row(&mut self) {
        let count = self.result_count();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    pub fn previous_row(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        let count = self.result_count();
        if count > 0 {
            self.selected = count - 1;
        }
    }

    // ------------------------------------------------------------------
    // Mode transitions
    // ------------------------------------------------------------------

    pub fn enter_search_mode(&mut self) {
        if !self.kind.supports_search() {
            self.notice = Some("Search is only available for characters".to_string());
            return;
        }
        self.search_input = self.search.clone();
        self.mode = Mode::Search;
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_text.clear();
        self.command_suggestions = self.available_commands();
        self.command_suggestion_selected = 0;
        self.command_preview = None;
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn enter_detail_mode(&mut self) {
        if self.selected_item().is_some() {
            self.detail_scroll = 0;
            self.mode = Mode::Detail;
        }
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    // ------------------------------------------------------------------
    // Detail view
    // ------------------------------------------------------------------

    /// Pretty-printed JSON of the selected item.
    pub fn selected_item_json(&self) -> Option<String> {
        self.selected_item()
            .map(|item| serde_json::to_string_pretty(item).unwrap_or_default())
    }

    pub fn detail_line_count(&self) -> usize {
        self.selected_item_json()
            .map(|json| json.lines().count())
            .unwrap_or(0)
    }

    pub fn detail_scroll_to_bottom(&mut self, visible_lines: usize) {
        self.detail_scroll = self.detail_line_count().saturating_sub(visible_lines);
    }

    // ------------------------------------------------------------------
    // Command box
    // ------------------------------------------------------------------

    /// Everything the command box can complete to.
    pub fn available_commands(&self) -> Vec<String> {
        let mut commands: Vec<String> = ResourceKind::ALL
            .iter()
            .map(|kind| kind.def().key.to_string())
            .collect();
        commands.push("page".to_string());
        commands.push("help".to_string());
        commands.push("quit".to_string());
        commands.sort();
        commands
    }

    /// Refilter suggestions against the typed text and refresh the preview.
    pub fn update_command_suggestions(&mut self) {
        let typed = self.command_text.to_lowercase();
        self.command_suggestions = self
            .available_commands()
            .into_iter()
            .filter(|cmd| typed.is_empty() || cmd.contains(&typed))
            .collect();

        if self.command_suggestion_selected >= self.command_suggestions.len() {
            self.command_suggestion_selected = 0;
        }
        self.update_preview();
    }

    fn update_preview(&mut self) {
        self.command_preview = if self.command_text.is_empty() {
            None
        } else {
            self.command_suggestions
                .get(self.command_suggestion_selected)
                .cloned()
        };
    }

    pub fn next_suggestion(&mut self) {
        if !self.command_suggestions.is_empty() {
            self.command_suggestion_selected =
                (self.command_suggestion_selected + 1) % self.command_suggestions.len();
            self.update_preview();
        }
    }

    pub fn prev_suggestion(&mut self) {
        if !self.command_suggestions.is_empty() {
            self.command_suggestion_selected = self
                .command_suggestion_selected
                .checked_sub(1)
                .unwrap_or(self.command_suggestions.len() - 1);
            self.update_preview();
        }
    }

    /// Accept the highlighted suggestion into the input.
    pub fn apply_suggestion(&mut self) {
        if let Some(suggestion) = self
            .command_suggestions
            .get(self.command_suggestion_selected)
            .cloned()
        {
            self.command_text = suggestion;
            self.update_command_suggestions();
        }
    }

    /// Run the typed command. Returns true when the app should quit.
    ///
    /// An empty input runs the previewed suggestion; typed text that the
    /// preview completes runs the completion, anything else runs verbatim.
    pub fn execute_command(&mut self) -> bool {
        let command_text = if self.command_text.is_empty() {
            self.command_preview.clone().unwrap_or_default()
        } else if let Some(preview) = &self.command_preview {
            if preview.contains(&self.command_text) {
                preview.clone()
            } else {
                self.command_text.clone()
            }
        } else {
            self.command_text.clone()
        };

        let parts: Vec<&str> = command_text.split_whitespace().collect();
        if parts.is_empty() {
            return false;
        }

        match parts[0] {
            "q" | "quit" => return true,
            "help" => self.mode = Mode::Help,
            "page" => match parts.get(1).map(|p| p.parse::<u32>()) {
                Some(Ok(n)) => self.go_to_page(n),
                _ => self.notice = Some("Usage: page <number>".to_string()),
            },
            key => {
                if let Some(kind) = ResourceKind::from_key(key) {
                    self.switch_resource(kind);
                } else {
                    self.notice = Some(format!("Unknown command: {}", key));
                }
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    /// Resolve a click against the hitboxes recorded during the last render.
    pub fn click_at(&mut self, x: u16, y: u16) {
        let position = Position::new(x, y);

        if let Some((_, kind)) = self
            .tab_hits
            .iter()
            .copied()
            .find(|(area, _)| area.contains(position))
        {
            self.switch_resource(kind);
            return;
        }

        if let Some((_, page)) = self
            .pager_hits
            .iter()
            .copied()
            .find(|(area, _)| area.contains(position))
        {
            self.go_to_page(page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageInfo;

    // Points at a closed port so spawned fetches fail fast and their
    // outcomes never race the assertions (they are simply never polled).
    fn test_app(initial: Result<Page>) -> App {
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        App::from_initialized(client, initial)
    }

    fn page_with(pages: u32, items: usize) -> Page {
        Page {
            info: PageInfo {
                count: (pages as u64) * 20,
                pages,
                next: None,
                prev: None,
            },
            results: (0..items)
                .map(|i| serde_json::json!({"id": i, "name": format!("item {i}")}))
                .collect(),
        }
    }

    #[test]
    fn initial_error_lands_in_error_state() {
        let app = test_app(Err(anyhow::anyhow!("API request failed: 500")));
        assert!(app.in_error_state());
        assert!(app.data.is_none());
        let message = app.error_message.as_deref().unwrap();
        assert!(message.contains("500"));
    }

    #[test]
    fn switching_resource_resets_page_and_search() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.page = 5;
            app.search = "rick".to_string();
            app.selected = 7;

            app.switch_resource(ResourceKind::Location);

            assert_eq!(app.kind, ResourceKind::Location);
            assert_eq!(app.page, 1);
            assert!(app.search.is_empty());
            assert_eq!(app.selected, 0);
            assert!(app.loading);
        });
    }

    #[test]
    fn switching_to_the_active_resource_still_resets() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.page = 3;
            app.search = "morty".to_string();

            app.switch_resource(ResourceKind::Character);

            assert_eq!(app.page, 1);
            assert!(app.search.is_empty());
        });
    }

    #[test]
    fn applying_a_search_resets_the_page() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.page = 9;
            app.search_input = "  summer  ".to_string();

            app.apply_search();

            assert_eq!(app.search, "summer");
            assert_eq!(app.page, 1);
            assert!(app.loading);
        });
    }

    #[test]
    fn search_is_ignored_for_unsearchable_resources() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(3, 20)));
            app.kind = ResourceKind::Episode;
            app.search_input = "pilot".to_string();

            app.apply_search();

            assert!(app.search.is_empty());
            assert!(!app.loading);

            app.enter_search_mode();
            assert_eq!(app.mode, Mode::Normal);
            assert!(app.notice.is_some());
        });
    }

    #[test]
    fn page_navigation_clamps_to_known_range() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(10, 20)));

            app.prev_page();
            assert_eq!(app.page, 1);

            app.go_to_page(99);
            assert_eq!(app.page, 10);

            app.next_page();
            assert_eq!(app.page, 10);

            app.go_to_page(0);
            assert_eq!(app.page, 1);
        });
    }

    #[test]
    fn page_navigation_without_data_stays_put() {
        let mut app = test_app(Err(anyhow::anyhow!("API request failed: 500")));
        app.next_page();
        app.prev_page();
        app.last_page();
        assert_eq!(app.page, 1);
        assert!(!app.loading);
    }

    #[test]
    fn stale_outcomes_are_discarded() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));

            app.refresh();
            let superseded = app.current_seq();
            app.refresh();

            let applied = app.apply_outcome(FetchOutcome {
                seq: superseded,
                result: Ok(page_with(7, 5)),
            });
            assert!(!applied);
            assert!(app.loading, "newer request is still in flight");
            assert_eq!(app.total_pages(), 42, "stale data must not be applied");

            let applied = app.apply_outcome(FetchOutcome {
                seq: app.current_seq(),
                result: Ok(page_with(7, 5)),
            });
            assert!(applied);
            assert!(!app.loading);
            assert_eq!(app.total_pages(), 7);
        });
    }

    #[test]
    fn stale_errors_are_discarded_too() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));

            app.refresh();
            let superseded = app.current_seq();
            app.refresh();

            app.apply_outcome(FetchOutcome {
                seq: superseded,
                result: Err(anyhow::anyhow!("API request failed: 500")),
            });
            assert!(!app.in_error_state());
            assert!(app.data.is_some());
        });
    }

    #[test]
    fn failed_fetch_clears_the_dataset() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));

            app.refresh();
            app.apply_outcome(FetchOutcome {
                seq: app.current_seq(),
                result: Err(anyhow::anyhow!("API request failed: 404")),
            });

            assert!(app.in_error_state());
            assert!(app.data.is_none());
            assert_eq!(app.result_count(), 0);
            assert!(!app.loading);
        });
    }

    #[test]
    fn successful_fetch_clears_a_previous_error() {
        tokio_test::block_on(async {
            let mut app = test_app(Err(anyhow::anyhow!("API request failed: 500")));

            app.retry();
            assert!(!app.in_error_state(), "issuing a fetch clears the error");

            app.apply_outcome(FetchOutcome {
                seq: app.current_seq(),
                result: Ok(page_with(42, 20)),
            });
            assert!(app.data.is_some());
            assert!(!app.in_error_state());
        });
    }

    #[test]
    fn empty_results_are_not_an_error() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));

            app.refresh();
            app.apply_outcome(FetchOutcome {
                seq: app.current_seq(),
                result: Ok(page_with(0, 0)),
            });

            assert!(!app.in_error_state());
            assert!(app.data.is_some());
            assert_eq!(app.result_count(), 0);
            assert_eq!(app.total_pages(), 0);
        });
    }

    #[test]
    fn selection_is_clamped_when_a_shorter_page_arrives() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.selected = 19;

            app.refresh();
            app.apply_outcome(FetchOutcome {
                seq: app.current_seq(),
                result: Ok(page_with(42, 6)),
            });

            assert_eq!(app.selected, 5);
        });
    }

    #[test]
    fn row_navigation_stays_in_bounds() {
        let mut app = test_app(Ok(page_with(1, 3)));

        app.previous_row();
        assert_eq!(app.selected, 0);

        app.next_row();
        app.next_row();
        app.next_row();
        assert_eq!(app.selected, 2);

        app.go_to_top();
        assert_eq!(app.selected, 0);
        app.go_to_bottom();
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn clearing_an_active_search_refetches() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(2, 20)));
            app.search = "rick".to_string();
            app.page = 2;

            app.clear_search();

            assert!(app.search.is_empty());
            assert_eq!(app.page, 1);
            assert!(app.loading);
        });
    }

    #[test]
    fn clearing_without_an_active_search_is_a_no_op() {
        let mut app = test_app(Ok(page_with(2, 20)));
        app.search_input = "half typed".to_string();

        app.clear_search();

        assert!(app.search_input.is_empty());
        assert!(!app.loading);
    }

    #[test]
    fn command_suggestions_filter_and_complete() {
        let mut app = test_app(Ok(page_with(1, 1)));
        app.enter_command_mode();
        assert_eq!(app.mode, Mode::Command);
        assert!(app.command_suggestions.contains(&"characters".to_string()));

        app.command_text = "epi".to_string();
        app.update_command_suggestions();
        assert_eq!(app.command_suggestions, vec!["episodes".to_string()]);
        assert_eq!(app.command_preview.as_deref(), Some("episodes"));

        app.apply_suggestion();
        assert_eq!(app.command_text, "episodes");
    }

    #[test]
    fn executing_a_resource_command_switches() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.enter_command_mode();
            app.command_text = "locations".to_string();
            app.update_command_suggestions();

            let quit = app.execute_command();

            assert!(!quit);
            assert_eq!(app.kind, ResourceKind::Location);
            assert_eq!(app.page, 1);
        });
    }

    #[test]
    fn executing_a_partial_command_runs_the_completion() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.enter_command_mode();
            app.command_text = "epi".to_string();
            app.update_command_suggestions();

            app.execute_command();

            assert_eq!(app.kind, ResourceKind::Episode);
        });
    }

    #[test]
    fn page_command_jumps() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.enter_command_mode();
            app.command_text = "page 7".to_string();
            app.update_command_suggestions();

            app.execute_command();

            assert_eq!(app.page, 7);
        });
    }

    #[test]
    fn quit_commands_quit() {
        let mut app = test_app(Ok(page_with(1, 1)));
        app.enter_command_mode();
        app.command_text = "quit".to_string();
        app.update_command_suggestions();
        assert!(app.execute_command());

        app.enter_command_mode();
        app.command_text = "q".to_string();
        app.update_command_suggestions();
        assert!(app.execute_command());
    }

    #[test]
    fn unknown_commands_set_a_notice() {
        let mut app = test_app(Ok(page_with(1, 1)));
        app.enter_command_mode();
        app.command_text = "wubba".to_string();
        app.update_command_suggestions();

        assert!(!app.execute_command());
        assert!(app.notice.as_deref().unwrap_or("").contains("wubba"));
    }

    #[test]
    fn clicks_resolve_against_recorded_hitboxes() {
        tokio_test::block_on(async {
            let mut app = test_app(Ok(page_with(42, 20)));
            app.tab_hits
                .push((Rect::new(0, 0, 10, 1), ResourceKind::Episode));
            app.pager_hits.push((Rect::new(0, 20, 5, 1), 9));

            app.click_at(4, 0);
            assert_eq!(app.kind, ResourceKind::Episode);

            app.click_at(2, 20);
            assert_eq!(app.page, 9);

            // A miss changes nothing.
            let page_before = app.page;
            app.click_at(70, 5);
            assert_eq!(app.page, page_before);
        });
    }

    #[test]
    fn detail_mode_requires_a_selection() {
        let mut app = test_app(Ok(page_with(0, 0)));
        app.enter_detail_mode();
        assert_eq!(app.mode, Mode::Normal);

        let mut app = test_app(Ok(page_with(1, 2)));
        app.enter_detail_mode();
        assert_eq!(app.mode, Mode::Detail);
        assert!(app.selected_item_json().unwrap().contains("item 0"));
    }
}
