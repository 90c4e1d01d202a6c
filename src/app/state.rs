//! Post list state.
//!
//! [`ListController`] owns everything the list screen shows: the accumulated
//! feed pages and their cursor, the saved-post snapshot, and the search filter
//! over it. It performs no I/O of its own. Operations that need the network
//! hand back a [`PageRequest`]; debounced search hands back a [`SearchTicket`].
//! The caller runs those and feeds the results back in.

use crate::config::FeedConfig;
use crate::domain::{FeedPage, PageCursor, Post};
use crate::services::{FeedError, PageRequest, SavedPostStore, StoreError};

/// Which list is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Remote feed pages.
    #[default]
    Feed,
    /// Locally saved posts.
    Saved,
}

impl ViewMode {
    /// Title shown above the list.
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Feed => "Feed",
            ViewMode::Saved => "Saved",
        }
    }
}

/// Settings the controller needs from the config.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSettings {
    /// Feed source passed to every page request.
    pub source: String,
    /// Page size.
    pub page_limit: usize,
    /// Prefetch threshold in viewport heights.
    pub prefetch_viewports: f32,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

impl From<&FeedConfig> for ListSettings {
    fn from(config: &FeedConfig) -> Self {
        Self {
            source: config.source.clone(),
            page_limit: config.page_limit,
            prefetch_viewports: config.prefetch_viewports,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct FeedState {
    posts: Vec<Post>,
    cursor: PageCursor,
    in_flight: bool,
    last_error: Option<String>,
}

/// The saved-posts list and its search filter.
#[derive(Debug, Clone, Default, PartialEq)]
struct SavedView {
    saved: Vec<Post>,
    filtered: Vec<Post>,
    search_text: String,
}

impl SavedView {
    fn new(saved: Vec<Post>) -> Self {
        Self {
            filtered: saved.clone(),
            saved,
            search_text: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum ListMode {
    Feed,
    Saved(SavedView),
}

/// A pending debounced search. Only the most recently issued ticket applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    text: String,
}

impl SearchTicket {
    /// The search text this ticket will apply.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Everything a view needs to draw the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    /// Active list.
    pub mode: ViewMode,
    /// Rows of the active list.
    pub posts: Vec<Post>,
    /// Search input contents; `None` when the search input is hidden.
    pub search: Option<String>,
    /// A feed page request is in flight.
    pub loading: bool,
    /// The feed has no further pages.
    pub exhausted: bool,
    /// Last feed failure, cleared by the next successful page.
    pub error: Option<String>,
}

/// Case-insensitive title filter. An empty query keeps every post.
pub fn filter_by_title(posts: &[Post], query: &str) -> Vec<Post> {
    if query.is_empty() {
        return posts.to_vec();
    }
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.title_contains(&needle))
        .cloned()
        .collect()
}

/// State machine behind the post list.
#[derive(Debug, Clone)]
pub struct ListController {
    settings: ListSettings,
    feed: FeedState,
    mode: ListMode,
    search_generation: u64,
}

impl ListController {
    /// Creates an empty controller in feed mode.
    pub fn new(settings: ListSettings) -> Self {
        Self {
            settings,
            feed: FeedState::default(),
            mode: ListMode::Feed,
            search_generation: 0,
        }
    }

    /// The active view mode.
    pub fn mode(&self) -> ViewMode {
        match self.mode {
            ListMode::Feed => ViewMode::Feed,
            ListMode::Saved(_) => ViewMode::Saved,
        }
    }

    /// Rows of the active list.
    pub fn posts(&self) -> &[Post] {
        match &self.mode {
            ListMode::Feed => &self.feed.posts,
            ListMode::Saved(view) => &view.filtered,
        }
    }

    /// Posts accumulated from the feed, regardless of mode.
    pub fn feed_posts(&self) -> &[Post] {
        &self.feed.posts
    }

    /// The full saved set, when in saved mode.
    pub fn saved_posts(&self) -> Option<&[Post]> {
        match &self.mode {
            ListMode::Saved(view) => Some(&view.saved),
            ListMode::Feed => None,
        }
    }

    /// Where the next feed page starts.
    pub fn cursor(&self) -> &PageCursor {
        &self.feed.cursor
    }

    /// Whether a feed request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.feed.in_flight
    }

    /// Current search input contents, if the search input is shown.
    pub fn search_text(&self) -> Option<&str> {
        match &self.mode {
            ListMode::Saved(view) => Some(&view.search_text),
            ListMode::Feed => None,
        }
    }

    /// Builds a render snapshot.
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            mode: self.mode(),
            posts: self.posts().to_vec(),
            search: self.search_text().map(str::to_string),
            loading: self.feed.in_flight,
            exhausted: self.feed.cursor.is_exhausted(),
            error: self.feed.last_error.clone(),
        }
    }

    /// Starts loading the next feed page.
    ///
    /// Returns `None` outside feed mode, while a request is already in flight,
    /// or once the feed is exhausted.
    pub fn load_next_feed_page(&mut self) -> Option<PageRequest> {
        if !matches!(self.mode, ListMode::Feed) {
            tracing::debug!("Ignoring page load outside feed mode");
            return None;
        }
        if self.feed.in_flight {
            tracing::debug!("Page load already in flight");
            return None;
        }
        if self.feed.cursor.is_exhausted() {
            tracing::debug!("Feed exhausted, not loading more");
            return None;
        }

        self.feed.in_flight = true;
        Some(PageRequest {
            source: self.settings.source.clone(),
            limit: self.settings.page_limit,
            cursor: self.feed.cursor.as_param().map(str::to_string),
        })
    }

    /// Applies the outcome of a request returned by [`Self::load_next_feed_page`].
    pub fn complete_feed_page(&mut self, result: Result<FeedPage, FeedError>) {
        self.feed.in_flight = false;
        match result {
            Ok(page) => {
                tracing::info!(
                    received = page.posts.len(),
                    total = self.feed.posts.len() + page.posts.len(),
                    more = page.next_cursor.is_some(),
                    "Loaded feed page"
                );
                self.feed.posts.extend(page.posts);
                self.feed.cursor = PageCursor::advance(page.next_cursor);
                self.feed.last_error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to load feed page");
                self.feed.last_error = Some(err.to_string());
            }
        }
    }

    /// Switches between the feed and the saved list.
    ///
    /// Entering saved mode loads the saved set; if that fails the mode does not
    /// change and the error is returned. Leaving saved mode keeps the feed
    /// posts and cursor as they were.
    pub fn toggle_saved_view(
        &mut self,
        store: &dyn SavedPostStore,
    ) -> Result<ViewMode, StoreError> {
        match self.mode {
            ListMode::Feed => self.enter_saved(store)?,
            ListMode::Saved(_) => {
                self.mode = ListMode::Feed;
                self.search_generation += 1;
                tracing::info!("Showing feed");
            }
        }
        Ok(self.mode())
    }

    fn enter_saved(&mut self, store: &dyn SavedPostStore) -> Result<(), StoreError> {
        let saved = match store.load_saved() {
            Ok(saved) => saved,
            Err(err) => {
                tracing::warn!(error = %err, "Could not load saved posts");
                return Err(err);
            }
        };
        tracing::info!(count = saved.len(), "Showing saved posts");
        self.mode = ListMode::Saved(SavedView::new(saved));
        self.search_generation += 1;
        Ok(())
    }

    /// Records new search text and returns a ticket to apply after the debounce delay.
    ///
    /// Every call supersedes earlier tickets. Returns `None` outside saved mode.
    pub fn search_text_changed(&mut self, text: impl Into<String>) -> Option<SearchTicket> {
        let ListMode::Saved(view) = &mut self.mode else {
            return None;
        };
        let text = text.into();
        view.search_text.clone_from(&text);
        self.search_generation += 1;
        Some(SearchTicket {
            generation: self.search_generation,
            text,
        })
    }

    /// Applies a debounced search. Stale tickets are ignored.
    ///
    /// Returns whether the filtered list was recomputed.
    pub fn apply_search(&mut self, ticket: &SearchTicket) -> bool {
        if ticket.generation != self.search_generation {
            tracing::debug!(text = %ticket.text, "Dropping superseded search");
            return false;
        }
        let ListMode::Saved(view) = &mut self.mode else {
            return false;
        };
        view.filtered = filter_by_title(&view.saved, &ticket.text);
        tracing::debug!(
            text = %ticket.text,
            matches = view.filtered.len(),
            "Applied saved-post search"
        );
        true
    }

    /// Clears the search immediately and shows the full saved set.
    pub fn search_cancelled(&mut self) -> bool {
        let ListMode::Saved(view) = &mut self.mode else {
            return false;
        };
        view.search_text.clear();
        view.filtered = view.saved.clone();
        self.search_generation += 1;
        true
    }

    /// Prefetches the next page when less than the configured number of
    /// viewport heights of content remains below the visible area.
    pub fn scroll_position_changed(
        &mut self,
        offset: f32,
        content_height: f32,
        viewport_height: f32,
    ) -> Option<PageRequest> {
        let threshold = content_height - viewport_height * self.settings.prefetch_viewports;
        if offset > threshold {
            self.load_next_feed_page()
        } else {
            None
        }
    }

    /// The post at `index` in the active list.
    pub fn row_selected(&self, index: usize) -> Option<Post> {
        self.posts().get(index).cloned()
    }

    /// Reacts to a post's saved state changing in the detail view.
    ///
    /// Saved mode reloads the saved set exactly like entering it. Feed mode
    /// goes through the page-load path again without resetting the cursor.
    pub fn detail_updated(
        &mut self,
        post: &Post,
        store: &dyn SavedPostStore,
    ) -> Result<Option<PageRequest>, StoreError> {
        tracing::debug!(id = %post.id, mode = ?self.mode(), "Post updated in detail view");
        match self.mode {
            ListMode::Saved(_) => {
                self.enter_saved(store)?;
                Ok(None)
            }
            ListMode::Feed => Ok(self.load_next_feed_page()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostId;
    use crate::services::MockSavedPostStore;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: PostId::from(id),
            title: title.to_string(),
            author: "author".to_string(),
            body: String::new(),
            created_at: Utc::now(),
            image_url: None,
            permalink: None,
        }
    }

    fn page(count: usize, start: usize, cursor: Option<&str>) -> FeedPage {
        FeedPage {
            posts: (start..start + count)
                .map(|i| post(&format!("t3_{i}"), &format!("Post {i}")))
                .collect(),
            next_cursor: cursor.map(str::to_string),
        }
    }

    fn store_with(posts: Vec<Post>) -> MockSavedPostStore {
        let mut store = MockSavedPostStore::new();
        store
            .expect_load_saved()
            .returning(move || Ok(posts.clone()));
        store
    }

    fn failing_store() -> MockSavedPostStore {
        let mut store = MockSavedPostStore::new();
        store
            .expect_load_saved()
            .returning(|| Err(StoreError::Unavailable));
        store
    }

    fn saved_controller(titles: &[&str]) -> ListController {
        let posts = titles
            .iter()
            .enumerate()
            .map(|(i, title)| post(&format!("t3_s{i}"), title))
            .collect();
        let mut controller = ListController::new(ListSettings::default());
        controller
            .toggle_saved_view(&store_with(posts))
            .unwrap();
        controller
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn first_request_uses_configured_source_and_no_cursor() {
        let mut controller = ListController::new(ListSettings::default());
        let request = controller.load_next_feed_page().unwrap();

        assert_eq!(
            request,
            PageRequest {
                source: "ios".to_string(),
                limit: 10,
                cursor: None,
            }
        );
        assert!(controller.is_loading());
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut controller = ListController::new(ListSettings::default());
        assert!(controller.load_next_feed_page().is_some());
        for _ in 0..5 {
            assert!(controller.load_next_feed_page().is_none());
        }

        controller.complete_feed_page(Ok(page(10, 0, Some("abc"))));
        assert!(!controller.is_loading());
        assert!(controller.load_next_feed_page().is_some());
    }

    #[test]
    fn second_request_carries_returned_cursor() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(10, 0, Some("abc"))));

        let request = controller.load_next_feed_page().unwrap();
        assert_eq!(request.cursor.as_deref(), Some("abc"));
        assert_eq!(controller.posts().len(), 10);
    }

    #[test]
    fn pages_append_in_order() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(2, 0, Some("c1"))));
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(2, 2, Some("c2"))));

        assert_eq!(
            titles(controller.posts()),
            vec!["Post 0", "Post 1", "Post 2", "Post 3"]
        );
        assert_eq!(controller.cursor(), &PageCursor::After("c2".to_string()));
    }

    #[test]
    fn exhausted_feed_stops_loading() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(3, 0, None)));

        assert!(controller.snapshot().exhausted);
        assert!(controller.load_next_feed_page().is_none());
        assert!(!controller.is_loading());
    }

    #[test]
    fn failed_page_leaves_state_and_allows_retry() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(10, 0, Some("abc"))));

        controller.load_next_feed_page().unwrap();
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        controller.complete_feed_page(Err(FeedError::Decode(err)));

        assert!(!controller.is_loading());
        assert_eq!(controller.posts().len(), 10);
        assert_eq!(controller.cursor(), &PageCursor::After("abc".to_string()));
        assert!(controller.snapshot().error.is_some());

        let retry = controller.load_next_feed_page().unwrap();
        assert_eq!(retry.cursor.as_deref(), Some("abc"));
        controller.complete_feed_page(Ok(page(1, 10, Some("def"))));
        assert_eq!(controller.snapshot().error, None);
    }

    #[test]
    fn no_page_loads_in_saved_mode() {
        let mut controller = saved_controller(&["Saved"]);
        assert!(controller.load_next_feed_page().is_none());
        assert!(controller.scroll_position_changed(1000.0, 0.0, 100.0).is_none());
        assert!(!controller.is_loading());
    }

    #[test]
    fn entering_saved_shows_full_set() {
        let controller = saved_controller(&["Hello World", "Other"]);

        assert_eq!(controller.mode(), ViewMode::Saved);
        assert_eq!(titles(controller.posts()), vec!["Hello World", "Other"]);
        assert_eq!(controller.search_text(), Some(""));
        assert_eq!(controller.saved_posts().map(<[Post]>::len), Some(2));
    }

    #[test]
    fn reentering_saved_discards_previous_search() {
        let mut controller = saved_controller(&["Hello World", "Other"]);
        let ticket = controller.search_text_changed("hello").unwrap();
        assert!(controller.apply_search(&ticket));
        assert_eq!(controller.posts().len(), 1);

        let store = store_with(vec![post("a", "Hello World"), post("b", "Other")]);
        controller.toggle_saved_view(&store).unwrap();
        assert_eq!(controller.search_text(), None);
        controller.toggle_saved_view(&store).unwrap();

        assert_eq!(controller.search_text(), Some(""));
        assert_eq!(titles(controller.posts()), vec!["Hello World", "Other"]);
    }

    #[test]
    fn store_failure_keeps_feed_mode() {
        let mut controller = ListController::new(ListSettings::default());
        let result = controller.toggle_saved_view(&failing_store());

        assert!(matches!(result, Err(StoreError::Unavailable)));
        assert_eq!(controller.mode(), ViewMode::Feed);
    }

    #[test]
    fn empty_store_still_switches() {
        let mut controller = ListController::new(ListSettings::default());
        let mode = controller.toggle_saved_view(&store_with(vec![])).unwrap();

        assert_eq!(mode, ViewMode::Saved);
        assert!(controller.posts().is_empty());
    }

    #[test]
    fn feed_survives_round_trip_through_saved() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(10, 0, Some("abc"))));

        let store = store_with(vec![post("s", "Saved")]);
        controller.toggle_saved_view(&store).unwrap();
        assert_eq!(titles(controller.posts()), vec!["Saved"]);

        assert_eq!(controller.toggle_saved_view(&store).unwrap(), ViewMode::Feed);
        assert_eq!(controller.posts().len(), 10);
        assert_eq!(controller.cursor(), &PageCursor::After("abc".to_string()));
    }

    #[test]
    fn page_completing_while_saved_lands_in_feed() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller
            .toggle_saved_view(&store_with(vec![post("s", "Saved")]))
            .unwrap();

        controller.complete_feed_page(Ok(page(3, 0, Some("abc"))));
        assert_eq!(titles(controller.posts()), vec!["Saved"]);
        assert_eq!(controller.feed_posts().len(), 3);
    }

    #[test]
    fn search_filters_title_case_insensitively() {
        let mut controller = saved_controller(&["Hello World", "Other"]);
        let ticket = controller.search_text_changed("hello").unwrap();
        assert!(controller.apply_search(&ticket));

        assert_eq!(titles(controller.posts()), vec!["Hello World"]);
    }

    #[test]
    fn search_ignores_author_and_body() {
        let mut view = post("a", "Title");
        view.author = "hello".to_string();
        view.body = "hello".to_string();
        assert!(filter_by_title(&[view], "hello").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let posts = vec![
            post("a", "Swift concurrency"),
            post("b", "SWIFTUI tips"),
            post("c", "Xcode 16"),
        ];
        let once = filter_by_title(&posts, "swift");
        let twice = filter_by_title(&once, "swift");

        assert_eq!(titles(&once), vec!["Swift concurrency", "SWIFTUI tips"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_search_restores_full_set() {
        let mut controller = saved_controller(&["Hello World", "Other"]);
        let ticket = controller.search_text_changed("zzz").unwrap();
        controller.apply_search(&ticket);
        assert!(controller.posts().is_empty());

        let ticket = controller.search_text_changed("").unwrap();
        controller.apply_search(&ticket);
        assert_eq!(controller.posts().len(), 2);
    }

    #[test]
    fn only_latest_search_ticket_applies() {
        let mut controller = saved_controller(&["Hello World", "Other"]);
        let stale = controller.search_text_changed("oth").unwrap();
        let latest = controller.search_text_changed("hel").unwrap();

        assert!(!controller.apply_search(&stale));
        assert_eq!(controller.posts().len(), 2);
        assert!(controller.apply_search(&latest));
        assert_eq!(titles(controller.posts()), vec!["Hello World"]);
        assert_eq!(controller.search_text(), Some("hel"));
    }

    #[test]
    fn search_ignored_in_feed_mode() {
        let mut controller = ListController::new(ListSettings::default());
        assert!(controller.search_text_changed("hello").is_none());
        assert!(!controller.search_cancelled());
    }

    #[test]
    fn cancel_clears_text_and_invalidates_pending_search() {
        let mut controller = saved_controller(&["Hello World", "Other"]);
        let ticket = controller.search_text_changed("hello").unwrap();

        assert!(controller.search_cancelled());
        assert!(!controller.apply_search(&ticket));
        assert_eq!(controller.search_text(), Some(""));
        assert_eq!(controller.posts().len(), 2);
    }

    #[test]
    fn search_ticket_from_saved_mode_is_dropped_after_leaving() {
        let mut controller = saved_controller(&["Hello World"]);
        let ticket = controller.search_text_changed("hello").unwrap();
        controller
            .toggle_saved_view(&store_with(vec![]))
            .unwrap();

        assert!(!controller.apply_search(&ticket));
        assert_eq!(controller.mode(), ViewMode::Feed);
    }

    #[test]
    fn scroll_prefetches_within_two_viewports_of_the_end() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(10, 0, Some("abc"))));

        // content 1000, viewport 100: threshold at 800
        assert!(controller.scroll_position_changed(700.0, 1000.0, 100.0).is_none());
        assert!(controller.scroll_position_changed(800.0, 1000.0, 100.0).is_none());
        assert!(controller.scroll_position_changed(801.0, 1000.0, 100.0).is_some());
    }

    #[test]
    fn scrolling_past_threshold_requests_once() {
        let mut controller = ListController::new(ListSettings::default());
        let requests = [850.0, 870.0, 900.0, 950.0]
            .into_iter()
            .filter_map(|offset| controller.scroll_position_changed(offset, 1000.0, 100.0))
            .count();
        assert_eq!(requests, 1);
    }

    #[test]
    fn prefetch_factor_is_configurable() {
        let mut controller = ListController::new(ListSettings {
            prefetch_viewports: 1.0,
            ..ListSettings::default()
        });
        assert!(controller.scroll_position_changed(850.0, 1000.0, 100.0).is_none());
        assert!(controller.scroll_position_changed(901.0, 1000.0, 100.0).is_some());
    }

    #[test]
    fn row_selection_resolves_active_list() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(3, 0, None)));
        assert_eq!(controller.row_selected(1).unwrap().title, "Post 1");
        assert!(controller.row_selected(3).is_none());

        controller
            .toggle_saved_view(&store_with(vec![post("s", "Saved")]))
            .unwrap();
        assert_eq!(controller.row_selected(0).unwrap().title, "Saved");
        assert!(controller.row_selected(1).is_none());
    }

    #[test]
    fn detail_update_in_saved_mode_reloads_store() {
        let mut controller = saved_controller(&["Hello World", "Other"]);
        let ticket = controller.search_text_changed("hello").unwrap();
        controller.apply_search(&ticket);

        let remaining = vec![post("b", "Other")];
        let request = controller
            .detail_updated(&post("a", "Hello World"), &store_with(remaining))
            .unwrap();

        assert!(request.is_none());
        assert_eq!(titles(controller.posts()), vec!["Other"]);
        assert_eq!(controller.search_text(), Some(""));
    }

    #[test]
    fn detail_update_reload_failure_keeps_saved_view() {
        let mut controller = saved_controller(&["Hello World"]);
        let result = controller.detail_updated(&post("a", "Hello World"), &failing_store());

        assert!(result.is_err());
        assert_eq!(controller.mode(), ViewMode::Saved);
        assert_eq!(titles(controller.posts()), vec!["Hello World"]);
    }

    #[test]
    fn detail_update_in_feed_mode_continues_from_cursor() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();
        controller.complete_feed_page(Ok(page(10, 0, Some("abc"))));

        let mut store = MockSavedPostStore::new();
        store.expect_load_saved().never();
        let request = controller
            .detail_updated(&post("t3_0", "Post 0"), &store)
            .unwrap()
            .unwrap();

        assert_eq!(request.cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn snapshot_reflects_mode() {
        let mut controller = ListController::new(ListSettings::default());
        controller.load_next_feed_page().unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.mode, ViewMode::Feed);
        assert_eq!(snapshot.search, None);
        assert!(snapshot.loading);

        controller
            .toggle_saved_view(&store_with(vec![post("s", "Saved")]))
            .unwrap();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.mode, ViewMode::Saved);
        assert_eq!(snapshot.search.as_deref(), Some(""));
        assert_eq!(snapshot.posts.len(), 1);
    }
}
