//! The list session: a single event loop that owns the [`ListController`].
//!
//! All state changes happen on the session task. Page fetches and debounce
//! timers run as separate tasks and post their results back through the
//! session's own channel using a weak sender, so work that outlives the
//! session is dropped instead of touching freed state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::FeedConfig;
use crate::services::{FeedClient, PageRequest, SavedPostStore};

use super::debounce::Debouncer;
use super::events::{DetailRequest, ListCommand, ListEvent, UpdateNotifier};
use super::state::{ListController, ListSettings, ListSnapshot, SearchTicket};

/// Client side of a running [`ListSession`].
#[derive(Debug, Clone)]
pub struct ListHandle {
    tx: mpsc::UnboundedSender<ListEvent>,
    snapshots: watch::Receiver<ListSnapshot>,
}

impl ListHandle {
    /// Sends a command. Returns `false` if the session has stopped.
    pub fn send(&self, command: ListCommand) -> bool {
        self.tx.send(command.into()).is_ok()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next published snapshot. `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<ListSnapshot> {
        self.snapshots.changed().await.ok()?;
        Some(self.snapshots.borrow_and_update().clone())
    }

    /// Waits until a snapshot satisfies `predicate`. `None` once the session is gone.
    pub async fn wait_for(
        &mut self,
        predicate: impl Fn(&ListSnapshot) -> bool,
    ) -> Option<ListSnapshot> {
        loop {
            {
                let snapshot = self.snapshots.borrow_and_update();
                if predicate(&snapshot) {
                    return Some(snapshot.clone());
                }
            }
            self.snapshots.changed().await.ok()?;
        }
    }
}

/// Event loop driving the post list.
pub struct ListSession {
    controller: ListController,
    client: Arc<dyn FeedClient>,
    store: Arc<dyn SavedPostStore>,
    debouncer: Debouncer,
    events: mpsc::UnboundedReceiver<ListEvent>,
    loopback: mpsc::WeakUnboundedSender<ListEvent>,
    snapshots: watch::Sender<ListSnapshot>,
    details: mpsc::UnboundedSender<DetailRequest>,
}

impl ListSession {
    /// Creates a session plus its handle and the stream of detail-view requests.
    pub fn new(
        settings: ListSettings,
        search_debounce: Duration,
        client: Arc<dyn FeedClient>,
        store: Arc<dyn SavedPostStore>,
    ) -> (Self, ListHandle, mpsc::UnboundedReceiver<DetailRequest>) {
        let controller = ListController::new(settings);
        let (tx, events) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let (details_tx, details_rx) = mpsc::unbounded_channel();

        let session = Self {
            controller,
            client,
            store,
            debouncer: Debouncer::new(search_debounce),
            events,
            loopback: tx.downgrade(),
            snapshots: snapshot_tx,
            details: details_tx,
        };
        let handle = ListHandle {
            tx,
            snapshots: snapshot_rx,
        };
        (session, handle, details_rx)
    }

    /// Creates a session configured from [`FeedConfig`].
    pub fn from_config(
        config: &FeedConfig,
        client: Arc<dyn FeedClient>,
        store: Arc<dyn SavedPostStore>,
    ) -> (Self, ListHandle, mpsc::UnboundedReceiver<DetailRequest>) {
        Self::new(
            ListSettings::from(config),
            config.search_debounce(),
            client,
            store,
        )
    }

    /// Runs the session on a new tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Processes events until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        tracing::debug!("List session started");
        while let Some(event) = self.events.recv().await {
            if !self.handle(event) {
                break;
            }
            self.publish();
        }
        self.debouncer.cancel();
        tracing::debug!("List session stopped");
    }

    fn handle(&mut self, event: ListEvent) -> bool {
        match event {
            ListEvent::Command(command) => return self.handle_command(command),
            ListEvent::DetailUpdated(post) => {
                match self.controller.detail_updated(&post, self.store.as_ref()) {
                    Ok(Some(request)) => self.spawn_fetch(request),
                    Ok(None) => {}
                    Err(err) => tracing::warn!(error = %err, "Could not refresh saved posts"),
                }
            }
            ListEvent::PageLoaded(result) => self.controller.complete_feed_page(result),
            ListEvent::SearchDebounced(ticket) => {
                self.controller.apply_search(&ticket);
            }
        }
        true
    }

    fn handle_command(&mut self, command: ListCommand) -> bool {
        match command {
            ListCommand::LoadNextPage => {
                if let Some(request) = self.controller.load_next_feed_page() {
                    self.spawn_fetch(request);
                }
            }
            ListCommand::ToggleSaved => {
                self.debouncer.cancel();
                // failures are logged by the controller; the mode simply stays put
                let _ = self.controller.toggle_saved_view(self.store.as_ref());
            }
            ListCommand::SearchChanged(text) => {
                if let Some(ticket) = self.controller.search_text_changed(text) {
                    self.schedule_search(ticket);
                }
            }
            ListCommand::SearchCancelled => {
                self.debouncer.cancel();
                self.controller.search_cancelled();
            }
            ListCommand::Scrolled {
                offset,
                content_height,
                viewport_height,
            } => {
                if let Some(request) =
                    self.controller
                        .scroll_position_changed(offset, content_height, viewport_height)
                {
                    self.spawn_fetch(request);
                }
            }
            ListCommand::SelectRow(index) => self.open_detail(index),
            ListCommand::Shutdown => return false,
        }
        true
    }

    fn spawn_fetch(&self, request: PageRequest) {
        tracing::debug!(source = %request.source, cursor = ?request.cursor, "Requesting feed page");
        let client = Arc::clone(&self.client);
        let loopback = self.loopback.clone();
        tokio::spawn(async move {
            let result = client.fetch_page(request).await;
            let delivered = loopback
                .upgrade()
                .is_some_and(|tx| tx.send(ListEvent::PageLoaded(result)).is_ok());
            if !delivered {
                tracing::debug!("List session closed, dropping feed page");
            }
        });
    }

    fn schedule_search(&mut self, ticket: SearchTicket) {
        let loopback = self.loopback.clone();
        self.debouncer.schedule(async move {
            if let Some(tx) = loopback.upgrade() {
                let _ = tx.send(ListEvent::SearchDebounced(ticket));
            }
        });
    }

    fn open_detail(&self, index: usize) {
        let Some(post) = self.controller.row_selected(index) else {
            tracing::debug!(index, "No post at selected row");
            return;
        };
        let Some(tx) = self.loopback.upgrade() else {
            return;
        };
        let request = DetailRequest {
            post,
            notifier: UpdateNotifier::new(tx),
        };
        if self.details.send(request).is_err() {
            tracing::warn!("No detail view attached");
        }
    }

    fn publish(&self) {
        let next = self.controller.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
