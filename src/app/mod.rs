//! Application state and lifecycle management.
//!
//! This module contains:
//! - The list controller and its snapshots (state.rs)
//! - The session event loop that owns the controller (session.rs)
//! - Messages between views, the session and background work (events.rs)
//! - The search debounce timer (debounce.rs)
//! - Thumbnail download bookkeeping (thumbnails.rs)
//! - Key actions and the terminal run loop

pub mod debounce;
pub mod events;
pub mod session;
pub mod state;
pub mod thumbnails;

pub use debounce::Debouncer;
pub use events::{DetailRequest, ListCommand, ListEvent, UpdateNotifier};
pub use session::{ListHandle, ListSession};
pub use state::{
    filter_by_title, ListController, ListSettings, ListSnapshot, SearchTicket, ViewMode,
};
pub use thumbnails::ThumbnailRequests;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::FeedConfig;
use crate::services::{RedditClient, SqliteSavedStore, ThumbnailCache};
use crate::ui::{Flow, MainWindow};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// User actions, one per input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPost,
    PreviousPost,
    OpenPost,
    ToggleSavedView,
    LoadMore,
    Search(String),
    CancelSearch,
    ToggleSave,
    Help,
}

/// Keys shown in the help panel.
pub const KEY_HELP: &[(&str, &str)] = &[
    ("j", "next post"),
    ("k", "previous post"),
    ("o/enter", "open post"),
    ("b", "toggle feed / saved"),
    ("m", "load more posts"),
    ("/text", "search saved titles"),
    ("x", "cancel search"),
    ("s", "save / unsave (detail)"),
    ("q", "back / quit"),
    ("?", "toggle help"),
];

/// Maps an input line to an action.
pub fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim_end_matches('\r');
    if let Some(text) = line.strip_prefix('/') {
        return Some(Action::Search(text.to_string()));
    }
    let action = match line.trim() {
        "q" => Action::Quit,
        "j" => Action::NextPost,
        "k" => Action::PreviousPost,
        "o" | "" => Action::OpenPost,
        "b" => Action::ToggleSavedView,
        "m" => Action::LoadMore,
        "x" => Action::CancelSearch,
        "s" => Action::ToggleSave,
        "?" => Action::Help,
        _ => return None,
    };
    Some(action)
}

/// Main application entry point
pub struct App;

impl App {
    /// Runs the reader until the user quits or stdin closes.
    pub async fn run(config: FeedConfig) -> Result<()> {
        let db_path = config.saved_db_path()?;
        let store = Arc::new(
            SqliteSavedStore::open(&db_path)
                .with_context(|| format!("opening saved posts at {}", db_path.display()))?,
        );
        let client = Arc::new(RedditClient::new(&config).context("building feed client")?);
        let thumbnails =
            Arc::new(ThumbnailCache::new(&config).context("building thumbnail client")?);

        let (session, handle, mut details) =
            ListSession::from_config(&config, client, store.clone());
        let session_task = session.spawn();
        handle.send(ListCommand::LoadNextPage);

        let mut window = MainWindow::new(&config, handle.snapshot());
        let mut updates = handle.clone();
        let (mut thumbnail_requests, mut loaded_thumbnails) =
            ThumbnailRequests::new(Arc::clone(&thumbnails));
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        draw(&window, &thumbnails)?;
        loop {
            tokio::select! {
                line = input.next_line() => {
                    let Some(line) = line.context("reading input")? else {
                        break;
                    };
                    let Some(action) = parse_action(&line) else {
                        window.show_toast(format!("Unknown key {line:?}, ? for help"));
                        draw(&window, &thumbnails)?;
                        continue;
                    };
                    match window.handle_action(action, &*store) {
                        Flow::Continue => {}
                        Flow::Send(command) => {
                            handle.send(command);
                        }
                        Flow::Quit => break,
                    }
                }
                snapshot = updates.changed() => {
                    let Some(snapshot) = snapshot else {
                        tracing::warn!("List session ended unexpectedly");
                        break;
                    };
                    window.set_snapshot(snapshot);
                }
                Some(request) = details.recv() => window.open_detail(request, &*store),
                Some(loaded) = loaded_thumbnails.recv() => thumbnail_requests.finished(loaded),
            }
            thumbnail_requests.request(window.visible_image_urls());
            draw(&window, &thumbnails)?;
        }

        handle.send(ListCommand::Shutdown);
        session_task.await.context("list session panicked")?;
        tracing::info!("Exiting");
        Ok(())
    }
}

fn draw(window: &MainWindow, thumbnails: &ThumbnailCache) -> Result<()> {
    let frame = window.render(|url| thumbnails.get(url), Utc::now());
    let mut out = std::io::stdout().lock();
    write!(out, "{CLEAR_SCREEN}{frame}").context("writing frame")?;
    out.flush().context("flushing frame")?;
    Ok(())
}
