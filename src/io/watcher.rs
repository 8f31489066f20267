use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum StoreEvent {
    /// The store file changed on disk (another process wrote it).
    Changed,
}

/// Watches the app directory for external edits to the store file.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<StoreEvent>,
}

impl StoreWatcher {
    /// Start watching the given app directory.
    /// `poll()` should be called each event-loop round.
    pub fn start(dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Only the store file matters; state, config, lock, and the
                // atomic-write temp files churn constantly.
                let relevant = event.paths.iter().any(|p| {
                    p.file_name().and_then(|n| n.to_str()) == Some("store.json")
                });

                if relevant {
                    let _ = tx.send(StoreEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending store events.
    /// Collapses a burst of events into at most one `Changed`.
    pub fn poll(&self) -> Option<StoreEvent> {
        let mut latest = None;
        while let Ok(event) = self.rx.try_recv() {
            latest = Some(event);
        }
        latest
    }
}
