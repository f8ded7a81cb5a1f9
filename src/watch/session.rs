//! Coalesced filesystem watch session
//!
//! Any program may rewrite the OS configuration database at any time, so
//! staying current requires watching it. This module maintains one
//! underlying watcher per session no matter how many paths are added:
//! later `watch` calls merge into the existing session instead of
//! subscribing a second handler, which would deliver every change twice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{error, info};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::broadcast;

use crate::common::Result;
use super::event::ChangeEvent;

/// Capacity of the change event channel; slow subscribers lag rather
/// than block the watcher thread.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The live half of a session: the notify handle and the paths it covers.
struct ActiveWatch {
    watcher: RecommendedWatcher,
    paths: HashSet<PathBuf>,
}

/// A single logical watch over the OS configuration database.
///
/// The session is idle until the first `watch` call and stays active
/// afterwards, possibly over an empty path set; adding an
/// already-watched path or removing a never-watched one is a no-op.
pub struct WatchSession {
    default_path: PathBuf,
    active: Mutex<Option<ActiveWatch>>,
    events: broadcast::Sender<ChangeEvent>,
}

impl WatchSession {
    /// Create an idle session.
    ///
    /// # Parameters
    ///
    /// * `default_path` - Path watched when `watch` is called without one
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            default_path: default_path.into(),
            active: Mutex::new(None),
            events,
        }
    }

    /// Subscribe to change events.
    ///
    /// Every subscriber receives every event emitted after it subscribed,
    /// in delivery order.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Start watching the given paths, or the default path if none are
    /// given.
    ///
    /// The first call activates the session; subsequent calls merge the
    /// new paths into it so each change is delivered exactly once.
    pub fn watch(&self, paths: Option<&[PathBuf]>) -> Result<()> {
        let default = [self.default_path.clone()];
        let paths = paths.unwrap_or(&default);

        let mut active = self.active.lock().unwrap();

        if active.is_none() {
            info!("Starting configuration watch session");
            *active = Some(ActiveWatch {
                watcher: spawn_watcher(self.events.clone())?,
                paths: HashSet::new(),
            });
        }

        if let Some(watch) = active.as_mut() {
            for path in paths {
                if watch.paths.contains(path) {
                    continue;
                }
                watch.watcher.watch(path, RecursiveMode::NonRecursive)?;
                watch.paths.insert(path.clone());
                info!("Watching {}", path.display());
            }
        }

        Ok(())
    }

    /// Stop watching the given paths, or the default path if none are
    /// given.
    ///
    /// Removing paths from an idle session is a no-op; the session itself
    /// stays around, inert, once its last path is removed.
    pub fn unwatch(&self, paths: Option<&[PathBuf]>) -> Result<()> {
        let default = [self.default_path.clone()];
        let paths = paths.unwrap_or(&default);

        let mut active = self.active.lock().unwrap();

        let Some(watch) = active.as_mut() else {
            return Ok(());
        };

        for path in paths {
            if !watch.paths.remove(path.as_path()) {
                continue;
            }
            watch.watcher.unwatch(path)?;
            info!("Stopped watching {}", path.display());
        }

        Ok(())
    }

    /// Whether the session currently holds at least one watched path
    pub fn is_watching(&self) -> bool {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|watch| !watch.paths.is_empty())
    }

    /// The paths currently covered by the session, sorted
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .active
            .lock()
            .unwrap()
            .as_ref()
            .map(|watch| watch.paths.iter().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }

    /// The path watched when `watch` is called without arguments
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }
}

/// Create the underlying watcher with the single session-wide handler.
fn spawn_watcher(events: broadcast::Sender<ChangeEvent>) -> Result<RecommendedWatcher> {
    let watcher = RecommendedWatcher::new(
        move |result: notify::Result<Event>| match result {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() {
                    for path in event.paths {
                        // Nobody subscribed yet is fine; the event is
                        // a signal, not state.
                        let _ = events.send(ChangeEvent { path });
                    }
                }
            }
            Err(err) => error!("Watch error: {:?}", err),
        },
        Config::default(),
    )?;

    Ok(watcher)
}
