use std::sync::Arc;

use groupwatch_core::watcher::ChangeWatcher;

/// Shared handler state. The engine is built once at startup and reused
/// across trigger invocations.
#[derive(Clone)]
pub struct AppState {
    pub watcher: Arc<ChangeWatcher>,
}
