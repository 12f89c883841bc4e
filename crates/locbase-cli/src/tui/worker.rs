//! Background worker for store, preference and provider operations.
//!
//! The [`LocationWorker`] owns the [`Store`], the [`Preferences`] and the
//! location provider. It receives [`Command`]s from the UI, performs them one
//! at a time, and reports the outcome with [`AppEvent`]s. Failures never end
//! the worker: they are logged and turned into events the UI can show.

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use locbase_core::{
    CaptureOutcome, LocationProvider, SharedProvider, capture_once, provisional_record,
};
use locbase_store::{Preferences, Store};

use super::messages::{AppEvent, Command};

/// Background worker that performs the screen's operations.
pub struct LocationWorker {
    /// Receiver for commands from the UI.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI.
    event_tx: mpsc::Sender<AppEvent>,
    store: Store,
    prefs: Preferences,
    provider: SharedProvider,
}

impl LocationWorker {
    /// Create a new worker.
    pub fn new(
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<AppEvent>,
        store: Store,
        prefs: Preferences,
        provider: SharedProvider,
    ) -> Self {
        Self {
            command_rx,
            event_tx,
            store,
            prefs,
            provider,
        }
    }

    /// Run the worker's main loop.
    ///
    /// This method consumes the worker and runs until a [`Command::Shutdown`]
    /// is received or the command channel is closed.
    pub async fn run(mut self) {
        info!(provider = self.provider.name(), "LocationWorker started");

        loop {
            match self.command_rx.recv().await {
                Some(Command::Shutdown) => {
                    info!("LocationWorker received shutdown command");
                    break;
                }
                Some(cmd) => self.handle_command(cmd).await,
                None => {
                    info!("Command channel closed, shutting down worker");
                    break;
                }
            }
        }

        info!("LocationWorker stopped");
    }

    async fn handle_command(&self, cmd: Command) {
        debug!(?cmd, "Handling command");

        match cmd {
            Command::Launch => self.handle_launch().await,
            Command::Capture => self.handle_capture().await,
            Command::Clear => self.handle_clear().await,
            Command::SetDarkMode { enabled } => self.handle_set_dark_mode(enabled).await,
            Command::Shutdown => {}
        }
    }

    async fn send(&self, event: AppEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send event to UI: {}", e);
        }
    }

    async fn store_error(&self, context: &str, error: String) {
        self.send(AppEvent::StoreError {
            context: context.to_string(),
            error,
        })
        .await;
    }

    /// Read the preference, create the table if needed and load every record.
    async fn handle_launch(&self) {
        let dark_mode = match self.prefs.dark_mode().await {
            Ok(enabled) => enabled,
            Err(e) => {
                warn!(error = %e, "Failed to read dark-mode preference, using light mode");
                self.send(AppEvent::PreferenceError {
                    error: e.to_string(),
                })
                .await;
                false
            }
        };
        self.send(AppEvent::PreferenceLoaded { dark_mode }).await;

        if let Err(e) = self.store.initialize().await {
            warn!(error = %e, "Failed to initialize location database");
            self.store_error("Database setup failed", e.to_string()).await;
        }

        let records = match self.store.select_all().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to load locations");
                self.store_error("Loading failed", e.to_string()).await;
                Vec::new()
            }
        };

        info!(count = records.len(), "Loaded locations");
        self.send(AppEvent::LocationsLoaded { records }).await;
    }

    /// Ask for permission, read one fix, show it, then save it.
    async fn handle_capture(&self) {
        let coordinate = match capture_once(&*self.provider).await {
            Ok(CaptureOutcome::Captured(coordinate)) => coordinate,
            Ok(CaptureOutcome::Denied) => {
                self.send(AppEvent::PermissionDenied).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to capture location");
                self.send(AppEvent::CaptureFailed {
                    error: e.to_string(),
                })
                .await;
                return;
            }
        };

        let record = provisional_record(coordinate);
        self.send(AppEvent::LocationCaptured { record }).await;

        let stored_id = match self.store.insert(coordinate).await {
            Ok(id) => {
                debug!(id, provisional_id = record.id, "Saved location");
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Failed to save location");
                self.store_error("Saving failed", e.to_string()).await;
                None
            }
        };
        self.send(AppEvent::CaptureComplete { stored_id }).await;
    }

    /// Delete every record. The UI empties its list whatever the outcome.
    async fn handle_clear(&self) {
        let removed = match self.store.delete_all().await {
            Ok(count) => {
                info!(count, "Cleared locations");
                Some(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear locations");
                self.store_error("Clearing failed", e.to_string()).await;
                None
            }
        };
        self.send(AppEvent::LocationsCleared { removed }).await;
    }

    async fn handle_set_dark_mode(&self, enabled: bool) {
        match self.prefs.set_dark_mode(enabled).await {
            Ok(()) => {
                debug!(enabled, "Saved dark-mode preference");
                self.send(AppEvent::DarkModeSaved { enabled }).await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to save dark-mode preference");
                self.send(AppEvent::PreferenceError {
                    error: e.to_string(),
                })
                .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use locbase_core::MockProvider;
    use locbase_types::{Coordinate, PermissionStatus};

    struct Harness {
        cmd_tx: mpsc::Sender<Command>,
        event_rx: mpsc::Receiver<AppEvent>,
        store: Store,
        prefs: Preferences,
        provider: Arc<MockProvider>,
        handle: tokio::task::JoinHandle<()>,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(provider: MockProvider) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let store = Store::open_in_memory();
            let prefs = Preferences::open(dir.path().join("preferences.json"));
            let provider = Arc::new(provider);

            let (cmd_tx, cmd_rx) = mpsc::channel(8);
            let (event_tx, event_rx) = mpsc::channel(32);
            let worker = LocationWorker::new(
                cmd_rx,
                event_tx,
                store.clone(),
                prefs.clone(),
                provider.clone(),
            );
            let handle = tokio::spawn(worker.run());

            Self {
                cmd_tx,
                event_rx,
                store,
                prefs,
                provider,
                handle,
                _dir: dir,
            }
        }

        async fn send(&self, cmd: Command) {
            self.cmd_tx.send(cmd).await.unwrap();
        }

        async fn next(&mut self) -> AppEvent {
            self.event_rx.recv().await.unwrap()
        }

        /// Collect events until one that finishes an operation.
        async fn until_finished(&mut self) -> Vec<AppEvent> {
            let mut events = Vec::new();
            loop {
                let event = self.next().await;
                let done = event.finishes_operation();
                events.push(event);
                if done {
                    return events;
                }
            }
        }

        async fn shutdown(self) {
            self.cmd_tx.send(Command::Shutdown).await.unwrap();
            self.handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_fresh_launch() {
        let mut h = Harness::new(MockProvider::default());
        h.send(Command::Launch).await;

        let events = h.until_finished().await;
        assert_eq!(
            events,
            vec![
                AppEvent::PreferenceLoaded { dark_mode: false },
                AppEvent::LocationsLoaded { records: vec![] },
            ]
        );
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_launch_loads_existing_rows_and_preference() {
        let mut h = Harness::new(MockProvider::default());
        h.store.initialize().await.unwrap();
        h.store.insert(Coordinate::new(1.0, 2.0)).await.unwrap();
        h.store.insert(Coordinate::new(3.0, 4.0)).await.unwrap();
        h.prefs.set_dark_mode(true).await.unwrap();

        h.send(Command::Launch).await;
        let events = h.until_finished().await;

        assert_eq!(events[0], AppEvent::PreferenceLoaded { dark_mode: true });
        let AppEvent::LocationsLoaded { records } = &events[1] else {
            panic!("expected LocationsLoaded, got {:?}", events[1]);
        };
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_capture_granted_shows_then_saves() {
        let mut h = Harness::new(
            MockProvider::builder()
                .fix(Coordinate::new(-23.5, -46.6))
                .build(),
        );
        h.send(Command::Launch).await;
        h.until_finished().await;

        h.send(Command::Capture).await;
        let events = h.until_finished().await;

        let AppEvent::LocationCaptured { record } = events[0] else {
            panic!("expected LocationCaptured, got {:?}", events[0]);
        };
        assert_eq!(record.coordinate(), Coordinate::new(-23.5, -46.6));
        assert!(matches!(
            events[1],
            AppEvent::CaptureComplete { stored_id: Some(_) }
        ));

        let saved = h.store.select_all().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].coordinate(), Coordinate::new(-23.5, -46.6));
        // The provisional id is time-based, not the row id.
        assert_ne!(saved[0].id, record.id);
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_capture_denied_writes_nothing() {
        let mut h = Harness::new(
            MockProvider::builder()
                .permission(PermissionStatus::Denied)
                .build(),
        );
        h.send(Command::Launch).await;
        h.until_finished().await;

        h.send(Command::Capture).await;
        let events = h.until_finished().await;

        assert_eq!(events, vec![AppEvent::PermissionDenied]);
        assert_eq!(h.provider.location_reads(), 0);
        assert!(h.store.select_all().await.unwrap().is_empty());
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_capture_provider_failure() {
        let mut h = Harness::new(MockProvider::builder().fail_reads("no fix").build());
        h.send(Command::Launch).await;
        h.until_finished().await;

        h.send(Command::Capture).await;
        let events = h.until_finished().await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], AppEvent::CaptureFailed { error } if error.contains("no fix")));
        assert!(h.store.select_all().await.unwrap().is_empty());
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_capture_without_table_still_completes() {
        let mut h = Harness::new(MockProvider::default());

        // No launch, so the table does not exist and the insert fails.
        h.send(Command::Capture).await;
        let events = h.until_finished().await;

        assert!(matches!(events[0], AppEvent::LocationCaptured { .. }));
        assert!(matches!(events[1], AppEvent::StoreError { .. }));
        assert_eq!(events[2], AppEvent::CaptureComplete { stored_id: None });
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_clear_then_reload_is_empty() {
        let mut h = Harness::new(MockProvider::default());
        h.store.initialize().await.unwrap();
        h.store.insert(Coordinate::new(1.0, 2.0)).await.unwrap();
        h.store.insert(Coordinate::new(3.0, 4.0)).await.unwrap();

        h.send(Command::Clear).await;
        assert_eq!(
            h.until_finished().await,
            vec![AppEvent::LocationsCleared { removed: Some(2) }]
        );

        h.send(Command::Launch).await;
        let events = h.until_finished().await;
        assert_eq!(
            events.last(),
            Some(&AppEvent::LocationsLoaded { records: vec![] })
        );
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_dark_mode_round_trip() {
        let mut h = Harness::new(MockProvider::default());

        h.send(Command::SetDarkMode { enabled: true }).await;
        assert_eq!(h.next().await, AppEvent::DarkModeSaved { enabled: true });
        assert!(h.prefs.dark_mode().await.unwrap());

        h.send(Command::SetDarkMode { enabled: false }).await;
        assert_eq!(h.next().await, AppEvent::DarkModeSaved { enabled: false });
        assert!(!h.prefs.dark_mode().await.unwrap());
        h.shutdown().await;
    }

    #[tokio::test]
    async fn test_worker_stops_when_channel_closes() {
        let h = Harness::new(MockProvider::default());
        drop(h.cmd_tx);
        h.handle.await.unwrap();
    }
}
