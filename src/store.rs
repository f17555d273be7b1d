//! Build-status synchronization store.
//!
//! `SyncStore` owns the shared dashboard state and exposes a single
//! operation, `synchronize`, that fetches the build list (and, lazily,
//! server metadata) from a Duck server and reconciles the results. All
//! mutation of `DashState` goes through `synchronize`; observers subscribe
//! to a watch channel or take snapshots.
//!
//! Failure is never raised to the caller. A failed round resets the derived
//! state (`builds`, `info`) and sets the `error` flag; recovery is the
//! caller invoking `synchronize` again on its own schedule.

use tokio::sync::{Mutex, watch};

use crate::duck::{BuildRecord, DuckClient, ServerInfo};
use crate::progress::Progress;

/// Dashboard version, reported alongside build data
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared dashboard state.
///
/// `builds == None` means "no data": never fetched, or the last round
/// failed. `error` implies both `builds` and `info` are `None`; stale data
/// is never shown alongside an error.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashState {
    /// Currently targeted server address
    pub server: String,
    /// Selected view, `None` for the unfiltered build list
    pub view: Option<String>,
    /// Last successfully fetched build list, in server order
    pub builds: Option<Vec<BuildRecord>>,
    /// Server metadata, fetched once per session per server
    pub info: Option<ServerInfo>,
    /// Whether the most recent round failed
    pub error: bool,
    /// Whether a round's primary request is in flight
    pub loading: bool,
    /// Version of the dashboard itself, set once at startup
    pub version: String,
}

impl DashState {
    fn new() -> Self {
        Self {
            server: String::new(),
            view: None,
            builds: None,
            info: None,
            error: false,
            loading: false,
            version: VERSION.to_string(),
        }
    }
}

/// The synchronization store.
///
/// Holds the sole writer for the state channel; rounds are serialized, so
/// a `synchronize` call issued while another is in flight waits its turn
/// instead of interleaving mutations.
pub struct SyncStore {
    client: DuckClient,
    default_server: String,
    state: watch::Sender<DashState>,
    round: Mutex<()>,
}

impl SyncStore {
    pub fn new(client: DuckClient, default_server: impl Into<String>) -> Self {
        let (state, _) = watch::channel(DashState::new());
        Self {
            client,
            default_server: default_server.into(),
            state,
            round: Mutex::new(()),
        }
    }

    /// Subscribe to state changes. Receivers see every committed round.
    pub fn subscribe(&self) -> watch::Receiver<DashState> {
        self.state.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> DashState {
        self.state.borrow().clone()
    }

    /// Run one synchronization round.
    ///
    /// Fetches `{server}/api/builds` (or the view-filtered variant) and
    /// reconciles the result into the shared state. On success, server
    /// metadata is fetched as a secondary request, but only while `info` is
    /// unset; a secondary failure leaves `info` unset without touching the
    /// `error` flag or signaling `fail`.
    ///
    /// `server` overrides the configured default for this and subsequent
    /// rounds; an empty or absent override normalizes to the default. The
    /// override and the view are recorded in the state regardless of the
    /// fetch outcome.
    pub async fn synchronize(
        &self,
        progress: &dyn Progress,
        server: Option<&str>,
        view: Option<&str>,
    ) {
        let _round = self.round.lock().await;

        progress.start();

        let server = match server {
            Some(server) if !server.is_empty() => server.to_string(),
            _ => self.default_server.clone(),
        };
        let view = view.map(str::to_string);

        self.state.send_modify(|state| {
            if state.server != server {
                // Cached metadata belongs to the previous server.
                state.info = None;
            }
            state.server = server.clone();
            state.view = view.clone();
            state.loading = true;
        });

        match self.client.get_builds(&server, view.as_deref()).await {
            Ok(builds) => {
                tracing::debug!("fetched {} builds from {}", builds.len(), server);
                self.state.send_modify(|state| {
                    state.builds = Some(builds);
                    state.error = false;
                    state.loading = false;
                });
                progress.finish();

                if self.state.borrow().info.is_none() {
                    self.fetch_server_info(&server).await;
                }
            }
            Err(err) => {
                tracing::warn!("synchronization with {} failed: {}", server, err);
                self.state.send_modify(|state| {
                    state.builds = None;
                    state.info = None;
                    state.error = true;
                    state.loading = false;
                });
                progress.fail();
            }
        }
    }

    /// Secondary request: server metadata, needed once per session.
    /// A failure here only leaves `info` unset.
    async fn fetch_server_info(&self, server: &str) {
        let info = match self.client.get_server_info(server).await {
            Ok(info) => Some(info),
            Err(err) => {
                tracing::debug!("server information unavailable: {}", err);
                None
            }
        };
        self.state.send_modify(|state| state.info = info);
    }
}
