// Embedding surface seam - no Tauri imports allowed.
// The registry drives surfaces through these traits so it can be tested
// without a live webview.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, Result};

const LABEL_PREFIX: &str = "session-";

/// Stable identity of a session and of the surface it owns.
/// Allocated once by the registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Label used for the webview backing this session.
    pub fn label(&self) -> String {
        format!("{}{}", LABEL_PREFIX, self.0)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        label
            .strip_prefix(LABEL_PREFIX)
            .and_then(|raw| raw.parse().ok())
            .map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-session load-completion subscription.
///
/// The host keeps a clone next to the surface and checks `is_live` before
/// reporting a finished load. Closing the session cancels it, so pending
/// completions for a destroyed surface are dropped at the source.
///
/// Every load the registry starts bumps the shared generation. Events carry
/// the generation they were read under, so a slow title read for a page the
/// session has already left is recognisable as stale.
#[derive(Debug, Clone)]
pub struct LoadSubscription {
    session: SessionId,
    live: Arc<AtomicBool>,
    generation: Arc<AtomicU64>,
}

impl LoadSubscription {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            live: Arc::new(AtomicBool::new(true)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Generation of the load currently in flight.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Marks the start of a new load and returns its generation.
    pub fn begin_load(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Builds the event for the load in flight right now.
    pub fn complete(&self, title: std::result::Result<String, BrowserError>) -> Option<LoadEvent> {
        self.complete_generation(self.generation(), title)
    }

    /// Builds the event for the load started as `generation`, or `None`
    /// once cancelled.
    pub fn complete_generation(
        &self,
        generation: u64,
        title: std::result::Result<String, BrowserError>,
    ) -> Option<LoadEvent> {
        if !self.is_live() {
            return None;
        }
        Some(LoadEvent {
            session: self.session,
            generation,
            title,
        })
    }
}

/// A finished load, addressed by the surface's own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub session: SessionId,
    /// Which of the session's loads finished.
    pub generation: u64,
    /// `Err(TitleUnreadable)` when the document could not be introspected.
    pub title: std::result::Result<String, BrowserError>,
}

/// One embedded content view, exclusively owned by a session.
pub trait Surface {
    /// Re-point the view at an already relay-wrapped URL.
    fn load(&mut self, proxied_url: &str) -> Result<()>;
    fn reload(&mut self) -> Result<()>;
    fn set_visible(&mut self, visible: bool);
    /// Release the view. Any load still in flight is abandoned.
    fn destroy(self);
}

/// Factory for surfaces.
pub trait SurfaceHost {
    type Surface: Surface;

    /// Create a hidden surface loading `proxied_url`. The host reports load
    /// completion through `subscription`.
    fn create(&mut self, subscription: LoadSubscription, proxied_url: &str) -> Result<Self::Surface>;
}

/// In-process host that records every call. Used by unit and integration
/// tests in place of a webview.
pub mod testing {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    use super::{LoadSubscription, SessionId, Surface, SurfaceHost};
    use crate::error::{BrowserError, Result};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SurfaceCall {
        Created { session: SessionId, url: String },
        Loaded { session: SessionId, url: String },
        Reloaded(SessionId),
        Destroyed(SessionId),
    }

    #[derive(Debug, Default)]
    struct Shared {
        calls: Vec<SurfaceCall>,
        visible: BTreeMap<SessionId, bool>,
        subscriptions: HashMap<SessionId, LoadSubscription>,
        fail_next_create: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub struct RecordingHost {
        shared: Arc<Mutex<Shared>>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        fn with<T>(&self, f: impl FnOnce(&mut Shared) -> T) -> T {
            let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut shared)
        }

        pub fn calls(&self) -> Vec<SurfaceCall> {
            self.with(|s| s.calls.clone())
        }

        /// Sessions whose surface is currently shown.
        pub fn visible(&self) -> Vec<SessionId> {
            self.with(|s| {
                s.visible
                    .iter()
                    .filter(|(_, shown)| **shown)
                    .map(|(id, _)| *id)
                    .collect()
            })
        }

        /// Sessions whose surface exists (created and not destroyed).
        pub fn alive(&self) -> Vec<SessionId> {
            self.with(|s| s.visible.keys().copied().collect())
        }

        pub fn subscription(&self, session: SessionId) -> Option<LoadSubscription> {
            self.with(|s| s.subscriptions.get(&session).cloned())
        }

        pub fn fail_next_create(&self) {
            self.with(|s| s.fail_next_create = true);
        }

        /// Last URL handed to the surface of `session`.
        pub fn current_url(&self, session: SessionId) -> Option<String> {
            self.with(|s| {
                s.calls.iter().rev().find_map(|call| match call {
                    SurfaceCall::Created { session: id, url } | SurfaceCall::Loaded { session: id, url }
                        if *id == session =>
                    {
                        Some(url.clone())
                    }
                    _ => None,
                })
            })
        }
    }

    impl SurfaceHost for RecordingHost {
        type Surface = RecordingSurface;

        fn create(&mut self, subscription: LoadSubscription, proxied_url: &str) -> Result<RecordingSurface> {
            let session = subscription.session();
            self.with(|s| {
                if s.fail_next_create {
                    s.fail_next_create = false;
                    return Err(BrowserError::Surface(format!("cannot create {}", session.label())));
                }
                s.calls.push(SurfaceCall::Created {
                    session,
                    url: proxied_url.to_string(),
                });
                s.visible.insert(session, false);
                s.subscriptions.insert(session, subscription);
                Ok(())
            })?;
            Ok(RecordingSurface {
                session,
                host: self.clone(),
            })
        }
    }

    #[derive(Debug)]
    pub struct RecordingSurface {
        session: SessionId,
        host: RecordingHost,
    }

    impl Surface for RecordingSurface {
        fn load(&mut self, proxied_url: &str) -> Result<()> {
            let session = self.session;
            self.host.with(|s| {
                s.calls.push(SurfaceCall::Loaded {
                    session,
                    url: proxied_url.to_string(),
                })
            });
            Ok(())
        }

        fn reload(&mut self) -> Result<()> {
            let session = self.session;
            self.host.with(|s| s.calls.push(SurfaceCall::Reloaded(session)));
            Ok(())
        }

        fn set_visible(&mut self, visible: bool) {
            let session = self.session;
            self.host.with(|s| {
                s.visible.insert(session, visible);
            });
        }

        fn destroy(self) {
            let session = self.session;
            self.host.with(|s| {
                s.visible.remove(&session);
                s.calls.push(SurfaceCall::Destroyed(session));
            });
        }
    }
}
